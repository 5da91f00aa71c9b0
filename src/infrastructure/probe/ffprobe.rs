//! ffprobe-based media prober
//!
//! Streamed WebM carries no duration in its header, so `format=duration`
//! reads as `N/A` until the packets are scanned.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{MediaProber, ProbeElement, ReportedDuration};
use crate::domain::error::MediaLoadError;
use crate::domain::media::Blob;

static NEXT_FILE: AtomicU64 = AtomicU64::new(0);

/// Temp file holding the probed blob
struct TempMediaFile {
    path: PathBuf,
}

impl TempMediaFile {
    fn new(extension: &str) -> Self {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "camrec-probe-{}-{}.{}",
            std::process::id(),
            n,
            extension
        ));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempMediaFile {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Prober running ffprobe over a temp copy of each blob
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for FfprobeProber {
    fn create_element(&self) -> Box<dyn ProbeElement> {
        Box::new(FfprobeElement {
            file: None,
            position: 0.0,
        })
    }
}

struct FfprobeElement {
    file: Option<TempMediaFile>,
    position: f64,
}

impl FfprobeElement {
    fn loaded(&self) -> Result<&Path, MediaLoadError> {
        self.file
            .as_ref()
            .map(TempMediaFile::path)
            .ok_or_else(|| MediaLoadError::LoadFailed("no media loaded".to_string()))
    }
}

async fn run_ffprobe(path: &Path, entries: &[&str]) -> Result<String, MediaLoadError> {
    let output = Command::new("ffprobe")
        .args(["-v", "error"])
        .args(entries)
        .arg(path)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaLoadError::LoadFailed("ffprobe not found in PATH".to_string())
            } else {
                MediaLoadError::LoadFailed(e.to_string())
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaLoadError::LoadFailed(
            stderr.lines().last().unwrap_or("ffprobe failed").to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `format=duration` output. `N/A` means unknown.
fn parse_format_duration(output: &str) -> ReportedDuration {
    output
        .trim()
        .parse::<f64>()
        .map(ReportedDuration::from_secs)
        .unwrap_or(ReportedDuration::Unbounded)
}

/// End time of the last packet from `pts_time,duration_time` CSV rows
fn parse_packet_end(output: &str) -> ReportedDuration {
    let end = output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(',');
            let pts = fields.next()?.trim().parse::<f64>().ok()?;
            let duration = fields
                .next()
                .and_then(|d| d.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            Some(pts + duration)
        })
        .fold(None, |max: Option<f64>, end| Some(max.map_or(end, |m| m.max(end))));

    end.map_or(ReportedDuration::Unbounded, ReportedDuration::from_secs)
}

#[async_trait]
impl ProbeElement for FfprobeElement {
    async fn load_metadata(&mut self, blob: &Blob) -> Result<ReportedDuration, MediaLoadError> {
        let file = TempMediaFile::new(blob.media_type().extension());
        fs::write(file.path(), blob.data())
            .await
            .map_err(|e| MediaLoadError::LoadFailed(e.to_string()))?;

        let output = run_ffprobe(
            file.path(),
            &[
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
        )
        .await?;

        self.file = Some(file);
        self.position = 0.0;
        let reported = parse_format_duration(&output);
        debug!(?reported, "metadata loaded");
        Ok(reported)
    }

    async fn seek_and_wait_update(
        &mut self,
        position: f64,
    ) -> Result<ReportedDuration, MediaLoadError> {
        let output = run_ffprobe(
            self.loaded()?,
            &[
                "-show_entries",
                "packet=pts_time,duration_time",
                "-of",
                "csv=p=0",
            ],
        )
        .await?;

        let reported = parse_packet_end(&output);
        self.position = match reported {
            ReportedDuration::Finite(end) => position.min(end),
            ReportedDuration::Unbounded => 0.0,
        };
        Ok(reported)
    }

    fn reset_position(&mut self) {
        self.position = 0.0;
    }
}
