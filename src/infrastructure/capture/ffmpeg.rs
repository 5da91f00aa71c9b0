//! FFmpeg-based camera capture adapter
//!
//! A stream is a camera device. Recording runs one ffmpeg process that
//! encodes the camera to AV1 WebM on stdout; stdout is cut into chunks on
//! a fixed interval. Pause and resume suspend the process with signals.

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::ports::{
    EventEmitter, MediaDevices, MediaRecorder, MediaStream, RecorderError, RecorderEvent,
    Subscription, VideoTrack,
};
use crate::domain::capture::CaptureConstraints;
use crate::domain::error::CaptureError;
use crate::domain::media::{Blob, Chunk, MediaType};
use crate::domain::recording::{RecorderState, RecordingSession};

const READ_BUFFER: usize = 64 * 1024;

/// Camera devices reached through ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegDevices {
    device: String,
    chunk_interval: Duration,
}

impl FfmpegDevices {
    pub fn new(device: impl Into<String>, chunk_interval: Duration) -> Self {
        Self {
            device: device.into(),
            chunk_interval,
        }
    }

    async fn check_ffmpeg() -> Result<(), CaptureError> {
        let status = Command::new("ffmpeg")
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureError::Other("ffmpeg not found in PATH".to_string())
                } else {
                    CaptureError::Other(e.to_string())
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CaptureError::Other(format!("ffmpeg -version exited with {status}")))
        }
    }

    /// Device nodes must exist and be readable. Non-path devices
    /// (avfoundation indices) are left to ffmpeg.
    async fn check_device(device: &str) -> Result<(), CaptureError> {
        if !device.starts_with('/') {
            return Ok(());
        }
        tokio::fs::File::open(Path::new(device))
            .await
            .map(drop)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CaptureError::NotFound,
                std::io::ErrorKind::PermissionDenied => {
                    CaptureError::PermissionDenied(format!("{device}: {e}"))
                }
                _ => CaptureError::Other(format!("{device}: {e}")),
            })
    }
}

#[async_trait]
impl MediaDevices for FfmpegDevices {
    async fn get_user_media(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError> {
        Self::check_ffmpeg().await?;
        Self::check_device(&self.device).await?;

        info!(device = %self.device, video = %constraints.video, "camera opened");
        Ok(Arc::new(FfmpegStream {
            id: format!("ffmpeg:{}", self.device),
            input: InputSpec {
                device: self.device.clone(),
                constraints: *constraints,
            },
            chunk_interval: self.chunk_interval,
            active: Arc::new(AtomicBool::new(true)),
        }))
    }
}

/// Platform input arguments for one device
#[derive(Debug, Clone)]
struct InputSpec {
    device: String,
    constraints: CaptureConstraints,
}

impl InputSpec {
    #[cfg(target_os = "macos")]
    fn args(&self, with_audio: bool) -> Vec<String> {
        let audio = if with_audio { "0" } else { "none" };
        vec![
            "-f".to_string(),
            "avfoundation".to_string(),
            "-video_size".to_string(),
            self.constraints.video.to_string(),
            "-i".to_string(),
            format!("{}:{}", self.device, audio),
        ]
    }

    #[cfg(not(target_os = "macos"))]
    fn args(&self, with_audio: bool) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            "v4l2".to_string(),
            "-video_size".to_string(),
            self.constraints.video.to_string(),
            "-i".to_string(),
            self.device.clone(),
        ];
        if with_audio {
            args.extend([
                "-f".to_string(),
                "pulse".to_string(),
                "-i".to_string(),
                "default".to_string(),
            ]);
        }
        args
    }

    /// Args for a streaming AV1/WebM recording on stdout
    fn record_args(&self) -> Vec<String> {
        let mut args = vec![
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
        ];
        args.extend(self.args(self.constraints.audio));
        args.extend([
            "-c:v".to_string(),
            "libaom-av1".to_string(),
            "-usage".to_string(),
            "realtime".to_string(),
            "-cpu-used".to_string(),
            "8".to_string(),
            "-row-mt".to_string(),
            "1".to_string(),
        ]);
        if self.constraints.audio {
            args.extend(["-c:a".to_string(), "libopus".to_string()]);
        }
        args.extend(["-f".to_string(), "webm".to_string(), "pipe:1".to_string()]);
        args
    }

    /// Args for grabbing one PNG frame on stdout
    fn photo_args(&self) -> Vec<String> {
        let mut args = vec![
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
        ];
        args.extend(self.args(false));
        args.extend([
            "-frames:v".to_string(),
            "1".to_string(),
            "-c:v".to_string(),
            "png".to_string(),
            "-f".to_string(),
            "image2pipe".to_string(),
            "pipe:1".to_string(),
        ]);
        args
    }
}

/// A camera device opened through ffmpeg
pub struct FfmpegStream {
    id: String,
    input: InputSpec,
    chunk_interval: Duration,
    active: Arc<AtomicBool>,
}

impl MediaStream for FfmpegStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn constraints(&self) -> CaptureConstraints {
        self.input.constraints
    }

    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, RecorderError> {
        if !self.is_active() {
            return Err(RecorderError::StartFailed("stream has ended".to_string()));
        }
        Ok(Box::new(FfmpegRecorder::new(
            self.input.clone(),
            self.chunk_interval,
        )))
    }

    fn video_track(&self) -> Option<Arc<dyn VideoTrack>> {
        Some(Arc::new(FfmpegFrameGrabber {
            label: self.input.device.clone(),
            input: self.input.clone(),
            active: Arc::clone(&self.active),
        }))
    }

    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Grabs single frames with a one-shot ffmpeg run
pub struct FfmpegFrameGrabber {
    label: String,
    input: InputSpec,
    active: Arc<AtomicBool>,
}

#[async_trait]
impl VideoTrack for FfmpegFrameGrabber {
    fn label(&self) -> &str {
        &self.label
    }

    async fn take_photo(&self) -> Result<Blob, CaptureError> {
        if !self.active.load(Ordering::SeqCst) {
            return Err(CaptureError::Other("track has ended".to_string()));
        }

        let output = Command::new("ffmpeg")
            .args(self.input.photo_args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CaptureError::Other(format!("ffmpeg failed: {e}")))?;

        if !output.status.success() || output.stdout.is_empty() {
            return Err(CaptureError::Other(last_line(&output.stderr)));
        }
        Ok(Blob::new(output.stdout, MediaType::Png))
    }
}

struct Running {
    pid: Pid,
    pump: JoinHandle<()>,
}

/// Recorder driving one ffmpeg encoder process per session
pub struct FfmpegRecorder {
    input: InputSpec,
    chunk_interval: Duration,
    events: EventEmitter<RecorderEvent>,
    session: Arc<Mutex<RecordingSession>>,
    running: tokio::sync::Mutex<Option<Running>>,
}

impl FfmpegRecorder {
    fn new(input: InputSpec, chunk_interval: Duration) -> Self {
        Self {
            input,
            chunk_interval,
            events: EventEmitter::new(),
            session: Arc::new(Mutex::new(RecordingSession::new())),
            running: tokio::sync::Mutex::new(None),
        }
    }

    fn spawn_ffmpeg(args: Vec<String>) -> Result<Child, RecorderError> {
        Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RecorderError::StartFailed(e.to_string()))
    }

    /// Send signal to the ffmpeg process
    fn send_signal(pid: Pid, sig: Signal) -> Result<(), RecorderError> {
        signal::kill(pid, sig)
            .map_err(|e| RecorderError::Failed(format!("Signal {sig:?} failed: {e}")))
    }

    async fn signal_running(&self, sig: Signal) -> Result<(), RecorderError> {
        match self.running.lock().await.as_ref() {
            Some(running) => Self::send_signal(running.pid, sig),
            None => Err(RecorderError::Failed("encoder is not running".to_string())),
        }
    }
}

/// Forward encoder output as chunks until ffmpeg exits, then finish the
/// session.
async fn pump_output(
    mut child: Child,
    mut stdout: ChildStdout,
    events: EventEmitter<RecorderEvent>,
    session: Arc<Mutex<RecordingSession>>,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut pending = Vec::new();
    let mut buf = vec![0u8; READ_BUFFER];

    loop {
        tokio::select! {
            read = stdout.read(&mut buf) => match read {
                Ok(0) => break,
                Ok(n) => pending.extend_from_slice(&buf[..n]),
                Err(e) => {
                    warn!(error = %e, "encoder output read failed");
                    break;
                }
            },
            _ = ticker.tick() => {
                if !pending.is_empty() {
                    let chunk = Chunk::from(std::mem::take(&mut pending));
                    events.emit(RecorderEvent::DataAvailable(chunk));
                }
            }
        }
    }

    if !pending.is_empty() {
        events.emit(RecorderEvent::DataAvailable(Chunk::from(pending)));
    }

    drop(stdout);
    let failure = match child.wait_with_output().await {
        Ok(output) if output.status.success() => None,
        Ok(output) => Some(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            last_line(&output.stderr)
        )),
        Err(e) => Some(format!("ffmpeg wait failed: {e}")),
    };

    let mut session = session.lock();
    if session.state().is_active() {
        // Exited without being asked to
        let _ = session.stop();
        let message = failure.unwrap_or_else(|| "encoder exited early".to_string());
        events.emit(RecorderEvent::Error(message));
    } else if let Some(message) = failure {
        debug!(%message, "encoder exit after stop");
    }
    events.emit(RecorderEvent::Stop);
}

fn last_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .last()
        .unwrap_or("unknown error")
        .to_string()
}

#[async_trait]
impl MediaRecorder for FfmpegRecorder {
    fn subscribe(&self) -> Subscription<RecorderEvent> {
        self.events.subscribe()
    }

    fn state(&self) -> RecorderState {
        self.session.lock().state()
    }

    async fn start(&self) -> Result<(), RecorderError> {
        let mut running = self.running.lock().await;
        self.session.lock().check_start()?;

        let args = self.input.record_args();
        debug!(args = ?args, "spawning encoder");
        let mut child = Self::spawn_ffmpeg(args)?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RecorderError::StartFailed("encoder stdout unavailable".to_string()))?;
        let pid = child
            .id()
            .and_then(|id| i32::try_from(id).ok())
            .map(Pid::from_raw)
            .ok_or_else(|| RecorderError::StartFailed("encoder exited immediately".to_string()))?;

        self.session.lock().start()?;
        self.events.emit(RecorderEvent::Start);

        let pump = tokio::spawn(pump_output(
            child,
            stdout,
            self.events.clone(),
            Arc::clone(&self.session),
            self.chunk_interval,
        ));
        *running = Some(Running { pid, pump });
        info!(pid = pid.as_raw(), "encoder started");
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecorderError> {
        let mut running = self.running.lock().await;
        let was_paused = {
            let mut session = self.session.lock();
            let paused = session.is_paused();
            session.stop()?;
            paused
        };

        let Some(Running { pid, pump }) = running.take() else {
            return Ok(());
        };
        if was_paused {
            Self::send_signal(pid, Signal::SIGCONT)?;
        }
        // SIGINT makes ffmpeg finalize the container
        Self::send_signal(pid, Signal::SIGINT)?;

        pump.await
            .map_err(|e| RecorderError::Failed(format!("encoder task failed: {e}")))?;
        info!(pid = pid.as_raw(), "encoder stopped");
        Ok(())
    }

    async fn pause(&self) -> Result<(), RecorderError> {
        self.session.lock().check_pause()?;
        // Session changes only once the process is actually suspended
        self.signal_running(Signal::SIGSTOP).await?;
        self.session.lock().pause()?;
        self.events.emit(RecorderEvent::Pause);
        Ok(())
    }

    async fn resume(&self) -> Result<(), RecorderError> {
        self.session.lock().check_resume()?;
        self.signal_running(Signal::SIGCONT).await?;
        self.session.lock().resume()?;
        self.events.emit(RecorderEvent::Resume);
        Ok(())
    }
}

impl Drop for FfmpegRecorder {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.try_lock() {
            if let Some(running) = running.take() {
                running.pump.abort();
            }
        }
    }
}
