//! Widget runner

use std::env;
use std::io::BufRead;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::application::ports::{Alerter, ConfigStore, MediaDevices, MediaProber};
use crate::application::{Control, RecorderWidget, WidgetConfig};
use crate::domain::config::{AppConfig, CaptureBackend};
use crate::infrastructure::{
    create_alerter, BlobUrlRegistry, SyntheticDevices, SyntheticProber, TerminalView,
    TimelineDisplay, XdgConfigStore,
};

use super::args::WidgetOptions;
use super::controls::{parse_line, Input, HELP};
use super::presenter::Presenter;
use super::signals::forward_shutdown;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the capture device
pub const DEVICE_ENV: &str = "CAMREC_DEVICE";

const CONTROL_QUEUE: usize = 32;

/// Run the widget until `quit`, end of input or a shutdown signal
pub async fn run_widget(options: WidgetOptions) -> ExitCode {
    let presenter = Presenter::new();

    let (tx, mut controls) = mpsc::channel(CONTROL_QUEUE);

    if let Err(e) = forward_shutdown(tx.clone()) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    spawn_input_reader(tx);

    let urls = Arc::new(BlobUrlRegistry::new());
    let alerter = create_alerter(options.notify);

    presenter.banner(&options);
    info!(backend = %options.backend, device = %options.device, "starting widget");

    match options.backend {
        CaptureBackend::Synthetic => {
            let devices = SyntheticDevices::new(options.chunk_interval);
            let prober = Arc::new(SyntheticProber::new());
            drive(devices, prober, urls, alerter, options.widget, &mut controls).await;
        }
        #[cfg(unix)]
        CaptureBackend::Ffmpeg => {
            use crate::infrastructure::{FfmpegDevices, FfprobeProber};

            let devices = FfmpegDevices::new(options.device.clone(), options.chunk_interval);
            let prober = Arc::new(FfprobeProber::new());
            drive(devices, prober, urls, alerter, options.widget, &mut controls).await;
        }
        #[cfg(not(unix))]
        CaptureBackend::Ffmpeg => {
            presenter.error("The ffmpeg backend needs a Unix platform; use --backend synthetic");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

async fn drive<D, P>(
    devices: D,
    prober: Arc<P>,
    urls: Arc<BlobUrlRegistry>,
    alerter: Box<dyn Alerter>,
    config: WidgetConfig,
    controls: &mut mpsc::Receiver<Control>,
) where
    D: MediaDevices,
    P: MediaProber + 'static,
{
    let display = TimelineDisplay::new(urls.clone());
    let mut widget = RecorderWidget::new(
        devices,
        display,
        prober,
        TerminalView::new(),
        alerter,
        urls,
        config,
    );
    widget.run(controls).await;
}

/// Read control lines from stdin.
///
/// Runs on a plain thread so a pending read never holds up exit.
fn spawn_input_reader(tx: mpsc::Sender<Control>) {
    std::thread::spawn(move || {
        let presenter = Presenter::new();
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_line(&line) {
                Ok(Input::Control(Control::Quit)) => break,
                Ok(Input::Control(control)) => {
                    if tx.blocking_send(control).is_err() {
                        return;
                    }
                }
                Ok(Input::Help) => presenter.output(HELP),
                Ok(Input::Empty) => {}
                Err(e) => presenter.warn(&e.to_string()),
            }
        }
        let _ = tx.blocking_send(Control::Quit);
    });
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

fn env_config() -> AppConfig {
    AppConfig {
        device: env::var(DEVICE_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    }
}
