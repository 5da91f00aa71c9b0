//! Signal handling for the widget loop

use colored::Colorize;
use tokio::sync::mpsc;

use crate::application::Control;

/// Turn SIGINT/SIGTERM into a `Quit` control so the widget can release
/// the camera before exiting.
#[cfg(unix)]
pub fn forward_shutdown(controls: mpsc::Sender<Control>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => eprintln!("{} Received SIGINT (shutdown)", "↓".cyan()),
            _ = sigterm.recv() => eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan()),
        }
        let _ = controls.send(Control::Quit).await;
    });

    Ok(())
}

#[cfg(not(unix))]
pub fn forward_shutdown(controls: mpsc::Sender<Control>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{} Received Ctrl+C (shutdown)", "↓".cyan());
            let _ = controls.send(Control::Quit).await;
        }
    });

    Ok(())
}
