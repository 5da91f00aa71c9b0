//! Line-based control input
//!
//! Each stdin line is one press on the widget's controls.

use thiserror::Error;

use crate::application::Control;

/// Shown for `help`
pub const HELP: &str = "\
controls:
  start            start recording
  stop             stop recording
  hold             pause recording
  resume           resume recording
  restart          discard the recording and reopen the camera
  play             play the recording
  pause            pause playback
  seek <seconds>   move the scrub slider
  snap             capture a still image
  status           print the widget state
  quit             exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Control(Control),
    Help,
    Empty,
}

/// Errors for unrecognised input lines
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControlParseError {
    #[error("Unknown control \"{0}\" (type help for a list)")]
    Unknown(String),

    #[error("seek needs a position in seconds")]
    MissingPosition,

    #[error("Invalid position \"{0}\"")]
    InvalidPosition(String),
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Input, ControlParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Empty);
    };

    let control = match command.to_lowercase().as_str() {
        "start" | "record" => Control::StartRecord,
        "stop" => Control::StopRecord,
        "hold" | "pause-record" => Control::PauseRecord,
        "resume" | "resume-record" => Control::ResumeRecord,
        "restart" => Control::Restart,
        "play" | "overlay" => Control::Play,
        "pause" => Control::Pause,
        "seek" | "slider" => {
            let raw = words.next().ok_or(ControlParseError::MissingPosition)?;
            let position = raw
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| ControlParseError::InvalidPosition(raw.to_string()))?;
            Control::Slider(position)
        }
        "snap" => Control::Snap,
        "status" => Control::Status,
        "quit" | "exit" | "q" => Control::Quit,
        "help" | "?" => return Ok(Input::Help),
        other => return Err(ControlParseError::Unknown(other.to_string())),
    };

    Ok(Input::Control(control))
}
