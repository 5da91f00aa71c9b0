//! Media probing adapters

mod ffprobe;
mod synthetic;

pub use ffprobe::FfprobeProber;
pub use synthetic::SyntheticProber;
