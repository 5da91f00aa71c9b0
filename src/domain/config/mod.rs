//! Configuration value objects

mod app_config;

pub use app_config::{
    AppConfig, CaptureBackend, DEFAULT_CHUNK_INTERVAL_MS, DEFAULT_RESTART_SETTLE_MS,
    DEFAULT_THROTTLE_MS,
};
