//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, CaptureBackend};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &config_value(&config, key).unwrap_or_else(|| "(not set)".to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let as_bool = || parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"));
    let as_pixels = || match value.parse::<u32>() {
        Ok(px) if px > 0 => Ok(px),
        _ => Err(invalid(key, "Value must be a positive number of pixels")),
    };
    let as_millis = |allow_zero: bool| match value.parse::<u64>() {
        Ok(ms) if allow_zero || ms > 0 => Ok(ms),
        _ if allow_zero => Err(invalid(key, "Value must be a number of milliseconds")),
        _ => Err(invalid(key, "Value must be a positive number of milliseconds")),
    };

    match key {
        "audio" => config.audio = Some(as_bool()?),
        "notify" => config.notify = Some(as_bool()?),
        "width" => config.width = Some(as_pixels()?),
        "height" => config.height = Some(as_pixels()?),
        "device" => {
            let device = value.trim();
            if device.is_empty() {
                return Err(invalid(key, "Device must not be empty"));
            }
            config.device = Some(device.to_string());
        }
        "backend" => {
            let backend = value
                .parse::<CaptureBackend>()
                .map_err(|message| invalid(key, message))?;
            config.backend = Some(backend.to_string());
        }
        "chunk_interval_ms" => config.chunk_interval_ms = Some(as_millis(false)?),
        "throttle_ms" => config.throttle_ms = Some(as_millis(true)?),
        "restart_settle_ms" => config.restart_settle_ms = Some(as_millis(true)?),
        _ => return Err(invalid(key, "Unsupported key")),
    }

    Ok(())
}

/// Stored value for `key`, formatted for display
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "audio" => config.audio.map(|b| b.to_string()),
        "width" => config.width.map(|v| v.to_string()),
        "height" => config.height.map(|v| v.to_string()),
        "device" => config.device.clone(),
        "backend" => config.backend.clone(),
        "chunk_interval_ms" => config.chunk_interval_ms.map(|v| v.to_string()),
        "throttle_ms" => config.throttle_ms.map(|v| v.to_string()),
        "restart_settle_ms" => config.restart_settle_ms.map(|v| v.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
