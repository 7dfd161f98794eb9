use std::{env, path::PathBuf};

use thiserror::Error;

use super::schema::Settings;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("audio.initial_volume must be within 0.0..=1.0 (got {0})")]
    InitialVolume(f32),
    #[error("audio.volume_step must be within (0.0, 1.0] (got {0})")]
    VolumeStep(f32),
    #[error("audio.poll_ms must be >= 1")]
    PollInterval,
    #[error("ui.tick_ms must be >= 1")]
    TickInterval,
    #[error("library.extensions must name at least one extension")]
    NoExtensions,
}

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional config file, then applies environment
/// variables (prefix `ALONEMP__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ALONEMP")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let volume = self.audio.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(SettingsError::InitialVolume(volume));
        }
        let step = self.audio.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(SettingsError::VolumeStep(step));
        }
        if self.audio.poll_ms == 0 {
            return Err(SettingsError::PollInterval);
        }
        if self.ui.tick_ms == 0 {
            return Err(SettingsError::TickInterval);
        }
        if self
            .library
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err(SettingsError::NoExtensions);
        }
        Ok(())
    }
}

/// Resolve the config path from `ALONEMP_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ALONEMP_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/alonemp/config.toml`
/// or `~/.config/alonemp/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("alonemp").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/alonemp/alonemp.log`
/// or `~/.local/state/alonemp/alonemp.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("alonemp").join("alonemp.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
