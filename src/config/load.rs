use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `PLAYLOG__`) override it, falling back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYLOG")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.tracker.poll_interval_secs == 0 {
            return Err("tracker.poll_interval_secs must be >= 1".to_string());
        }
        if self.navigator.next_page_label.trim().is_empty() {
            return Err("navigator.next_page_label must not be empty".to_string());
        }
        if self.browser.webdriver_url.trim().is_empty() {
            return Err("browser.webdriver_url must not be empty".to_string());
        }
        Ok(())
    }

    /// History file to use: explicit setting, else the XDG data default.
    pub fn history_path(&self) -> PathBuf {
        self.history
            .path
            .clone()
            .or_else(default_history_path)
            .unwrap_or_else(|| PathBuf::from("history.csv"))
    }

    /// Directory for log files: explicit setting, else the XDG state default.
    pub fn log_directory(&self) -> PathBuf {
        self.logging
            .directory
            .clone()
            .or_else(default_log_directory)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolve the config path from `PLAYLOG_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYLOG_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playlog/config.toml`
/// or `~/.config/playlog/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("playlog").join("config.toml"))
}

/// `$XDG_DATA_HOME/playlog/history.csv` or `~/.local/share/playlog/history.csv`.
pub fn default_history_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("playlog").join("history.csv"))
}

/// `$XDG_STATE_HOME/playlog` or `~/.local/state/playlog`.
pub fn default_log_directory() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("playlog"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
