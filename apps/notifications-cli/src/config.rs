use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use notification_settings::NotificationSettingsConfig;

/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "NOTIFICATIONS__";

/// Layered config: defaults, then the YAML file (if given), then environment.
pub fn load(path: Option<&Path>) -> anyhow::Result<NotificationSettingsConfig> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("invalid configuration")
}

/// Log level for `-v` repetitions; `None` keeps the configured level.
pub fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
