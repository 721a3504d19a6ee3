use serde::Deserialize;

use crate::{cli::Args, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/cli";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            api_prefix: "/api".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Config file, then `EXPENSE_CLI_*` variables, then command line overrides.
pub fn load(args: &Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let builder = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("EXPENSE_CLI"));
    let settings: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_overrides(settings, args))
}

fn apply_overrides(mut settings: AppConfig, args: &Args) -> AppConfig {
    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(api_prefix) = &args.api_prefix {
        settings.api_prefix = api_prefix.clone();
    }
    if let Some(log_level) = &args.log_level {
        settings.log_level = log_level.clone();
    }
    settings
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn command_line_wins_over_file_values() {
        let args = Args::try_parse_from([
            "expense_cli",
            "--base-url",
            "http://expenses.local:8080",
            "--api-prefix",
            "",
            "list",
        ])
        .unwrap();
        let settings = apply_overrides(AppConfig::default(), &args);
        assert_eq!(settings.base_url, "http://expenses.local:8080");
        assert_eq!(settings.api_prefix, "");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn missing_overrides_keep_loaded_values() {
        let args = Args::try_parse_from(["expense_cli", "total"]).unwrap();
        let loaded = AppConfig {
            base_url: "https://expenses.example.com".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(apply_overrides(loaded.clone(), &args), loaded);
    }
}
