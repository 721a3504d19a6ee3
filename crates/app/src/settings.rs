//! Settings of the server binary.
//!
//! Read from `config/settings.toml` (optional), then `EXPENSE_TRACKER__*`
//! environment variables (`EXPENSE_TRACKER__SERVER__PORT=8080`). `PORT` and
//! `FRONTEND_URL` are honoured as shortcuts for the port and for extra allowed
//! origins.
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/settings";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("expenses.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub api_prefix: String,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 5000,
            api_prefix: "/api".to_string(),
            database: Database::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
    pub preview_origin_pattern: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub cors: Cors,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_PATH).required(false))
            .add_source(
                Environment::with_prefix("EXPENSE_TRACKER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            );
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        let mut settings = Self::from_builder(builder)?;
        if let Ok(frontend) = std::env::var("FRONTEND_URL") {
            settings.add_frontend_origins(&frontend);
        }
        Ok(settings)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// Appends comma separated origins to the allow-list.
    fn add_frontend_origins(&mut self, value: &str) {
        for origin in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if !self.cors.allowed_origins.iter().any(|known| known == origin) {
                self.cors.allowed_origins.push(origin.to_string());
            }
        }
    }

    pub fn address(&self) -> String {
        let bind = self.server.bind.as_deref().unwrap_or("127.0.0.1");
        format!("{}:{}", bind, self.server.port)
    }
}
