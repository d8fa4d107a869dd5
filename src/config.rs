use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Unset means reqwest's default (no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub store_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: ".algodesk-session.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub search_debounce_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
            search_debounce_ms: 200,
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str).map_err(|e| {
                AppError::ConfigError(format!("failed to parse {config_path}: {e}"))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No file: the API base URL must come from the environment.
                let base_url = env::var("API_BASE_URL").map_err(|_| {
                    AppError::ConfigError(
                        "API_BASE_URL is not set and no config.toml was found".to_string(),
                    )
                })?;
                Config {
                    server: ServerConfig::default(),
                    api: ApiConfig {
                        base_url,
                        timeout_secs: None,
                    },
                    session: SessionConfig::default(),
                    dashboard: DashboardConfig::default(),
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "cannot read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("ALLOWED_ORIGINS") {
            self.server.allowed_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(v) = env::var("API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("API_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.api.timeout_secs = Some(n);
        }
        if let Ok(v) = env::var("SESSION_STORE_PATH") {
            self.session.store_path = v;
        }
        if let Ok(v) = env::var("DASHBOARD_PAGE_SIZE")
            && let Ok(n) = v.parse()
        {
            self.dashboard.default_page_size = n;
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::ConfigError("api.base_url is empty".to_string()));
        }
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(AppError::ConfigError(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }
        if self.dashboard.default_page_size == 0 {
            return Err(AppError::ConfigError(
                "dashboard.default_page_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
