use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Full connection string; takes precedence over the individual parts.
    #[serde(default)]
    pub url: Option<String>,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// `development` exposes error details in 5xx responses.
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
        }
    }
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

/// Wall-clock time (local) of the daily expiry scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 9,
            minute: 0,
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| {
                AppError::ConfigError(format!("Failed to parse {config_path}: {e}"))
            })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // no file: defaults, then the environment overrides below
                Config {
                    server: ServerConfig {
                        host: "0.0.0.0".to_string(),
                        port: 3000,
                    },
                    database: DatabaseConfig {
                        host: "localhost".to_string(),
                        port: 5432,
                        user: "postgres".to_string(),
                        password: String::new(),
                        name: "membresias_db".to_string(),
                        max_connections: 10,
                        url: None,
                    },
                    app: AppConfig::default(),
                    scheduler: SchedulerConfig::default(),
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Unable to read config file {config_path}: {e}"
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
        if let Some(p) = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT")
            && let Ok(p) = v.parse()
        {
            self.database.port = p;
        }
        if let Ok(v) = env::var("DB_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("APP_ENV") {
            self.app.environment = v;
        }
        if let Ok(v) = env::var("NOTIFY_SCHEDULER_ENABLED")
            && let Ok(b) = v.parse()
        {
            self.scheduler.enabled = b;
        }
        if let Ok(v) = env::var("NOTIFY_CHECK_HOUR")
            && let Ok(h) = v.parse()
        {
            self.scheduler.hour = h;
        }
        if let Ok(v) = env::var("NOTIFY_CHECK_MINUTE")
            && let Ok(m) = v.parse()
        {
            self.scheduler.minute = m;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.scheduler.hour > 23 || self.scheduler.minute > 59 {
            return Err(AppError::ConfigError(format!(
                "Invalid scheduler time {:02}:{:02}",
                self.scheduler.hour, self.scheduler.minute
            )));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::ConfigError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
