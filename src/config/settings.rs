use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use config::{Config, ConfigError, File};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;

use crate::config::jwt::JwtSettings;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    32
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl DatabaseSettings {
    /// `db_url` wins over the individual fields when the host provides one.
    pub fn connection_string(&self) -> SecretString {
        if let Some(db_url) = &self.db_url {
            return db_url.clone();
        }
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.db_name
        );
        SecretString::new(url.into_boxed_str())
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
    }
}

/// Which backing store the server talks to.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Live,
    Mock,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub data_source: DataSourceMode,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .parse()
            .map_err(ConfigError::Message)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

fn configuration_directory() -> Result<PathBuf, ConfigError> {
    let base_path = env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    Ok(base_path.join("configuration"))
}

fn env_source(prefix: &str) -> config::Environment {
    config::Environment::default()
        .prefix(prefix)
        .prefix_separator("__")
        .separator("__")
}

/// Plain variables set by hosting platforms, applied after the layered sources.
fn apply_platform_overrides(settings: &mut Settings) {
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }
    if let Ok(jwt_secret) = env::var("JWT_SECRET") {
        settings.jwt.secret = SecretString::new(jwt_secret.into_boxed_str());
    }
}

/// Layer `base.yml`, then `<APP_ENVIRONMENT>.yml`, then `POSTGRES__*` and
/// `APP__*` variables.
pub fn get_config() -> Result<Settings, ConfigError> {
    dotenv().ok();

    let directory = configuration_directory()?;
    let environment = Environment::from_env()?;

    let mut settings = Config::builder()
        .add_source(File::from(directory.join("base.yml")))
        .add_source(File::from(directory.join(format!("{}.yml", environment.as_str()))))
        .add_source(env_source("POSTGRES"))
        .add_source(env_source("APP"))
        .build()?
        .try_deserialize::<Settings>()?;

    apply_platform_overrides(&mut settings);
    Ok(settings)
}
