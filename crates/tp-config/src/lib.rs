//! # tp-config
//!
//! Layered runtime configuration: built-in defaults, an optional
//! `trailpost.toml` next to the binary, then `TRAILPOST__`-prefixed
//! environment variables (e.g. `TRAILPOST__SERVER__PORT=9000`).

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens. Never logged; `Debug` prints a
    /// redaction marker.
    pub jwt_secret: SecretString,
    pub token_ttl_minutes: i64,
    pub issuer: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg: Self = defaults()?
            .add_source(File::with_name("trailpost").required(false))
            .add_source(Environment::with_prefix("TRAILPOST").separator("__"))
            .build()?
            .try_deserialize()?;

        if cfg.auth.jwt_secret_is_default() {
            tracing::warn!("auth.jwt_secret is still the built-in default; set TRAILPOST__AUTH__JWT_SECRET");
        }
        Ok(cfg)
    }
}

impl AuthConfig {
    fn jwt_secret_is_default(&self) -> bool {
        use secrecy::ExposeSecret;
        self.jwt_secret.expose_secret() == DEFAULT_JWT_SECRET
    }
}

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "sqlite:trailpost.db")?
        .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
        .set_default("auth.token_ttl_minutes", 60)?
        .set_default("auth.issuer", "trailpost")
}
