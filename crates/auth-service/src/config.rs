//! Configuration for the auth service

use serde::Deserialize;

use tracer_auth_core::{AuthError, TokenConfig};

use crate::providers::AlumniMode;

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    pub alumni: AlumniConfig,
    pub respondent: RespondentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlumniConfig {
    pub base_url: String,
    /// Which response shape the deployed provider speaks.
    pub mode: AlumniMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespondentConfig {
    pub base_url: String,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `tracer-auth.toml`
    /// and `TRACER`-prefixed environment variables, in that order.
    pub fn load() -> Result<Self, AuthError> {
        Self::build().map_err(|e| AuthError::Config(e.to_string()))
    }

    fn build() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("http.bind_address", "127.0.0.1:8080")?
            .set_default("database.url", "sqlite://tracer_auth.db?mode=rwc")?
            .set_default("token.secret", "")?
            .set_default("token.ttl_seconds", 1800)?
            .set_default("providers.alumni.base_url", "")?
            .set_default("providers.alumni.mode", "check")?
            .set_default("providers.respondent.base_url", "")?
            .add_source(config::File::with_name("tracer-auth").required(false))
            .add_source(
                config::Environment::with_prefix("TRACER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
