use std::env;

use bank_common::Secret;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::ServerError;

const DEFAULT_BANK_HOST: &str = "127.0.0.1";
const DEFAULT_BANK_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BANK_HOST.to_string(),
            port: DEFAULT_BANK_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BANK_HOST").ok().unwrap_or_else(|| DEFAULT_BANK_HOST.into());
        let port = env::var("BANK_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BANK_PORT. {e} Using the default, {DEFAULT_BANK_PORT}, \
                         instead."
                    );
                    DEFAULT_BANK_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BANK_PORT);
        let database_url = env::var("BANK_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ BANK_DATABASE_URL is not set. Please set it to the URL for the account database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        Self { host, port, database_url, auth }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------

/// The authentication configuration is loaded once at startup and injected into the token issuer, so
/// that token operations never have to consult the environment themselves.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The symmetric secret used to sign and verify JWTs (HS256).
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Every \
             token issued will become invalid when the server restarts. DO NOT operate on production like this. \
             Set BANK_JWT_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect::<String>();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("BANK_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [BANK_JWT_SECRET]")))?;
        if secret.is_empty() {
            return Err(ServerError::ConfigurationError("BANK_JWT_SECRET must not be empty".to_string()));
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }
}
