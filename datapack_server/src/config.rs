use std::env;

use chrono::Duration;
use dpg_common::{parse_boolean_flag, Secret};
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

const DEFAULT_DPG_HOST: &str = "127.0.0.1";
const DEFAULT_DPG_PORT: u16 = 8360;
const DEFAULT_TOKEN_VALIDITY: Duration = Duration::hours(24);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// When true, the server inserts the default data package catalog on startup if the catalog is empty.
    pub seed_packages: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DPG_HOST.to_string(),
            port: DEFAULT_DPG_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            seed_packages: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("DPG_HOST").ok().unwrap_or_else(|| DEFAULT_DPG_HOST.into());
        let port = env::var("DPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for DPG_PORT. {e} Using the default, {DEFAULT_DPG_PORT}, instead."
                    );
                    DEFAULT_DPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_DPG_PORT);
        let database_url = env::var("DPG_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ DPG_DATABASE_URL is not set. Please set it to the URL for the DataPack database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|| {
            warn!(
                "🪛️ DPG_AUTH_SECRET is not set. Using a random secret for this session. Access tokens will not \
                 survive a server restart."
            );
            AuthConfig::default()
        });
        let seed_packages = parse_boolean_flag(env::var("DPG_SEED_PACKAGES").ok(), false);
        Self { host, port, database_url, auth, seed_packages }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The secret used to sign customer access tokens.
    pub token_secret: Secret<String>,
    /// How long an issued access token stays valid.
    pub token_validity: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { token_secret: Secret::new(secret), token_validity: DEFAULT_TOKEN_VALIDITY }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Option<Self> {
        let secret = env::var("DPG_AUTH_SECRET").ok()?;
        let token_validity = env::var("DPG_TOKEN_VALIDITY_HOURS")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map(Duration::hours)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for DPG_TOKEN_VALIDITY_HOURS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_TOKEN_VALIDITY);
        Some(Self { token_secret: Secret::new(secret), token_validity })
    }
}
