use std::env;
use std::path::PathBuf;
use std::time::Duration;

use auth::HashCost;
use auth::TokenLifetimes;
use auth::TokenSecrets;
use axum::http::HeaderValue;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    pub avatar: AvatarConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Browser origins allowed to call the API with credentials
    /// (e.g. `https://app.example.com`). Empty means no cross-origin access.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Signing secrets and lifetimes of access and refresh tokens.
///
/// The secrets have no defaults and must come from the environment
/// (`JWT__ACCESS_SECRET`, `JWT__REFRESH_SECRET`) or a deployment-specific file.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: i64,
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_ttl_secs: i64,
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AvatarConfig {
    /// PNG given to every new user.
    pub default_path: PathBuf,
}

/// Shortest accepted signing secret, the HS256 key size.
const MIN_SECRET_BYTES: usize = 32;

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_ttl_secs() -> i64 {
    15 * 60
}

fn default_refresh_ttl_secs() -> i64 {
    7 * 24 * 60 * 60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__ACCESS_SECRET, SERVER__HTTP_PORT, etc.);
    ///    SERVER__ALLOWED_ORIGINS takes a comma-separated list
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Any source that fails to parse, a missing key, or a value rejected by
    /// [`Config::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.access_secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.access_secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        if self.jwt.refresh_secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        if self.jwt.access_secret == self.jwt.refresh_secret {
            return Err(ConfigError::Message(
                "jwt.access_secret and jwt.refresh_secret must differ".into(),
            ));
        }
        if self.jwt.access_ttl_secs <= 0 || self.jwt.refresh_ttl_secs <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".into(),
            ));
        }
        if self.jwt.refresh_ttl_secs < self.jwt.access_ttl_secs {
            return Err(ConfigError::Message(
                "jwt.refresh_ttl_secs is shorter than jwt.access_ttl_secs".into(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs must be positive".into(),
            ));
        }
        for origin in &self.server.allowed_origins {
            let well_formed = (origin.starts_with("https://") || origin.starts_with("http://"))
                && !origin.ends_with('/')
                && HeaderValue::from_str(origin).is_ok();
            if !well_formed {
                return Err(ConfigError::Message(format!(
                    "server.allowed_origins entry {origin:?} is not a scheme://host[:port] origin"
                )));
            }
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".into(),
            ));
        }

        Ok(())
    }

    pub fn token_secrets(&self) -> TokenSecrets {
        TokenSecrets {
            access: self.jwt.access_secret.as_bytes().to_vec(),
            refresh: self.jwt.refresh_secret.as_bytes().to_vec(),
        }
    }

    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            access: chrono::Duration::seconds(self.jwt.access_ttl_secs),
            refresh: chrono::Duration::seconds(self.jwt.refresh_ttl_secs),
        }
    }

    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.password.memory_kib,
            iterations: self.password.iterations,
            parallelism: self.password.parallelism,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Allowed origins as header values; entries [`Config::validate`] would
    /// reject are skipped.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.server
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }
}
