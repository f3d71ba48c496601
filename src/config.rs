//! Application configuration loaded from environment variables.
//!
//! `variables.env` and `.env` are read first when present, so local
//! development can keep the store connection string out of the shell.

use std::env;

const DEFAULT_PORT: u16 = 3000;

/// Which document store backs the API, parsed from the `DATABASE` connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// In-process store, lost on restart (`memory://`)
    Memory,
    /// Firestore in the given GCP project (`firestore://<project-id>`)
    Firestore { project_id: String },
}

impl StoreUrl {
    /// Parse a connection string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| ConfigError::Invalid("DATABASE", raw.to_string()))?;

        match scheme {
            "memory" if rest.is_empty() => Ok(StoreUrl::Memory),
            "firestore" => {
                let project_id = rest.trim_end_matches('/');
                if project_id.is_empty() || project_id.contains('/') {
                    return Err(ConfigError::Invalid("DATABASE", raw.to_string()));
                }
                Ok(StoreUrl::Firestore {
                    project_id: project_id.to_string(),
                })
            }
            _ => Err(ConfigError::Invalid("DATABASE", raw.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Document store connection
    pub database: StoreUrl,
    /// Directory served under `/public`
    pub public_dir: String,
    /// Landing page served at `/`
    pub index_page: String,
    /// Allowed CORS origins (empty allows any origin)
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: StoreUrl::Memory,
            public_dir: "public".to_string(),
            index_page: "views/index.html".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::from_filename("variables.env").ok();
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database = match env::var("DATABASE") {
            Ok(raw) => StoreUrl::parse(&raw)?,
            Err(_) => {
                tracing::warn!("DATABASE not set, using in-memory store");
                StoreUrl::Memory
            }
        };

        Ok(Self {
            port,
            database,
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            index_page: env::var("INDEX_PAGE").unwrap_or_else(|_| "views/index.html".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
