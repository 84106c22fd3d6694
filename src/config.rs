use std::{env, path::Path};

use tracing::debug;

/// Environment variable holding the listen address
pub const LISTEN_VAR: &str = "PAGING_LISTEN";
/// Listen address when [`LISTEN_VAR`] is unset or blank
pub const DEFAULT_LISTEN: &str = "[::]:3000";

/// Settings of the listing server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the http listener binds to
    pub listen: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { listen: DEFAULT_LISTEN.to_string() }
    }
}

impl Config {
    /// Load `.env` from the working directory or its parents, then read the environment
    #[must_use]
    pub fn load() -> Self {
        Self::after_dotenv(dotenvy::dotenv().map(|_| ()))
    }

    /// Load the env file at `path`, then read the environment.
    ///
    /// Variables already set in the process win over the file.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        Self::after_dotenv(dotenvy::from_path(path))
    }

    fn after_dotenv(loaded: Result<(), dotenvy::Error>) -> Self {
        if let Err(e) = loaded {
            debug!(error = %e, "no env file loaded");
        }
        Self::from_env()
    }

    /// Read settings from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults
    #[must_use]
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let listen = lookup(LISTEN_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        Self { listen }
    }
}
