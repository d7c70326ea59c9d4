//! Firebase project configuration
//!
//! Every option is read from the environment. Each variable is looked up
//! as `FIREBASE_*` first, then as the web-app spelling
//! `NEXT_PUBLIC_FIREBASE_*`, so one `.env` file can serve both.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{GuestbookError, Result};

/// Firebase web app configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    #[serde(rename = "databaseURL")]
    pub database_url: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

pub const API_KEY: &str = "FIREBASE_API_KEY";
pub const AUTH_DOMAIN: &str = "FIREBASE_AUTH_DOMAIN";
pub const DATABASE_URL: &str = "FIREBASE_DATABASE_URL";
pub const PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
pub const STORAGE_BUCKET: &str = "FIREBASE_STORAGE_BUCKET";
pub const MESSAGING_SENDER_ID: &str = "FIREBASE_MESSAGING_SENDER_ID";
pub const APP_ID: &str = "FIREBASE_APP_ID";

const WEB_PREFIX: &str = "NEXT_PUBLIC_";

impl FirebaseConfig {
    /// Load config from process environment variables.
    ///
    /// Fails with the name of the first missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| -> Result<String> {
            lookup(key)
                .or_else(|| lookup(&format!("{}{}", WEB_PREFIX, key)))
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GuestbookError::config(format!("{} not set", key)))
        };

        let config = Self {
            api_key: var(API_KEY)?,
            auth_domain: var(AUTH_DOMAIN)?,
            database_url: var(DATABASE_URL)?,
            project_id: var(PROJECT_ID)?,
            storage_bucket: var(STORAGE_BUCKET)?,
            messaging_sender_id: var(MESSAGING_SENDER_ID)?,
            app_id: var(APP_ID)?,
        };
        config.database_endpoint()?;
        Ok(config)
    }

    /// Parsed database URL. Only `http` and `https` are accepted.
    pub fn database_endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.database_url).map_err(|e| {
            GuestbookError::config(format!("{} is not a valid URL: {}", DATABASE_URL, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GuestbookError::config(format!(
                "{} must use http or https, got '{}'",
                DATABASE_URL, other
            ))),
        }
    }
}

/// Get the guestbook config directory path (~/.guestbook)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".guestbook"))
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.guestbook/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(()) => loaded_from.push(env_file.display().to_string()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found, using environment variables only");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}
