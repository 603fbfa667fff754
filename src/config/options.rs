// src/config/options.rs
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use super::env_file;
use crate::error::{ExportError, Result};

/// Login credentials. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub login_page_url: String,
    pub login_submit_url: String,
    pub export_url: String,
    pub credentials: Credentials,
    pub archive_path: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    pub fn default_archive_path() -> PathBuf {
        PathBuf::from(RESOURCES_DIR).join(ARCHIVE_FILE)
    }

    /// Process environment first, then `config.env` in the working directory.
    pub fn from_env() -> Result<Self> {
        Self::from_env_file(Path::new(ENV_FILE))
    }

    pub fn from_env_file(path: &Path) -> Result<Self> {
        let file = env_file::load(path).map_err(|e| {
            loge!("config: cannot read {}: {}", path.display(), e);
            ExportError::ConfigMissing(vec![format!("{} (unreadable: {e})", path.display())])
        })?;
        Self::resolve(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        Self::resolve(|key| map.get(key).cloned())
    }

    /// Build settings from a raw lookup. Each name is tried with the
    /// `FROTA162_` prefix first, then bare. Blank values count as missing.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| {
            [format!("{ENV_PREFIX}{name}"), name.to_string()]
                .iter()
                .filter_map(|k| lookup(k.as_str()))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        let mut require = |name: &str| {
            get(name).unwrap_or_else(|| {
                missing.push(name.to_string());
                String::new()
            })
        };

        // Credentials are checked first so the message leads with them
        let username = require("USERNAME");
        let password = require("PASSWORD");
        let login_page_url = require("LOGIN_URL");
        let export_url = require("NOTIFICATIONS_EXPORT_URL");

        if !missing.is_empty() {
            return Err(ExportError::ConfigMissing(missing));
        }

        let login_submit_url = get("LOGIN_SUBMIT_URL").unwrap_or_else(|| login_page_url.clone());

        let timeout = match get("HTTP_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ExportError::ConfigMissing(vec![format!(
                        "HTTP_TIMEOUT_SECS (not a positive number: {v})"
                    )]));
                }
            },
        };

        Ok(Self {
            login_page_url,
            login_submit_url,
            export_url,
            credentials: Credentials { username, password },
            archive_path: Self::default_archive_path(),
            timeout,
        })
    }
}
