//! Cookie-equivalent persistence for the token and API-variant marker.
//!
//! The browser original kept both values in real cookies. Here they live in
//! a small JSON jar, either purely in memory or flushed to disk on every
//! write so they survive a restart the way a cookie survives a page reload.
//! Reads and writes are synchronous; there is exactly one writer per event
//! turn so a plain mutex suffices.

use crate::error::StoreError;
use crate::types::ApiType;
use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Cookie slot holding the authentication token.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie slot holding the last active API variant.
pub const API_TYPE_COOKIE: &str = "apiType";

/// Cross-site policy recorded with every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Slots expire 90 days after the last write, matching the original cookie
/// max-age.
fn max_age() -> Duration {
    Duration::days(90)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieEntry {
    value: String,
    same_site: SameSite,
    expires_at: DateTime<Utc>,
}

impl CookieEntry {
    fn fresh(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            same_site: SameSite::Strict,
            expires_at: Utc::now() + max_age(),
        }
    }

    fn expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// The jar itself. Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct CookieJar {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, CookieEntry>>,
}

impl CookieJar {
    /// A volatile jar. Used by tests and anywhere durability is unwanted.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A jar backed by a JSON file. The file is loaded eagerly; a missing
    /// or unreadable file degrades to an empty jar rather than failing
    /// startup, the same way a browser with cleared cookies just starts
    /// logged out.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "corrupt cookie jar, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable cookie jar, starting empty");
                HashMap::new()
            }
        };
        Self {
            path: Some(path),
            entries: Mutex::new(entries),
        }
    }

    /// The platform default jar location.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("rs", "ctb", "ctb-web")
            .map(|dirs| dirs.data_dir().join("cookies.json"))
            .unwrap_or_else(|| PathBuf::from("./cookies.json"))
    }

    fn get(&self, name: &str) -> Option<String> {
        let entries = self.entries.lock().expect("cookie jar lock");
        let entry = entries.get(name)?;
        if entry.expired() {
            debug!(cookie = name, "cookie expired");
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, name: &str, value: Option<&str>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("cookie jar lock");
        match value {
            Some(value) => {
                entries.insert(name.to_owned(), CookieEntry::fresh(value));
            }
            None => {
                entries.remove(name);
            }
        }
        if let Some(path) = &self.path {
            flush(path, &entries)?;
        }
        Ok(())
    }

    /// The stored authentication token, if any non-expired one exists.
    /// No validation happens here: a present token only means "believed
    /// authenticated" until the backend confirms it.
    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_COOKIE)
    }

    /// Store or clear the token. Accepts any string; durable immediately.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), StoreError> {
        self.set(TOKEN_COOKIE, token)
    }

    /// The API variant the stored token was obtained from.
    pub fn api_type_marker(&self) -> Option<ApiType> {
        let raw = self.get(API_TYPE_COOKIE)?;
        match raw.parse() {
            Ok(api_type) => Some(api_type),
            Err(err) => {
                warn!(%err, "discarding unparseable apiType cookie");
                None
            }
        }
    }

    /// Record the active API variant.
    pub fn set_api_type_marker(&self, api_type: ApiType) -> Result<(), StoreError> {
        self.set(API_TYPE_COOKIE, Some(&api_type.to_string()))
    }
}

// Writes go through a temp file so a crash mid-write cannot corrupt the jar.
fn flush(path: &Path, entries: &HashMap<String, CookieEntry>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, raw)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
