//! Domain types exchanged with the backend API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user as reported by the backend.
///
/// Only API variants produce these; nothing else in the workspace constructs
/// one ad hoc. `id` and `username` are mandatory on the wire, `email` may be
/// withheld by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Which API variant is active for this deployment.
///
/// Fixed at configuration time; there is no runtime switching. The last
/// active variant is persisted alongside the token so a redeploy onto a
/// different variant can be detected and the stale token discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    /// In-memory fixture backend for local development.
    Dummy,
    /// The remote HTTP backend.
    Real,
    /// Failure-injecting stub, every call errors.
    Broken,
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dummy => "dummy",
            Self::Real => "real",
            Self::Broken => "broken",
        };
        f.write_str(s)
    }
}

impl FromStr for ApiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dummy" => Ok(Self::Dummy),
            "real" => Ok(Self::Real),
            "broken" => Ok(Self::Broken),
            other => Err(format!("unknown api type: {other}")),
        }
    }
}

/// Payload for [`crate::CtbWebApi::register`]. Transient, never persisted.
#[derive(Clone, Serialize)]
pub struct RegistrationData {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Payload for [`crate::CtbWebApi::login`]. Transient, never persisted.
#[derive(Clone, Serialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

// Passwords stay out of logs, so Debug is written by hand.
impl fmt::Debug for RegistrationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationData")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_type_round_trips_through_str() {
        for api_type in [ApiType::Dummy, ApiType::Real, ApiType::Broken] {
            assert_eq!(api_type.to_string().parse::<ApiType>(), Ok(api_type));
        }
        assert!("staging".parse::<ApiType>().is_err());
    }

    #[test]
    fn userdata_requires_id_and_username() {
        let full: UserData =
            serde_json::from_str(r#"{"id":1,"username":"GamerDuck","email":null}"#).unwrap();
        assert_eq!(full.id, 1);
        assert_eq!(full.username, "GamerDuck");
        assert_eq!(full.email, None);

        assert!(serde_json::from_str::<UserData>(r#"{"id":1}"#).is_err());
        assert!(serde_json::from_str::<UserData>(r#"{"username":"x"}"#).is_err());
    }

    #[test]
    fn userdata_tolerates_missing_email_field() {
        let user: UserData = serde_json::from_str(r#"{"id":2,"username":"other"}"#).unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn debug_never_leaks_passwords() {
        let login = LoginData {
            username: "GamerDuck".into(),
            password: "password123".into(),
        };
        let rendered = format!("{login:?}");
        assert!(rendered.contains("GamerDuck"));
        assert!(!rendered.contains("password123"));

        let registration = RegistrationData {
            username: "GamerDuck".into(),
            email: "GamerDuck123@email.com".into(),
            password: "password123".into(),
        };
        let rendered = format!("{registration:?}");
        assert!(!rendered.contains("password123"));
    }
}
