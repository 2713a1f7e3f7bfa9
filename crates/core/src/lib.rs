//! Core types and utilities for the ctb-web frontend.
//!
//! This crate is the leaf of the workspace: the domain types exchanged with
//! the backend, the error taxonomy, the cookie-backed token store and the
//! [`CtbWebApi`] capability trait with its offline variants. The remote
//! variant lives in `ctb-http`, the session state machine in `ctb-session`.

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod tracing;
pub mod types;

pub use api::{BrokenApi, CtbWebApi, DummyApi};
pub use config::WebConfig;
pub use cookies::{CookieJar, SameSite};
pub use error::{ApiError, ApiResult, StoreError};
pub use self::tracing::init_tracing;
pub use types::{ApiType, LoginData, RegistrationData, UserData};
