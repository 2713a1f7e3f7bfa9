//! The backend API capability and its offline variants.
//!
//! Exactly one implementation is active per process, selected once at
//! startup from [`crate::WebConfig`]. The stub and fixture variants live
//! here; the remote variant needs an HTTP stack and lives in `ctb-http`.

use crate::error::ApiResult;
use crate::types::{ApiType, LoginData, RegistrationData, UserData};
use async_trait::async_trait;

mod broken;
mod dummy;

pub use broken::BrokenApi;
pub use dummy::DummyApi;

/// The capability every API variant provides.
///
/// Result convention, uniform across variants: `Ok(None)` means "no such
/// user / no session / token rejected"; `Err` means a real failure the
/// caller must handle (transport, timeout, malformed payload, operation
/// unsupported by this variant).
#[async_trait]
pub trait CtbWebApi: Send + Sync {
    /// Which variant this is. Persisted so a variant change between
    /// sessions can be detected.
    fn api_type(&self) -> ApiType;

    /// Create an account. Errors surface directly to the caller.
    async fn register(&self, data: RegistrationData) -> ApiResult<()>;

    /// Exchange credentials for a token.
    async fn login(&self, data: LoginData) -> ApiResult<String>;

    /// Look up a user by id. `Ok(None)` is "not found", never an error.
    async fn get_user(&self, id: u32) -> ApiResult<Option<UserData>>;

    /// Look up a user by name. Declared for parity with the backend but
    /// deliberately unwired in the current variants; callers should treat
    /// [`crate::ApiError::Unimplemented`] as "feature unavailable here".
    async fn find_user(&self, name: &str) -> ApiResult<Option<UserData>>;

    /// Resolve the stored token to its user. `Ok(None)` when there is no
    /// token or the backend rejected it; transport failures propagate as
    /// errors instead of masquerading as "logged out".
    async fn get_me(&self) -> ApiResult<Option<UserData>>;
}
