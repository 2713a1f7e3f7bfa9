//! Failure-injecting stub variant.

use super::CtbWebApi;
use crate::error::{ApiError, ApiResult};
use crate::types::{ApiType, LoginData, RegistrationData, UserData};
use async_trait::async_trait;

/// Every operation fails unconditionally with [`ApiError::Broken`].
///
/// Useful for exercising error paths in the UI without a backend that can
/// be coaxed into failing on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenApi;

#[async_trait]
impl CtbWebApi for BrokenApi {
    fn api_type(&self) -> ApiType {
        ApiType::Broken
    }

    async fn register(&self, _data: RegistrationData) -> ApiResult<()> {
        Err(ApiError::Broken)
    }

    async fn login(&self, _data: LoginData) -> ApiResult<String> {
        Err(ApiError::Broken)
    }

    async fn get_user(&self, _id: u32) -> ApiResult<Option<UserData>> {
        Err(ApiError::Broken)
    }

    async fn find_user(&self, _name: &str) -> ApiResult<Option<UserData>> {
        Err(ApiError::Broken)
    }

    async fn get_me(&self) -> ApiResult<Option<UserData>> {
        Err(ApiError::Broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_operation_fails_unconditionally() {
        let api = BrokenApi;
        assert_eq!(api.api_type(), ApiType::Broken);

        let registration = RegistrationData {
            username: "anyone".into(),
            email: "anyone@email.com".into(),
            password: "hunter2".into(),
        };
        assert!(matches!(
            api.register(registration).await,
            Err(ApiError::Broken)
        ));

        let login = LoginData {
            username: "GamerDuck".into(),
            password: "password123".into(),
        };
        assert!(matches!(api.login(login).await, Err(ApiError::Broken)));
        assert!(matches!(api.get_user(1).await, Err(ApiError::Broken)));
        assert!(matches!(
            api.find_user("GamerDuck").await,
            Err(ApiError::Broken)
        ));
        assert!(matches!(api.get_me().await, Err(ApiError::Broken)));
    }
}
