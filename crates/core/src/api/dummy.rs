//! In-memory fixture variant for local development.

use super::CtbWebApi;
use crate::cookies::CookieJar;
use crate::error::{ApiError, ApiResult};
use crate::types::{ApiType, LoginData, RegistrationData, UserData};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// The token the fixture issues and accepts.
pub const DUMMY_TOKEN: &str = "dummy";

const FIXTURE_USERNAME: &str = "GamerDuck";
const FIXTURE_PASSWORD: &str = "password123";
const FIXTURE_USER_ID: u32 = 1;

/// A single-user fixture backend. Lets the rest of the application be
/// developed and tested without a live server: one hardcoded account,
/// registration that always succeeds, and token resolution against the
/// shared cookie jar.
#[derive(Debug, Clone)]
pub struct DummyApi {
    jar: Arc<CookieJar>,
}

impl DummyApi {
    pub fn new(jar: Arc<CookieJar>) -> Self {
        Self { jar }
    }

    fn fixture_user() -> UserData {
        UserData {
            id: FIXTURE_USER_ID,
            username: FIXTURE_USERNAME.to_owned(),
            email: Some("GamerDuck123@email.com".to_owned()),
        }
    }
}

#[async_trait]
impl CtbWebApi for DummyApi {
    fn api_type(&self) -> ApiType {
        ApiType::Dummy
    }

    async fn register(&self, data: RegistrationData) -> ApiResult<()> {
        info!(username = %data.username, "dummy registration accepted");
        Ok(())
    }

    async fn login(&self, data: LoginData) -> ApiResult<String> {
        if data.username == FIXTURE_USERNAME && data.password == FIXTURE_PASSWORD {
            Ok(DUMMY_TOKEN.to_owned())
        } else {
            Err(ApiError::InvalidCredentials)
        }
    }

    async fn get_user(&self, id: u32) -> ApiResult<Option<UserData>> {
        if id == FIXTURE_USER_ID {
            Ok(Some(Self::fixture_user()))
        } else {
            Ok(None)
        }
    }

    async fn find_user(&self, _name: &str) -> ApiResult<Option<UserData>> {
        Err(ApiError::Unimplemented("find_user"))
    }

    async fn get_me(&self) -> ApiResult<Option<UserData>> {
        if self.jar.token().as_deref() == Some(DUMMY_TOKEN) {
            self.get_user(FIXTURE_USER_ID).await
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> DummyApi {
        DummyApi::new(Arc::new(CookieJar::in_memory()))
    }

    #[tokio::test]
    async fn login_accepts_only_the_fixture_credentials() {
        let api = fixture();
        let token = api
            .login(LoginData {
                username: "GamerDuck".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();
        assert_eq!(token, DUMMY_TOKEN);

        let rejected = api
            .login(LoginData {
                username: "GamerDuck".into(),
                password: "password124".into(),
            })
            .await;
        assert!(matches!(rejected, Err(ApiError::InvalidCredentials)));

        let rejected = api
            .login(LoginData {
                username: "SomeoneElse".into(),
                password: "password123".into(),
            })
            .await;
        assert!(matches!(rejected, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn register_always_succeeds() {
        let api = fixture();
        let outcome = api
            .register(RegistrationData {
                username: "NewDuck".into(),
                email: "new@email.com".into(),
                password: "secret".into(),
            })
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn get_user_knows_exactly_one_user() {
        let api = fixture();
        let user = api.get_user(1).await.unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "GamerDuck");
        assert_eq!(user.email.as_deref(), Some("GamerDuck123@email.com"));

        assert_eq!(api.get_user(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_user_is_deliberately_unsupported() {
        let api = fixture();
        assert!(matches!(
            api.find_user("GamerDuck").await,
            Err(ApiError::Unimplemented("find_user"))
        ));
    }

    #[tokio::test]
    async fn get_me_resolves_iff_the_stored_token_matches() {
        let jar = Arc::new(CookieJar::in_memory());
        let api = DummyApi::new(jar.clone());

        assert_eq!(api.get_me().await.unwrap(), None);

        jar.set_token(Some(DUMMY_TOKEN)).unwrap();
        let me = api.get_me().await.unwrap().unwrap();
        assert_eq!(me.id, 1);
        assert_eq!(me.username, "GamerDuck");

        jar.set_token(Some("stale")).unwrap();
        assert_eq!(api.get_me().await.unwrap(), None);
    }
}
