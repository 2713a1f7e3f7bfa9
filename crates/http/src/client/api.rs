//! [`CtbWebApi`] implementation over the backend HTTP contract.

use super::wire::has_sentinel;
use super::{transport_error, CtbClient};
use async_trait::async_trait;
use ctb_core::{ApiError, ApiResult, ApiType, CtbWebApi, LoginData, RegistrationData, UserData};
use reqwest::{header, Method};
use serde_json::Value;
use tracing::{debug, warn};

#[async_trait]
impl CtbWebApi for CtbClient {
    fn api_type(&self) -> ApiType {
        ApiType::Real
    }

    /// `POST {base}/register`. The backend answers with the
    /// `invalid-data` sentinel when the payload is rejected; any other
    /// 2xx body means the account was created.
    async fn register(&self, data: RegistrationData) -> ApiResult<()> {
        let response = self
            .request(Method::POST, "/register")
            .json(&data)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if has_sentinel(&body, "invalid-data") {
            return Err(ApiError::InvalidData);
        }
        if status.is_success() {
            debug!(username = %data.username, "registration accepted");
            Ok(())
        } else {
            Err(ApiError::Http {
                status: status.as_u16(),
                message: body,
            })
        }
    }

    /// `POST {base}/login`. Sentinel `invalid-credentials` rejects the
    /// attempt; otherwise the response must carry a `token` field, and a
    /// 2xx without one is a malformed success, not a login failure.
    async fn login(&self, data: LoginData) -> ApiResult<String> {
        let response = self
            .request(Method::POST, "/login")
            .json(&data)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if has_sentinel(&body, "invalid-credentials") {
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|err| ApiError::InvalidResponse(format!("login response: {err}")))?;
        match value.get("token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_owned()),
            None => Err(ApiError::InvalidResponse(
                "login response missing token field".into(),
            )),
        }
    }

    /// The backend has a lookup route, but this frontend never wired it.
    async fn get_user(&self, _id: u32) -> ApiResult<Option<UserData>> {
        Err(ApiError::Unimplemented("get_user"))
    }

    async fn find_user(&self, _name: &str) -> ApiResult<Option<UserData>> {
        Err(ApiError::Unimplemented("find_user"))
    }

    /// `GET {base}/users/me` with the stored token as a bearer header.
    /// No token means no request at all. A rejected token reads as
    /// `Ok(None)`; transport and server failures stay errors so "logged
    /// out" is never faked by a flaky network.
    async fn get_me(&self) -> ApiResult<Option<UserData>> {
        let Some(token) = self.jar().token() else {
            debug!("no stored token, skipping /users/me");
            return Ok(None);
        };

        let response = self
            .request(Method::GET, "/users/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            let user: UserData = serde_json::from_str(&body)
                .map_err(|err| ApiError::InvalidResponse(format!("users/me response: {err}")))?;
            return Ok(Some(user));
        }

        // The backend reports an unresolvable token as `not-found`, with
        // the status depending on its error plumbing. Treat any explicit
        // rejection as "no session".
        if has_sentinel(&body, "not-found") || matches!(status.as_u16(), 401 | 403 | 404) {
            warn!("stored token rejected by backend");
            return Ok(None);
        }

        Err(ApiError::Http {
            status: status.as_u16(),
            message: body,
        })
    }
}
