//! One-shot API variant selection.

use crate::client::CtbClient;
use ctb_core::{ApiError, ApiType, BrokenApi, CookieJar, CtbWebApi, DummyApi, WebConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Construct the active API variant from configuration.
///
/// Called once at startup; the returned handle is the only API the process
/// talks to for its whole lifetime.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when the `real` variant is selected
/// with an unusable base URL.
pub fn select_api(config: &WebConfig, jar: Arc<CookieJar>) -> Result<Arc<dyn CtbWebApi>, ApiError> {
    let api: Arc<dyn CtbWebApi> = match config.api_type {
        ApiType::Broken => Arc::new(BrokenApi),
        ApiType::Dummy => Arc::new(DummyApi::new(jar)),
        ApiType::Real => Arc::new(
            CtbClient::builder()
                .base_url(&config.api_base)
                .jar(jar)
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
        ),
    };
    info!(api_type = %api.api_type(), "selected api variant");
    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_the_configured_variant() {
        let jar = Arc::new(CookieJar::in_memory());

        let config = WebConfig::default();
        let api = select_api(&config, jar.clone()).unwrap();
        assert_eq!(api.api_type(), ApiType::Dummy);

        let config = WebConfig {
            api_type: ApiType::Broken,
            ..WebConfig::default()
        };
        let api = select_api(&config, jar.clone()).unwrap();
        assert_eq!(api.api_type(), ApiType::Broken);

        let config = WebConfig {
            api_type: ApiType::Real,
            api_base: "https://api.ctb.example/".to_owned(),
            ..WebConfig::default()
        };
        let api = select_api(&config, jar).unwrap();
        assert_eq!(api.api_type(), ApiType::Real);
    }
}
