//! Typed client for the JudgeFlow REST API.
//!
//! One async fn per endpoint. Every call goes through
//! [`AuthenticatedClient`], so bearer tokens and the single 401 refresh are
//! handled uniformly. Non-2xx statuses become [`ApiError::Status`] carrying
//! a static per-endpoint message.

mod endpoints;

pub use endpoints::paths;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::{MemorySessionStorage, ReqwestHttpClient};
use crate::auth::AuthenticatedClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::traits::{HttpClient, Method, Response, SessionStorage};

#[derive(Debug, Clone)]
pub struct JudgeApi {
    client: AuthenticatedClient,
    base_url: String,
}

/// Backend error bodies look like `{"error": "..."}` or `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl JudgeApi {
    /// Production client: reqwest transport, in-memory token storage.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_parts(
            Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)),
            Arc::new(MemorySessionStorage::new()),
            &config.api_base_url,
        )
    }

    pub fn with_parts(
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn SessionStorage>,
        base_url: &str,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client: AuthenticatedClient::new(http, storage, &base_url),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        self.client.storage()
    }

    /// True when an access token is held. Says nothing about its validity.
    pub fn has_session(&self) -> bool {
        self.storage().has_access_token()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        context: &'static str,
    ) -> ApiResult<Response> {
        let response = self
            .client
            .send(method, &self.url(path), body.as_deref())
            .await
            .map_err(|e| ApiError::from_transport(context, e))?;

        if response.is_success() {
            Ok(response)
        } else {
            tracing::warn!("{} {} failed with HTTP {}", method, path, response.status);
            Err(Self::status_error(&response, context))
        }
    }

    fn status_error(response: &Response, context: &'static str) -> ApiError {
        let detail = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|b| b.error.or(b.detail))
            .filter(|d| !d.trim().is_empty());
        ApiError::Status {
            context,
            status: response.status,
            detail,
        }
    }

    fn decode<T: DeserializeOwned>(response: &Response, context: &'static str) -> ApiResult<T> {
        response.json().map_err(|e| ApiError::Decode {
            context,
            reason: e.to_string(),
        })
    }

    fn encode<B: Serialize>(body: &B, context: &'static str) -> ApiResult<String> {
        serde_json::to_string(body).map_err(|e| ApiError::Decode {
            context,
            reason: e.to_string(),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> ApiResult<T> {
        let response = self.call(Method::Get, path, None, context).await?;
        Self::decode(&response, context)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> ApiResult<T> {
        let body = Self::encode(body, context)?;
        let response = self.call(Method::Post, path, Some(body), context).await?;
        Self::decode(&response, context)
    }

    /// POST with an empty JSON object as the body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> ApiResult<T> {
        let response = self
            .call(Method::Post, path, Some("{}".to_string()), context)
            .await?;
        Self::decode(&response, context)
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> ApiResult<T> {
        let response = self.call(Method::Delete, path, None, context).await?;
        Self::decode(&response, context)
    }
}
