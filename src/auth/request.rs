//! Bearer-token request wrapper with a single refresh-and-retry on 401.
//!
//! Flow for every request:
//! 1. attach `Authorization: Bearer <access>` when an access token is stored
//! 2. on a 401 (with a token attached) POST the refresh token to
//!    `{base}/accounts/token/refresh/`
//! 3. on success store the new access token and re-issue the request once
//! 4. on any refresh failure clear both tokens and hand back the original 401
//!
//! There is never a second refresh or a second retry for the same call.

use std::sync::Arc;

use super::tokens::{RefreshResponse, Tokens};
use crate::traits::{Headers, HttpClient, HttpError, Method, Response, SessionStorage};

const REFRESH_PATH: &str = "/accounts/token/refresh/";

#[derive(Clone)]
pub struct AuthenticatedClient {
    http: Arc<dyn HttpClient>,
    storage: Arc<dyn SessionStorage>,
    refresh_url: String,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("refresh_url", &self.refresh_url)
            .field("has_access_token", &self.storage.has_access_token())
            .finish()
    }
}

impl AuthenticatedClient {
    /// `base_url` is the API origin, e.g. `http://localhost:8000/api`.
    pub fn new(
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn SessionStorage>,
        base_url: &str,
    ) -> Self {
        Self {
            http,
            storage,
            refresh_url: format!("{}{}", base_url.trim_end_matches('/'), REFRESH_PATH),
        }
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.send(Method::Get, url, None).await
    }

    pub async fn post(&self, url: &str, body: &str) -> Result<Response, HttpError> {
        self.send(Method::Post, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<Response, HttpError> {
        self.send(Method::Delete, url, None).await
    }

    /// Issue one logical request. Non-2xx statuses come back as `Ok`.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        let token = self.storage.access_token();
        tracing::debug!("{} {}", method, url);

        let response = self
            .http
            .send(method, url, body, &Self::headers(token.as_deref()))
            .await?;

        if !response.is_unauthorized() || token.is_none() {
            return Ok(response);
        }

        tracing::info!("{} {} returned 401, attempting token refresh", method, url);
        match self.refresh().await {
            Some(new_access) => {
                tracing::debug!("Retrying {} {} with refreshed token", method, url);
                self.http
                    .send(method, url, body, &Self::headers(Some(&new_access)))
                    .await
            }
            None => {
                tracing::warn!("Token refresh failed, clearing stored credentials");
                self.storage.clear();
                Ok(response)
            }
        }
    }

    /// POST the refresh token. Returns the new access token on success.
    async fn refresh(&self) -> Option<String> {
        let refresh = self.storage.refresh_token()?;
        let body = serde_json::json!({ "refresh": refresh }).to_string();

        let response = match self
            .http
            .post(&self.refresh_url, &body, &Self::headers(None))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Token refresh request failed: {}", e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!("Token refresh rejected with HTTP {}", response.status);
            return None;
        }

        let parsed: RefreshResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Token refresh response unreadable: {}", e);
                return None;
            }
        };
        if parsed.access.is_empty() {
            return None;
        }

        match parsed.refresh {
            Some(rotated) => self.storage.store(&Tokens {
                access: Some(parsed.access.clone()),
                refresh: Some(rotated),
            }),
            None => self.storage.set_access_token(&parsed.access),
        }
        tracing::info!("Access token refreshed");
        Some(parsed.access)
    }

    fn headers(token: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }
}
