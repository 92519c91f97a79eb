//! Session-aware API client
//!
//! Wraps `reqwest` with the session lifecycle: register/login cache the
//! token pair durably, protected calls carry the access token, and a 401
//! triggers at most one silent refresh-and-replay per call.

use reqwest::{Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::{AuthPayload, NewTaskPayload, RefreshPayload, Task, UpdateTaskPayload};
use crate::session::SessionState;
use crate::storage::{StoredTokens, TokenStore};

/// Every outbound call is bounded; a hung server fails the call closed
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the TaskBoard API with transparent session renewal
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    session: SessionState,
}

impl ApiClient {
    /// Create a client against a base URL, resuming any stored session
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let initial = store.load()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            session: SessionState::new(initial),
        })
    }

    /// Whether a token pair is currently cached
    pub async fn is_authenticated(&self) -> bool {
        self.session.has_tokens().await
    }

    /// Register a new account and open a session
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let payload: AuthPayload = Self::check_status(response).await?.json().await?;
        self.adopt_session(&payload).await?;
        Ok(payload)
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let payload: AuthPayload = Self::check_status(response).await?.json().await?;
        self.adopt_session(&payload).await?;
        Ok(payload)
    }

    /// Log out: revoke the refresh token server-side and drop local state
    ///
    /// The cached tokens are cleared even when the server call fails, so a
    /// logout always forces re-login locally.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = match self.session.refresh_token().await {
            Some(refresh_token) => {
                let response = self
                    .http
                    .post(self.url("/auth/logout"))
                    .json(&serde_json::json!({"refreshToken": refresh_token}))
                    .send()
                    .await;
                match response {
                    Ok(r) => Self::check_status(r).await.map(|_| ()),
                    Err(e) => Err(ClientError::Http(e)),
                }
            }
            None => Ok(()),
        };

        self.clear_session().await;
        result
    }

    /// Resolve the session state on process start
    ///
    /// With a cached pair, performs one lightweight authenticated probe; if
    /// that is rejected, attempts a single refresh before giving up. The
    /// returned flag is definitive: render protected views only when true.
    pub async fn startup_check(&self) -> Result<bool, ClientError> {
        if !self.session.has_tokens().await {
            return Ok(false);
        }

        match self.send_protected(Method::GET, "/tasks", None).await {
            Ok(_) => Ok(true),
            Err(ClientError::Unauthenticated) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List the caller's tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.send_protected(Method::GET, "/tasks", None).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single task
    pub async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        let response = self
            .send_protected(Method::GET, &format!("/tasks/{}", id), None)
            .await?;
        Ok(response.json().await?)
    }

    /// Create a task
    pub async fn create_task(&self, payload: &NewTaskPayload) -> Result<Task, ClientError> {
        let body = serde_json::to_value(payload)?;
        let response = self
            .send_protected(Method::POST, "/tasks", Some(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Partially update a task
    pub async fn update_task(
        &self,
        id: Uuid,
        payload: &UpdateTaskPayload,
    ) -> Result<Task, ClientError> {
        let body = serde_json::to_value(payload)?;
        let response = self
            .send_protected(Method::PUT, &format!("/tasks/{}", id), Some(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Delete a task
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_protected(Method::DELETE, &format!("/tasks/{}", id), None)
            .await?;
        Ok(())
    }

    /// Issue a protected call with the single-retry interceptor
    ///
    /// On a 401 the call refreshes (coalesced with any concurrent failures)
    /// and replays exactly once. A second 401 is returned as-is; a failed
    /// refresh clears the cached tokens and surfaces the original failure.
    async fn send_protected(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let access = self
            .session
            .access_token()
            .await
            .ok_or(ClientError::Unauthenticated)?;

        let response = self.execute(method.clone(), path, body.as_ref(), &access).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response).await;
        }

        let new_access = match self.refresh_access(&access).await {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!("silent refresh failed: {}", e);
                self.clear_session().await;
                return Err(ClientError::Unauthenticated);
            }
        };

        let retried = self.execute(method, path, body.as_ref(), &new_access).await?;
        Self::check_status(retried).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        access_token: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(access_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Refresh the access token, coalescing concurrent attempts
    async fn refresh_access(&self, stale_access: &str) -> Result<String, ClientError> {
        let new_access = self
            .session
            .refresh_with(stale_access, || self.perform_refresh())
            .await?;

        // Persist the replacement so a restart resumes with a live token
        if let Some(refresh_token) = self.session.refresh_token().await {
            if let Err(e) = self.store.save(&StoredTokens {
                access_token: new_access.clone(),
                refresh_token,
            }) {
                tracing::warn!("failed to persist refreshed token: {}", e);
            }
        }

        Ok(new_access)
    }

    async fn perform_refresh(&self) -> Result<String, ClientError> {
        let refresh_token = self
            .session
            .refresh_token()
            .await
            .ok_or(ClientError::Unauthenticated)?;

        tracing::debug!("access token rejected, attempting silent refresh");

        let response = self
            .http
            .post(self.url("/auth/refresh-token"))
            .json(&serde_json::json!({"refreshToken": refresh_token}))
            .send()
            .await?;

        let payload: RefreshPayload = Self::check_status(response).await?.json().await?;
        Ok(payload.access_token)
    }

    async fn adopt_session(&self, payload: &AuthPayload) -> Result<(), ClientError> {
        let tokens = StoredTokens {
            access_token: payload.access_token.clone(),
            refresh_token: payload.refresh_token.clone(),
        };
        self.store.save(&tokens)?;
        self.session.set(Some(tokens)).await;
        Ok(())
    }

    async fn clear_session(&self) {
        self.session.set(None).await;
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear stored tokens: {}", e);
        }
    }

    /// Map non-success statuses to client errors
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthenticated);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    #[tokio::test]
    async fn test_new_client_resumes_stored_session() {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save(&StoredTokens {
                access_token: "at".to_string(),
                refresh_token: "rt".to_string(),
            })
            .unwrap();

        let client = ApiClient::new("http://localhost:8080", store).unwrap();
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_new_client_without_stored_session() {
        let client = ApiClient::new(
            "http://localhost:8080/",
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();

        assert!(!client.is_authenticated().await);
        // Trailing slash is trimmed so paths join cleanly
        assert_eq!(client.url("/tasks"), "http://localhost:8080/tasks");
    }

    #[tokio::test]
    async fn test_protected_call_without_session_is_unauthenticated() {
        let client = ApiClient::new(
            "http://localhost:8080",
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();

        let result = client.list_tasks().await;
        assert!(matches!(result, Err(ClientError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_startup_check_without_tokens_is_false() {
        let client = ApiClient::new(
            "http://localhost:8080",
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();

        assert!(!client.startup_check().await.unwrap());
    }
}
