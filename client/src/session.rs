//! In-process session state with coalesced refresh
//!
//! Multiple in-flight calls can fail with 401 at the same moment. Only one
//! of them may perform the network refresh; the rest wait on the gate and
//! reuse the replacement token instead of issuing parallel refresh calls.

use std::future::Future;
use tokio::sync::{Mutex, RwLock};

use crate::error::ClientError;
use crate::storage::StoredTokens;

/// Cached token pair plus the refresh gate
pub struct SessionState {
    tokens: RwLock<Option<StoredTokens>>,
    refresh_gate: Mutex<()>,
}

impl SessionState {
    /// Create session state seeded from durable storage
    pub fn new(initial: Option<StoredTokens>) -> Self {
        Self {
            tokens: RwLock::new(initial),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Current access token, if logged in
    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access_token.clone())
    }

    /// Current refresh token, if logged in
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.refresh_token.clone())
    }

    /// Whether both tokens are present
    pub async fn has_tokens(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Replace the whole pair (login, logout, forced re-login)
    pub async fn set(&self, tokens: Option<StoredTokens>) {
        *self.tokens.write().await = tokens;
    }

    /// Swap in a replacement access token, keeping the refresh token
    pub async fn set_access_token(&self, access_token: String) {
        if let Some(tokens) = self.tokens.write().await.as_mut() {
            tokens.access_token = access_token;
        }
    }

    /// Coalesced token refresh
    ///
    /// `stale_access` is the access token the caller just failed with.
    /// Exactly one caller runs `do_refresh`; callers that arrive while a
    /// refresh is in flight wait on the gate, observe that the cached token
    /// already changed, and return it without a second network call.
    pub async fn refresh_with<F, Fut>(
        &self,
        stale_access: &str,
        do_refresh: F,
    ) -> Result<String, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ClientError>>,
    {
        let _guard = self.refresh_gate.lock().await;

        // A concurrent caller may have refreshed while we waited
        if let Some(current) = self.access_token().await {
            if current != stale_access {
                tracing::debug!("reusing access token refreshed by a concurrent call");
                return Ok(current);
            }
        }

        let new_access = do_refresh().await?;
        self.set_access_token(new_access.clone()).await;
        Ok(new_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn seeded() -> SessionState {
        SessionState::new(Some(StoredTokens {
            access_token: "stale".to_string(),
            refresh_token: "rt".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_refresh_replaces_access_token() {
        let session = seeded();

        let token = session
            .refresh_with("stale", || async { Ok("fresh".to_string()) })
            .await
            .unwrap();

        assert_eq!(token, "fresh");
        assert_eq!(session.access_token().await, Some("fresh".to_string()));
        // Refresh token untouched
        assert_eq!(session.refresh_token().await, Some("rt".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_coalesce() {
        let session = Arc::new(seeded());
        let calls = Arc::new(AtomicUsize::new(0));

        let refresh = |label: &'static str| {
            let session = session.clone();
            let calls = calls.clone();
            async move {
                session
                    .refresh_with("stale", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(format!("fresh-{}", label))
                    })
                    .await
                    .unwrap()
            }
        };

        let (a, b) = tokio::join!(refresh("a"), refresh("b"));

        // Only one network refresh happened, and both callers got its result
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_already_replaced_token_skips_refresh() {
        let session = seeded();
        session.set_access_token("fresh".to_string()).await;

        // The caller failed with the old token, but a replacement exists
        let token = session
            .refresh_with("stale", || async {
                panic!("refresh must not run when the token already changed")
            })
            .await
            .unwrap();

        assert_eq!(token, "fresh");
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates() {
        let session = seeded();

        let result = session
            .refresh_with("stale", || async { Err(ClientError::Unauthenticated) })
            .await;

        assert!(matches!(result, Err(ClientError::Unauthenticated)));
        // The stale token is left in place for the caller to clear
        assert_eq!(session.access_token().await, Some("stale".to_string()));
    }
}
