//! Session management
//!
//! A session is a [`SessionRecord`] cached under `sess:<id>` for a fixed
//! lifetime. The cookie only carries the id; the cache decides whether the
//! session is still valid.

use axum::http::{HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::cache::SessionStore;
use crate::auth::cookie::{CookieSettings, SessionId};
use crate::auth::models::SessionRecord;
use crate::config::SessionConfig;
use crate::error::{Error, Result};

/// Issues, resolves and destroys sessions against a [`SessionStore`]
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    cookie: CookieSettings,
}

impl SessionManager {
    /// Create a session manager backed by `store`
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        let ttl = config.ttl();
        Self {
            store,
            ttl,
            cookie: CookieSettings {
                name: config.cookie_name.clone(),
                max_age: ttl,
                secure: config.secure_cookie,
            },
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The session id presented by the request, if it carries a well-formed one
    pub fn session_id(&self, headers: &HeaderMap) -> Option<SessionId> {
        self.cookie.read(headers)
    }

    /// Bind `identity` to a fresh session id.
    ///
    /// Any session the request already carried is dropped first, so a login
    /// always rotates the id.
    pub async fn establish(
        &self,
        previous: Option<&SessionId>,
        identity: &SessionRecord,
    ) -> Result<SessionId> {
        if let Some(previous) = previous {
            self.store.delete(&previous.cache_key()).await?;
        }

        let id = SessionId::generate();
        let payload = serde_json::to_string(identity)?;
        self.store.set(&id.cache_key(), payload, self.ttl).await?;

        tracing::info!(user_id = %identity.id, "Session established");
        Ok(id)
    }

    /// Look up the identity bound to `id`
    pub async fn resolve(&self, id: Option<&SessionId>) -> Result<SessionRecord> {
        let id = id.ok_or(Error::NoSession)?;

        let payload = self
            .store
            .get(&id.cache_key())
            .await?
            .ok_or(Error::SessionExpiredOrInvalid)?;

        serde_json::from_str(&payload).map_err(|e| {
            tracing::warn!("Discarding unreadable session record: {}", e);
            Error::SessionExpiredOrInvalid
        })
    }

    /// Remove the session behind `id`. Missing ids and missing entries are fine.
    pub async fn destroy(&self, id: Option<&SessionId>) -> Result<()> {
        if let Some(id) = id {
            self.store.delete(&id.cache_key()).await?;
            tracing::info!("Session destroyed");
        }
        Ok(())
    }

    /// `Set-Cookie` header value for a newly established session
    pub fn session_cookie(&self, id: &SessionId) -> Result<HeaderValue> {
        self.cookie.issue(id)
    }

    /// `Set-Cookie` header value that clears the session cookie
    pub fn clear_cookie(&self) -> Result<HeaderValue> {
        self.cookie.clear()
    }
}
