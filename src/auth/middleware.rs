//! Authentication middleware and extractors

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::auth::models::SessionRecord;
use crate::auth::session::SessionManager;
use crate::error::Error;

/// Identity of the caller, resolved by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionRecord);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the gate ran on this route
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(Error::NoSession)
    }
}

/// Middleware for requiring an authenticated session
pub async fn require_auth(
    State(sessions): State<SessionManager>,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    let id = sessions.session_id(req.headers());
    let identity = sessions.resolve(id.as_ref()).await?;

    tracing::debug!(user_id = %identity.id, "Authenticated request");
    req.extensions_mut().insert(CurrentUser(identity));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::cache::MemorySessionStore;
    use crate::config::SessionConfig;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn whoami(CurrentUser(user): CurrentUser) -> String {
        user.name
    }

    async fn spawn(sessions: SessionManager) -> String {
        let app = Router::new()
            .route("/me", get(whoami))
            .route_layer(middleware::from_fn_with_state(sessions, require_auth))
            .route("/open", get(whoami));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_gate_rejects_and_admits() {
        let sessions = SessionManager::new(
            Arc::new(MemorySessionStore::new()),
            &SessionConfig::default(),
        );
        let identity = SessionRecord {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            name: "Alice".to_string(),
        };
        let id = sessions.establish(None, &identity).await.unwrap();
        let base = spawn(sessions).await;
        let client = reqwest::Client::new();

        let anonymous = client.get(format!("{}/me", base)).send().await.unwrap();
        assert_eq!(anonymous.status().as_u16(), StatusCode::UNAUTHORIZED.as_u16());

        let authed = client
            .get(format!("{}/me", base))
            .header("Cookie", format!("session_id={}", id))
            .send()
            .await
            .unwrap();
        assert_eq!(authed.status().as_u16(), 200);
        assert_eq!(authed.text().await.unwrap(), "Alice");

        // Extractor refuses to run on a route the gate does not cover
        let open = client
            .get(format!("{}/open", base))
            .header("Cookie", format!("session_id={}", id))
            .send()
            .await
            .unwrap();
        assert_eq!(open.status().as_u16(), 401);
    }
}
