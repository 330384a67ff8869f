//! HTTP API server

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, MemorySessionStore, MemoryUserStore, SessionManager, UserLookup};
use crate::blog::{BlogStore, MemoryBlogStore};
use crate::config::Config;
use crate::error::Result;

use super::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionManager,
    pub users: Arc<dyn UserLookup>,
    pub blogs: Arc<dyn BlogStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        sessions: SessionManager,
        users: Arc<dyn UserLookup>,
        blogs: Arc<dyn BlogStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            users,
            blogs,
        }
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, config).await
}

/// Serve on an already bound listener with in-process stores
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    config.validate()?;
    if config.server.is_production() && !config.session.secure_cookie {
        tracing::warn!("Running in production without secure session cookies");
    }

    let cache = MemorySessionStore::new();
    spawn_session_purge(
        cache.clone(),
        Duration::from_secs(config.session.purge_interval_secs.max(1)),
    );

    let sessions = SessionManager::new(Arc::new(cache), &config.session);
    let state = AppState::new(
        config,
        sessions,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryBlogStore::new()),
    );

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

/// Periodically drop expired session entries
fn spawn_session_purge(cache: MemorySessionStore, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    });
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let gate = middleware::from_fn_with_state(state.sessions.clone(), require_auth);

    Router::new()
        .route("/api/health", get(routes::health))
        // Auth routes
        .route("/api/auth/login", post(routes::login))
        .route("/api/auth/register", post(routes::register))
        .route(
            "/api/auth/logout",
            post(routes::logout).route_layer(gate.clone()),
        )
        .route("/api/auth/user", get(routes::current_user))
        // Blog routes
        .route(
            "/api/blogs",
            get(routes::list_blogs).merge(post(routes::create_blog).route_layer(gate.clone())),
        )
        .route(
            "/api/blogs/{id}",
            get(routes::get_blog).merge(
                put(routes::update_blog)
                    .delete(routes::delete_blog)
                    .route_layer(gate),
            ),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
