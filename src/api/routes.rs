//! API route handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::server::AppState;
use crate::auth::{self, CurrentUser, LoginRequest, RegisterRequest};
use crate::blog::{Blog, BlogIdParam, BlogPayload, ListQuery, Mutation, Pagination};
use crate::error::{Error, MessageResponse, Result};
use crate::validation::Validate;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(rename = "_id")]
    pub id: String,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(MessageResponse::new("healthy"))
}

// Auth routes

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let identity = auth::authenticate(state.users.as_ref(), &req.email, &req.password).await?;
    let previous = state.sessions.session_id(&headers);
    let id = state.sessions.establish(previous.as_ref(), &identity).await?;
    let cookie = state.sessions.session_cookie(&id)?;

    Ok(([(header::SET_COOKIE, cookie)], Json(identity)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    auth::register(
        state.users.as_ref(),
        &req.email,
        &req.password,
        &req.name,
        state.config.auth.bcrypt_cost,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Registered"))))
}

pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let id = state.sessions.session_id(&headers);
    state.sessions.destroy(id.as_ref()).await?;
    tracing::debug!(user_id = %user.id, "Logged out");

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.sessions.clear_cookie()?)],
    ))
}

pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let id = state.sessions.session_id(&headers);
    let identity = state.sessions.resolve(id.as_ref()).await?;
    Ok(Json(identity))
}

// Blog routes

pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Blog>>> {
    query.validate()?;

    let page = Pagination {
        offset: usize::try_from(query.from).unwrap_or_default(),
        limit: state.config.blogs.page_size,
    };
    Ok(Json(state.blogs.find(page).await?))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(params): Path<BlogIdParam>,
) -> Result<Json<Blog>> {
    params.validate()?;

    state
        .blogs
        .find_by_id(&params.id)
        .await?
        .map(Json)
        .ok_or(Error::ResourceNotFound)
}

pub async fn create_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<BlogPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let blog = Blog::new(payload.title, payload.content, user.id);
    let id = blog.id.clone();
    state.blogs.insert(blog).await?;
    tracing::info!(blog_id = %id, "Created blog");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Created".to_string(),
            id,
        }),
    ))
}

pub async fn update_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(params): Path<BlogIdParam>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<MessageResponse>> {
    params.validate()?;
    payload.validate()?;

    let outcome = state
        .blogs
        .update_owned(&params.id, &user.id, &payload)
        .await?;
    mutation_result(outcome, &params.id, &user.id)?;

    Ok(Json(MessageResponse::new("Updated")))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(params): Path<BlogIdParam>,
) -> Result<Json<MessageResponse>> {
    params.validate()?;

    let outcome = state.blogs.delete_owned(&params.id, &user.id).await?;
    mutation_result(outcome, &params.id, &user.id)?;

    Ok(Json(MessageResponse::new("Deleted")))
}

fn mutation_result(outcome: Mutation, blog_id: &str, user_id: &str) -> Result<()> {
    match outcome {
        Mutation::Applied => Ok(()),
        Mutation::NotFound => Err(Error::ResourceNotFound),
        Mutation::OwnerMismatch => {
            tracing::warn!(blog_id, user_id, "Rejected mutation by non-owner");
            Err(Error::OwnershipMismatch)
        }
    }
}
