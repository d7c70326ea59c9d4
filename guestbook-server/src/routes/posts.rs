//! Post endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use guestbook_core::{PostPage, PostRepo};

use crate::error::ApiError;
use crate::server::AppState;

/// Create post request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub name: String,
    pub comment: String,
    pub gift_id: String,
}

/// Created post response
#[derive(Serialize)]
pub struct CreatePostResponse {
    pub id: String,
}

/// GET /posts - every post, newest first
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<PostPage>, ApiError> {
    let page = PostRepo::new(&state.db).get_posts().await?;
    Ok(Json(page))
}

/// POST /posts - write a new post
async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let id = PostRepo::new(&state.db)
        .write_post(&req.name, &req.comment, &req.gift_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatePostResponse { id })))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/posts", get(list_posts).post(create_post))
}
