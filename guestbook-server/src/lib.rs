//! guestbook-server: HTTP API for guestbook posts
//!
//! - `GET /posts` and `POST /posts` over [`guestbook_core::PostRepo`]
//! - `GET /gifts` for the sticker catalog
//! - `GET /health`

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
