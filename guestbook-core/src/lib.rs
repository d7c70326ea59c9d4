//! guestbook-core: posts with gift stickers over a realtime database
//!
//! The [`Database`] handle is created once and passed to [`PostRepo`],
//! which writes posts and reads them back joined with the static
//! [`gift`] catalog.

pub mod config;
pub mod connection;
pub mod error;
pub mod gift;
pub mod post;
pub mod repo;
pub mod store;

pub use config::FirebaseConfig;
pub use connection::Database;
pub use error::{GuestbookError, Result};
pub use gift::Gift;
pub use post::{NewPost, Post, PostPage, RawPost, ShapeError};
pub use repo::PostRepo;
pub use store::{RealtimeStore, StoreError};
