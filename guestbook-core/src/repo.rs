//! Post repository
//!
//! Handles the two guestbook operations:
//! - write: validate gift, trim, push with a server timestamp
//! - list: one snapshot read, decode, join with gifts, newest first
//!
//! Store failures are logged here and returned unchanged.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::connection::Database;
use crate::error::{GuestbookError, Result};
use crate::post::{sort_newest_first, NewPost, Post, PostPage, RawPost};
use crate::store::StoreError;

/// Collection all posts live under
pub const POSTS_PATH: &str = "posts";

/// Post repository
pub struct PostRepo<'a> {
    db: &'a Database,
}

impl<'a> PostRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate and write a post, returning its generated key.
    ///
    /// Fails with [`GuestbookError::InvalidGiftReference`] before touching
    /// the store if `gift_id` is not in the catalog.
    pub async fn write_post(&self, name: &str, comment: &str, gift_id: &str) -> Result<String> {
        let post = NewPost::new(name, comment, gift_id)?;
        self.create(&post).await
    }

    /// Write an already validated post.
    pub async fn create(&self, post: &NewPost) -> Result<String> {
        let value = serde_json::to_value(post.to_record()).map_err(StoreError::from)?;

        let key = self
            .db
            .store()
            .push(POSTS_PATH, value)
            .await
            .map_err(|e| {
                error!(store = %self.db.label(), "Error writing post: {}", e);
                GuestbookError::from(e)
            })?;

        match key {
            Some(key) => {
                debug!(%key, gift_id = post.gift_id(), "post written");
                Ok(key)
            }
            None => {
                error!(store = %self.db.label(), "Error writing post: no key returned");
                Err(GuestbookError::KeyGeneration)
            }
        }
    }

    /// Read every post, newest first.
    ///
    /// Records that fail decoding or reference an unknown gift are skipped
    /// with a warning and not counted in `total`.
    pub async fn get_posts(&self) -> Result<PostPage> {
        let snapshot = self.db.store().get(POSTS_PATH).await.map_err(|e| {
            error!(store = %self.db.label(), "Error getting posts: {}", e);
            GuestbookError::from(e)
        })?;

        let mut posts = match snapshot {
            None => Vec::new(),
            Some(Value::Object(children)) => children
                .into_iter()
                .filter_map(|(key, value)| join_record(key, &value))
                .collect(),
            // Integer-keyed collections come back from the REST API as arrays
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter(|(_, value)| !value.is_null())
                .filter_map(|(index, value)| join_record(index.to_string(), &value))
                .collect(),
            Some(other) => {
                warn!("Ignoring non-collection value at '{}': {}", POSTS_PATH, other);
                Vec::new()
            }
        };

        sort_newest_first(&mut posts);
        debug!(total = posts.len(), "posts loaded");
        Ok(PostPage::from(posts))
    }
}

/// Decode one stored child and join it with its gift.
fn join_record(key: String, value: &Value) -> Option<Post> {
    let raw = match RawPost::decode(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Invalid post data for key {} ({}): {}", key, e, value);
            return None;
        }
    };

    let gift_id = raw.gift_id.clone();
    let post = raw.resolve(key.as_str());
    if post.is_none() {
        warn!("Invalid giftId {} for post {}", gift_id, key);
    }
    post
}
