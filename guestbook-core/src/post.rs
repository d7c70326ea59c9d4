//! Post models - persisted shape, decoder and join form
//!
//! Records read back from the store are untrusted: anything can sit under
//! `posts/` in a realtime database. [`RawPost::decode`] turns a JSON value
//! into a typed record or a [`ShapeError`] saying what was wrong.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GuestbookError, Result};
use crate::gift::{self, Gift};
use crate::store::ServerValue;

/// Post as stored under `posts/<key>`, after shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub name: String,
    pub comment: String,
    pub gift_id: String,
    /// Milliseconds since epoch, `None` until the server assigns it
    pub created_at: Option<i64>,
}

/// Why a stored record failed shape validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Record is not a JSON object
    NotAnObject,

    /// Required field is absent
    Missing { field: &'static str },

    /// Field is present with the wrong JSON type
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not an object"),
            Self::Missing { field } => write!(f, "missing field '{}'", field),
            Self::WrongType { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

impl RawPost {
    /// Decode a stored record.
    ///
    /// # Rules
    /// - `name`, `comment` and `giftId` must be strings
    /// - `createdAt` must be a number, null, or absent
    pub fn decode(value: &Value) -> std::result::Result<Self, ShapeError> {
        let obj = value.as_object().ok_or(ShapeError::NotAnObject)?;

        let string_field = |field: &'static str| -> std::result::Result<String, ShapeError> {
            match obj.get(field) {
                None => Err(ShapeError::Missing { field }),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(ShapeError::WrongType {
                    field,
                    expected: "a string",
                }),
            }
        };

        let name = string_field("name")?;
        let comment = string_field("comment")?;
        let gift_id = string_field("giftId")?;

        let created_at = match obj.get("createdAt") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Some(_) => {
                return Err(ShapeError::WrongType {
                    field: "createdAt",
                    expected: "a number or null",
                })
            }
        };

        Ok(Self {
            name,
            comment,
            gift_id,
            created_at,
        })
    }

    /// Join with the gift catalog. Returns `None` if the gift key is unknown.
    pub fn resolve(self, id: impl Into<String>) -> Option<Post> {
        let gift = gift::lookup(&self.gift_id)?;
        Some(Post {
            id: id.into(),
            name: self.name,
            comment: self.comment,
            gift_id: self.gift_id,
            created_at: self.created_at,
            gift,
        })
    }
}

/// Validated input for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    name: String,
    comment: String,
    gift_id: String,
}

impl NewPost {
    /// Validate and normalize a new post.
    ///
    /// The gift key must exist in the catalog. Name and comment are trimmed.
    ///
    /// # Example
    /// ```
    /// use guestbook_core::post::NewPost;
    ///
    /// let post = NewPost::new("  Alice  ", " Hi ", "3").unwrap();
    /// assert_eq!(post.name(), "Alice");
    /// assert!(NewPost::new("Bob", "Hi", "99").is_err());
    /// ```
    pub fn new(name: &str, comment: &str, gift_id: &str) -> Result<Self> {
        if !gift::contains(gift_id) {
            return Err(GuestbookError::invalid_gift(gift_id));
        }

        Ok(Self {
            name: name.trim().to_owned(),
            comment: comment.trim().to_owned(),
            gift_id: gift_id.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn gift_id(&self) -> &str {
        &self.gift_id
    }

    /// Wire record with a server timestamp placeholder for `createdAt`.
    pub fn to_record(&self) -> NewPostRecord<'_> {
        NewPostRecord {
            name: &self.name,
            comment: &self.comment,
            gift_id: &self.gift_id,
            created_at: ServerValue::Timestamp,
        }
    }
}

/// Body written to the store for a new post
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRecord<'a> {
    pub name: &'a str,
    pub comment: &'a str,
    pub gift_id: &'a str,
    pub created_at: ServerValue,
}

/// Post joined with its gift, as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub name: String,
    pub comment: String,
    /// Catalog key as stored ("1".."5"), not the gift's UUID (see `gift.id`)
    pub gift_id: String,
    pub created_at: Option<i64>,
    pub gift: &'static Gift,
}

/// Result of listing posts
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub data: Vec<Post>,
    pub total: usize,
}

impl From<Vec<Post>> for PostPage {
    fn from(data: Vec<Post>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// Newest first; posts without a timestamp go last.
fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (a.created_at, b.created_at) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

/// Sort posts newest first. Stable, so untimestamped posts keep their order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(newest_first);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str, created_at: Option<i64>) -> Post {
        RawPost {
            name: "n".into(),
            comment: "c".into(),
            gift_id: "1".into(),
            created_at,
        }
        .resolve(id)
        .unwrap()
    }

    #[test]
    fn decode_valid_record() {
        let raw = RawPost::decode(&json!({
            "name": "Alice",
            "comment": "Happy!",
            "giftId": "3",
            "createdAt": 1700000000000_i64
        }))
        .unwrap();

        assert_eq!(raw.name, "Alice");
        assert_eq!(raw.gift_id, "3");
        assert_eq!(raw.created_at, Some(1700000000000));
    }

    #[test]
    fn decode_null_or_absent_timestamp() {
        let with_null = json!({"name": "a", "comment": "b", "giftId": "1", "createdAt": null});
        let absent = json!({"name": "a", "comment": "b", "giftId": "1"});

        assert_eq!(RawPost::decode(&with_null).unwrap().created_at, None);
        assert_eq!(RawPost::decode(&absent).unwrap().created_at, None);
    }

    #[test]
    fn decode_rejects_bad_shapes() {
        assert_eq!(
            RawPost::decode(&json!("just a string")),
            Err(ShapeError::NotAnObject)
        );
        assert_eq!(
            RawPost::decode(&json!({"name": "a", "giftId": "1"})),
            Err(ShapeError::Missing { field: "comment" })
        );
        assert!(matches!(
            RawPost::decode(&json!({"name": 7, "comment": "b", "giftId": "1"})),
            Err(ShapeError::WrongType { field: "name", .. })
        ));
        assert!(matches!(
            RawPost::decode(&json!({"name": "a", "comment": "b", "giftId": 1})),
            Err(ShapeError::WrongType { field: "giftId", .. })
        ));
        assert!(matches!(
            RawPost::decode(&json!({"name": "a", "comment": "b", "giftId": "1", "createdAt": "yesterday"})),
            Err(ShapeError::WrongType { field: "createdAt", .. })
        ));
    }

    #[test]
    fn resolved_gift_id_is_catalog_key() {
        let p = post("k", Some(1));
        assert_eq!(p.gift_id, "1");
        assert_eq!(p.gift.id.to_string(), "ba8a1955-5f71-4cde-9886-62fc829784a1");

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["giftId"], "1");
        assert_eq!(json["gift"]["id"], "ba8a1955-5f71-4cde-9886-62fc829784a1");
    }

    #[test]
    fn resolve_unknown_gift() {
        let raw = RawPost {
            name: "a".into(),
            comment: "b".into(),
            gift_id: "99".into(),
            created_at: None,
        };
        assert!(raw.resolve("k").is_none());
    }

    #[test]
    fn new_post_trims_and_validates() {
        let p = NewPost::new("  Alice  ", "  Happy!  ", "3").unwrap();
        assert_eq!(p.name(), "Alice");
        assert_eq!(p.comment(), "Happy!");
        assert_eq!(p.gift_id(), "3");

        let err = NewPost::new("Alice", "Happy!", "99").unwrap_err();
        assert!(matches!(err, GuestbookError::InvalidGiftReference { .. }));
    }

    #[test]
    fn record_carries_server_timestamp() {
        let p = NewPost::new("Alice", "Hi", "1").unwrap();
        let json = serde_json::to_value(p.to_record()).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "Alice",
                "comment": "Hi",
                "giftId": "1",
                "createdAt": {".sv": "timestamp"}
            })
        );
    }

    #[test]
    fn sort_puts_missing_timestamps_last() {
        let mut posts = vec![post("a", Some(100)), post("b", None), post("c", Some(50))];
        sort_newest_first(&mut posts);

        let order: Vec<_> = posts.iter().map(|p| p.created_at).collect();
        assert_eq!(order, vec![Some(100), Some(50), None]);
    }

    #[test]
    fn sort_is_stable_for_missing_timestamps() {
        let mut posts = vec![post("x", None), post("y", Some(1)), post("z", None)];
        sort_newest_first(&mut posts);

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    fn page_counts_items() {
        let page = PostPage::from(vec![post("a", None), post("b", None)]);
        assert_eq!(page.total, 2);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["data"][0]["giftId"], "1");
        assert_eq!(json["data"][0]["gift"]["name"], "cocoa");
    }
}
