//! Firebase Realtime Database client
//!
//! Direct REST API integration: every path is addressed as
//! `{database_url}/{path}.json`. `POST` appends a child with a generated
//! key, `GET` returns the subtree (or `null`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{validate_path, RealtimeStore, StoreError};

/// Longest error body kept in a [`StoreError::Status`]
const MAX_ERROR_BODY: usize = 500;

/// Response to a push: `{"name": "<generated key>"}`
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: Option<String>,
}

/// Firebase Realtime Database REST client
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: Client,
    base_url: Url,
}

impl FirebaseStore {
    /// Create a client for the database at `database_url`.
    pub fn new(database_url: Url) -> Self {
        Self::with_client(Client::new(), database_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, mut database_url: Url) -> Self {
        // Url::join replaces the last segment unless the base ends in '/'
        if !database_url.path().ends_with('/') {
            let path = format!("{}/", database_url.path());
            database_url.set_path(&path);
        }
        Self {
            client,
            base_url: database_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// REST endpoint for a store path
    pub fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        let path = validate_path(path)?;
        self.base_url
            .join(&format!("{}.json", path))
            .map_err(|_| StoreError::InvalidPath {
                path: path.to_owned(),
            })
    }

    async fn read_body(
        method: &'static str,
        path: &str,
        response: Response,
    ) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Truncate error response to avoid flooding logs
            let body = if body.len() > MAX_ERROR_BODY {
                let cut: String = body.chars().take(MAX_ERROR_BODY).collect();
                format!("{}...", cut)
            } else {
                body
            };
            return Err(StoreError::Status {
                method,
                path: path.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RealtimeStore for FirebaseStore {
    async fn push(&self, path: &str, value: Value) -> Result<Option<String>, StoreError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "push");

        let response = self.client.post(url).json(&value).send().await?;
        let body = Self::read_body("POST", path, response).await?;

        let parsed: PushResponse =
            serde_json::from_str(&body).map_err(|source| StoreError::Decode {
                path: path.to_owned(),
                source,
            })?;

        Ok(parsed.name.filter(|key| !key.is_empty()))
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "get");

        let response = self.client.get(url).send().await?;
        let body = Self::read_body("GET", path, response).await?;

        let value: Value = serde_json::from_str(&body).map_err(|source| StoreError::Decode {
            path: path.to_owned(),
            source,
        })?;

        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str) -> FirebaseStore {
        FirebaseStore::new(Url::parse(url).unwrap())
    }

    #[test]
    fn endpoint_appends_json_suffix() {
        let s = store("https://demo-default-rtdb.firebaseio.com");
        assert_eq!(
            s.endpoint("posts").unwrap().as_str(),
            "https://demo-default-rtdb.firebaseio.com/posts.json"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let s = store("http://127.0.0.1:9000/ns");
        assert_eq!(
            s.endpoint("guestbook/posts").unwrap().as_str(),
            "http://127.0.0.1:9000/ns/guestbook/posts.json"
        );
        assert_eq!(s.base_url().path(), "/ns/");
    }

    #[test]
    fn endpoint_rejects_invalid_paths() {
        let s = store("https://demo.firebaseio.com/");
        assert!(matches!(
            s.endpoint("../secrets"),
            Err(StoreError::InvalidPath { .. })
        ));
    }

    #[test]
    fn push_response_decodes() {
        let parsed: PushResponse = serde_json::from_str(r#"{"name":"-NabcDEF"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("-NabcDEF"));

        let parsed: PushResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.name.is_none());
    }

    mod http {
        use super::*;
        use crate::{Database, GuestbookError, PostRepo};
        use axum::{http::StatusCode, routing::{get, post}, Json, Router};
        use serde_json::json;
        use std::sync::Arc;

        /// Serve a fake database on a random local port
        async fn spawn_database() -> (std::net::SocketAddr, FirebaseStore) {
            let app = Router::new()
                .route(
                    "/posts.json",
                    get(|| async {
                        Json(json!({
                            "-Nk1": {"name": "a", "comment": "x", "giftId": "1", "createdAt": 10}
                        }))
                    })
                    .post(|Json(body): Json<Value>| async move {
                        if body["createdAt"][".sv"] == "timestamp" {
                            (StatusCode::OK, Json(json!({"name": "-Nk2"})))
                        } else {
                            (StatusCode::BAD_REQUEST, Json(json!({"error": "no timestamp"})))
                        }
                    }),
                )
                .route("/empty.json", get(|| async { "null" }))
                .route(
                    "/denied.json",
                    get(|| async { (StatusCode::UNAUTHORIZED, "Permission denied") })
                        .post(|| async { (StatusCode::UNAUTHORIZED, "x".repeat(600)) }),
                )
                .route("/keyless.json", post(|| async { r#"{"name":""}"# }))
                .route("/keyless/posts.json", post(|| async { r#"{"name":""}"# }))
                .route("/nameless.json", post(|| async { "{}" }));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            (addr, store(&format!("http://{}", addr)))
        }

        #[tokio::test]
        async fn push_returns_generated_key() {
            let (_, s) = spawn_database().await;
            let key = s
                .push("posts", json!({"createdAt": {".sv": "timestamp"}}))
                .await
                .unwrap();
            assert_eq!(key.as_deref(), Some("-Nk2"));
        }

        #[tokio::test]
        async fn get_returns_subtree() {
            let (_, s) = spawn_database().await;
            let value = s.get("posts").await.unwrap().unwrap();
            assert_eq!(value["-Nk1"]["giftId"], "1");
        }

        #[tokio::test]
        async fn null_body_reads_as_absent() {
            let (_, s) = spawn_database().await;
            assert!(s.get("empty").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn error_status_becomes_status_error() {
            let (_, s) = spawn_database().await;
            let err = s.get("denied").await.unwrap_err();
            match err {
                StoreError::Status {
                    method,
                    path,
                    status,
                    body,
                } => {
                    assert_eq!(method, "GET");
                    assert_eq!(path, "denied");
                    assert_eq!(status, 401);
                    assert_eq!(body, "Permission denied");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn long_error_bodies_are_truncated() {
            let (_, s) = spawn_database().await;
            let err = s.push("denied", json!({})).await.unwrap_err();
            match err {
                StoreError::Status { status, body, .. } => {
                    assert_eq!(status, 401);
                    assert_eq!(body.len(), MAX_ERROR_BODY + 3);
                    assert!(body.ends_with("..."));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn empty_or_missing_name_is_no_key() {
            let (_, s) = spawn_database().await;
            assert!(s.push("keyless", json!({})).await.unwrap().is_none());
            assert!(s.push("nameless", json!({})).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn keyless_push_fails_the_write() {
            let (addr, _) = spawn_database().await;
            let s = store(&format!("http://{}/keyless", addr));

            let db = Database::from_store(Arc::new(s));
            let err = PostRepo::new(&db).write_post("a", "b", "1").await.unwrap_err();
            assert!(matches!(err, GuestbookError::KeyGeneration));
        }
    }
}
