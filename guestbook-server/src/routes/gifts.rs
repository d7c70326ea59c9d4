//! Gift catalog endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use guestbook_core::gift::{self, Gift};

/// Catalog entry with the key posts refer to it by
#[derive(Serialize)]
pub struct GiftResponse {
    pub key: &'static str,
    #[serde(flatten)]
    pub gift: &'static Gift,
}

/// GET /gifts - catalog in display order
async fn list_gifts() -> Json<Vec<GiftResponse>> {
    Json(
        gift::catalog()
            .into_iter()
            .map(|entry| GiftResponse {
                key: entry.key,
                gift: entry.gift,
            })
            .collect(),
    )
}

/// Gift routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/gifts", get(list_gifts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_all_gifts_in_order() {
        let Json(gifts) = list_gifts().await;
        let keys: Vec<_> = gifts.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5"]);

        let json = serde_json::to_value(&gifts[2]).unwrap();
        assert_eq!(json["key"], "3");
        assert_eq!(json["name"], "star");
        assert_eq!(json["borderColor"], "#CFBB41");
    }
}
