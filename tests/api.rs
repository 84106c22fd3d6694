use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use paging::api::{router, AppState, Item};

/// 2024-01-01T00:00:00Z
const FIRST_ITEM_AT: i64 = 1_704_067_200;

fn app(count: u64) -> Router {
    let items = (1..=count)
        .map(|id| Item {
            id,
            title: format!("item {id}"),
            created_at: DateTime::from_timestamp(FIRST_ITEM_AT + i64::try_from(id).unwrap() * 3600, 0)
                .unwrap()
                .with_timezone(&Local),
        })
        .collect();
    router(AppState::shared(items))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"].as_array().unwrap().iter().map(|item| item["id"].as_u64().unwrap()).collect()
}

#[tokio::test]
async fn lists_first_page_by_default() {
    let (status, body) = get(app(45), "/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 45);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
    assert_eq!(ids(&body), (1..=20).collect::<Vec<_>>());
    assert_eq!(
        body["page_info"],
        json!({ "total": 3, "page": 1, "limit": 20, "prev_page": -1, "next_page": 2, "page_list": [1, 2, 3] })
    );
}

#[tokio::test]
async fn lists_requested_page() {
    let (status, body) = get(app(45), "/items?page=2&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 10);
    assert_eq!(ids(&body), (11..=20).collect::<Vec<_>>());
    assert_eq!(body["page_info"]["total"], 5);
    assert_eq!(body["page_info"]["prev_page"], 1);
    assert_eq!(body["page_info"]["next_page"], 3);
    assert_eq!(body["page_info"]["page_list"], json!([1, 2, 3, 4, 5]));
}

#[tokio::test]
async fn last_page_is_partial() {
    let (_, body) = get(app(45), "/items?page=5&limit=10").await;
    assert_eq!(ids(&body), (41..=45).collect::<Vec<_>>());
    assert_eq!(body["page_info"]["next_page"], -1);
}

#[tokio::test]
async fn garbage_paging_falls_back_to_defaults() {
    let (status, body) = get(app(45), "/items?page=abc&limit=-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
    assert_eq!(ids(&body).len(), 20);
}

#[tokio::test]
async fn window_is_centered_on_large_catalogs() {
    let (_, body) = get(app(1000), "/items?page=25&limit=20").await;
    assert_eq!(body["page_info"]["total"], 50);
    assert_eq!(body["page_info"]["page_list"], json!([23, 24, 25, 26, 27]));
}

#[tokio::test]
async fn filters_by_trimmed_keywords() {
    let (_, body) = get(app(45), "/items?keywords=%20%20ITEM%204%20").await;
    assert_eq!(body["total"], 7);
    assert_eq!(ids(&body), vec![4, 40, 41, 42, 43, 44, 45]);
}

#[tokio::test]
async fn filters_by_time_range() {
    let uri = "/items?begin_time=2024-01-01T10:00:00%2B00:00&end_time=2024-01-01T16:00:00%2B02:00";
    let (_, body) = get(app(45), uri).await;
    assert_eq!(ids(&body), vec![10, 11, 12, 13, 14]);
}

#[tokio::test]
async fn unparsable_time_is_ignored() {
    let (status, body) = get(app(45), "/items?begin_time=last%20week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 45);
}

#[tokio::test]
async fn sorts_by_repeated_order_by() {
    let (_, body) = get(app(45), "/items?order_by=-id&limit=3").await;
    assert_eq!(ids(&body), vec![45, 44, 43]);

    let (_, body) = get(app(12), "/items?order_by=title&order_by=-id&limit=4").await;
    assert_eq!(ids(&body), vec![1, 10, 11, 12]);

    let (_, body) = get(app(12), "/items?order_by=unknown&order_by=-created_at&limit=2").await;
    assert_eq!(ids(&body), vec![12, 11]);
}

#[tokio::test]
async fn repeated_scalar_keys_keep_the_last_value() {
    let (status, body) = get(app(45), "/items?keywords=zzz&keywords=item%204&page=3&page=1&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(ids(&body), vec![4, 40, 41, 42, 43]);
}

#[tokio::test]
async fn item_by_id() {
    let (status, body) = get(app(5), "/items/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "item 3");

    let (status, _) = get(app(5), "/items/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_info_endpoint() {
    let (status, body) = get(app(0), "/page-info?total=1000&page=50&limit=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total": 50, "page": 50, "limit": 20, "prev_page": 49, "next_page": -1, "page_list": [46, 47, 48, 49, 50] })
    );

    let (_, body) = get(app(0), "/page-info?total=10&limit=0").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["page_list"], json!([]));
}

#[tokio::test]
async fn empty_catalog() {
    let (_, body) = get(app(0), "/items").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["page_info"]["prev_page"], -1);
    assert_eq!(body["page_info"]["next_page"], -1);
    assert_eq!(body["page_info"]["page_list"], json!([]));
}
