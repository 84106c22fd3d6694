use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::info;

use paging::{
    api::{self, AppState, Item},
    config::Config,
};

/// 2024-01-01T00:00:00Z
const FIRST_ITEM_AT: i64 = 1_704_067_200;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let config = Config::load();
    let state = AppState::shared(sample_items(137));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!(listen = %config.listen, "listing server ready");
    Ok(axum::serve(listener, app).await?)
}

/// One item per hour, starting at [`FIRST_ITEM_AT`]
fn sample_items(count: u64) -> Vec<Item> {
    (1..=count)
        .filter_map(|id| {
            let secs = FIRST_ITEM_AT + i64::try_from(id).ok()? * 3600;
            let created_at = DateTime::from_timestamp(secs, 0)?.with_timezone(&Local);
            Some(Item { id, title: format!("item {id}"), created_at })
        })
        .collect()
}
