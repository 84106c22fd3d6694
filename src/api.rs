use crate::{
    error::ApiError,
    list::ListData,
    page_info::{page_info, PageInfo},
    pagination::{default_limit, ListForm, Pagination, SortField},
};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::Query;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    sync::{Arc, RwLock},
};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// An entry of the catalog being listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier
    pub id: u64,
    /// Searchable title
    pub title: String,
    /// Creation instant, filtered by the time bounds
    pub created_at: DateTime<Local>,
}

impl Item {
    fn matches<P: Pagination>(&self, form: &P) -> bool {
        let keywords = form.keywords().to_lowercase();
        (keywords.is_empty() || self.title.to_lowercase().contains(&keywords))
            && form.begin_time().map_or(true, |begin| self.created_at >= begin)
            && form.end_time().map_or(true, |end| self.created_at <= end)
    }

    fn compare(&self, other: &Self, sort: &SortField) -> Ordering {
        let ordering = match sort.field.as_str() {
            "id" => self.id.cmp(&other.id),
            "title" => self.title.cmp(&other.title),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        };
        if sort.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Shared server state
pub struct AppState {
    /// Catalog, in insertion order
    pub items: Vec<Item>,
}

impl AppState {
    /// Wrap `items` for use as router state
    #[must_use]
    pub fn shared(items: Vec<Item>) -> AppStateWrapper {
        Arc::new(RwLock::new(Self { items }))
    }
}

/// State as handed to handlers
pub type AppStateWrapper = Arc<RwLock<AppState>>;
/// Handler result
pub type HttpResponse = Result<Response, ApiError>;

/// A page of items with its metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Envelope with `total`, `page`, `limit` and `data`
    #[serde(flatten)]
    pub list: ListData<T>,
    /// Links to render
    pub page_info: PageInfo,
}

/// Url parameters of `/page-info`
#[derive(Debug, Deserialize)]
pub struct PageInfoParams {
    /// Number of entries
    #[serde(default)]
    pub total: i64,
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn first_page() -> i64 {
    1
}

/// Return state locked for reading
fn lock_state_read(state: &AppStateWrapper) -> Result<std::sync::RwLockReadGuard<'_, AppState>> {
    // With map errors to string because PoisonError are not `Send`
    state.read().map_err(move |e| anyhow::anyhow! { e.to_string() })
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Compose the listing routes
#[must_use]
pub fn router(state: AppStateWrapper) -> Router {
    Router::new()
        .route("/items", get(items_index))
        .route("/items/:id", get(item_get))
        .route("/page-info", get(page_info_get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler to return a filtered, sorted and paginated list of items
pub async fn items_index(
    form: Option<Query<ListForm>>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    let form = form.map(|Query(form)| form).unwrap_or_default();
    let sort = form.sort_fields();

    let (total, data) = {
        let state = lock_state_read(&s)?;
        let mut matched: Vec<&Item> =
            state.items.iter().filter(|item| item.matches(&form)).collect();
        matched.sort_by(|a, b| {
            sort.iter().fold(Ordering::Equal, |acc, field| acc.then_with(|| a.compare(b, field)))
        });

        let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
        let data: Vec<Item> = matched
            .into_iter()
            .skip(to_usize(form.offset()))
            .take(to_usize(form.limit()))
            .cloned()
            .collect();
        (total, data)
    };

    let list = ListData::from_form(&form, total, data);
    let page_info = list.page_info();
    debug!(total, page = list.page, limit = list.limit, pages = page_info.total, "listed items");

    Ok(Json(ListResponse { list, page_info }).into_response())
}

/// Handler to retrieve an item by id
pub async fn item_get(Path(id): Path<u64>, State(s): State<AppStateWrapper>) -> HttpResponse {
    let state = lock_state_read(&s)?;
    let item = state.items.iter().find(|item| item.id == id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item).into_response())
}

/// Handler to compute pagination metadata without listing anything
pub async fn page_info_get(Query(params): Query<PageInfoParams>) -> Json<PageInfo> {
    Json(page_info(params.total, params.page, params.limit))
}
