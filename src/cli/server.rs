//! Demo HTTP server
//!
//! Serves a generated list of items through both pagination styles:
//!
//! - `GET /items?page=2&pageSize=10` - offset pagination
//! - `GET /items/cursor?c=<token>` - cursor pagination

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{
    CursorFallback, CursorOptions, OffsetFallback, PagifyConfig, DEFAULT_LAST_PROPERTY_NAME,
    DEFAULT_LIMIT_PROPERTY_NAME,
};
use crate::error::{Error, Result};
use crate::layer::{cursor_pagination, offset_pagination};
use crate::pagination::{CursorMiddleware, OffsetMiddleware, OffsetPagination, PaginationContext};
use crate::response::{
    cursor_based_response, offset_based_response, CursorResponseOptions, JsonReply,
    OffsetResponseOptions,
};
use crate::types::{JsonObject, JsonValue};

/// Largest page the demo routes accept
const MAX_PAGE_SIZE: u64 = 100;

/// Page size used when no fallback is configured
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Middleware options (from the config file, if any)
    pub options: PagifyConfig,
    /// Number of generated items
    pub items: u64,
}

/// A demo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

/// App state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub offset: Arc<OffsetMiddleware>,
    pub cursor: Arc<CursorMiddleware>,
    pub items: Arc<Vec<Item>>,
}

/// Build middlewares and data for the demo.
///
/// Options missing from the config file get demo-friendly values: fallbacks
/// of page 1 / 10 items, and validators that cap the page size.
pub fn demo_state(config: ServerConfig) -> AppState {
    let PagifyConfig {
        offset: mut offset_options,
        cursor: mut cursor_options,
    } = config.options;

    if offset_options.fall_back_values.is_none() {
        offset_options =
            offset_options.with_fallback(OffsetFallback::new(1, DEFAULT_PAGE_SIZE as i64));
    }
    if offset_options.validator.is_none() {
        offset_options = offset_options.with_validator(|page, page_size| {
            page >= 1 && (1..=MAX_PAGE_SIZE as i64).contains(&page_size)
        });
    }

    if cursor_options.fall_back_values.is_none() {
        cursor_options = cursor_options.with_fallback(CursorFallback::new(
            JsonValue::Null,
            DEFAULT_PAGE_SIZE as i64,
        ));
    }
    if cursor_options.validator.is_none() {
        let validator = demo_cursor_validator(&cursor_options);
        cursor_options = cursor_options.with_validator(validator);
    }

    let items = (1..=config.items)
        .map(|id| Item {
            id,
            name: format!("item-{id}"),
        })
        .collect();

    AppState {
        offset: Arc::new(OffsetMiddleware::new(offset_options)),
        cursor: Arc::new(CursorMiddleware::new(cursor_options)),
        items: Arc::new(items),
    }
}

/// Accept cursors whose last value is null or an id and whose limit is in range
fn demo_cursor_validator(
    options: &CursorOptions,
) -> impl Fn(Option<&JsonObject>) -> bool + Send + Sync + 'static {
    let last_name = options
        .last_property_name
        .clone()
        .unwrap_or_else(|| DEFAULT_LAST_PROPERTY_NAME.to_string());
    let limit_name = options
        .limit_property_name
        .clone()
        .unwrap_or_else(|| DEFAULT_LIMIT_PROPERTY_NAME.to_string());

    move |cursor: Option<&JsonObject>| {
        cursor.is_some_and(|c| {
            let last_ok = c
                .get(&last_name)
                .is_some_and(|v| v.is_null() || v.is_u64());
            let limit_ok = c
                .get(&limit_name)
                .and_then(JsonValue::as_u64)
                .is_some_and(|limit| (1..=MAX_PAGE_SIZE).contains(&limit));
            last_ok && limit_ok
        })
    }
}

/// Build the demo router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/items",
            get(list_items).layer(middleware::from_fn_with_state(
                state.offset.clone(),
                offset_pagination,
            )),
        )
        .route(
            "/items/cursor",
            get(list_items_by_cursor).layer(middleware::from_fn_with_state(
                state.cursor.clone(),
                cursor_pagination,
            )),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let item_count = config.items;
    let app = app(demo_state(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Serving {} demo items on http://{}", item_count, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Offset-paginated item listing
async fn list_items(
    State(state): State<AppState>,
    pagination: PaginationContext,
) -> Result<JsonReply> {
    let total = state.items.len() as u64;
    let offset = pagination
        .offset
        .unwrap_or_else(|| OffsetPagination::from_page(1, total.max(1), false));

    let page: Vec<Item> = state
        .items
        .iter()
        .skip(usize::try_from(offset.skip).unwrap_or(usize::MAX))
        .take(usize::try_from(offset.take).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    let mut reply = JsonReply::new();
    offset_based_response(
        &mut reply,
        OffsetResponseOptions::from_pagination(page, &offset, total)
            .with_extra("usedFallback", offset.used_fallback),
    )?;
    Ok(reply)
}

/// Cursor-paginated item listing, ordered by id
async fn list_items_by_cursor(
    State(state): State<AppState>,
    pagination: PaginationContext,
) -> Result<JsonReply> {
    let config = state.cursor.config();
    let last_name = config.last_property_name.as_str();
    let limit_name = config.limit_property_name.as_str();

    let cursor = pagination.cursor.unwrap_or_default();
    let limit = cursor
        .get(limit_name)
        .and_then(JsonValue::as_u64)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let last = cursor.get(last_name).and_then(JsonValue::as_u64).unwrap_or(0);

    let page: Vec<Item> = state
        .items
        .iter()
        .filter(|item| item.id > last)
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    let max_id = state.items.last().map_or(0, |item| item.id);
    let next_cursor = page
        .last()
        .filter(|item| item.id < max_id)
        .map(|item| position(last_name, JsonValue::from(item.id), limit_name, limit));
    let prev_cursor = (last > 0).then(|| {
        let prev_last = match last.saturating_sub(limit) {
            0 => JsonValue::Null,
            id => JsonValue::from(id),
        };
        position(last_name, prev_last, limit_name, limit)
    });

    let count = page.len() as u64;
    let mut options = CursorResponseOptions::new(page, limit, count)
        .with_extra("usedFallback", cursor.used_fallback);
    if let Some(next) = &next_cursor {
        options = options.with_next_cursor(next)?;
    }
    if let Some(prev) = &prev_cursor {
        options = options.with_prev_cursor(prev)?;
    }

    let mut reply = JsonReply::new();
    cursor_based_response(&mut reply, options)?;
    Ok(reply)
}

fn position(last_name: &str, last: JsonValue, limit_name: &str, limit: u64) -> JsonObject {
    let mut cursor = JsonObject::new();
    cursor.insert(last_name.to_string(), last);
    cursor.insert(limit_name.to_string(), JsonValue::from(limit));
    cursor
}
