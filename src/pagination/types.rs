//! Pagination context types
//!
//! The per-request values produced by the middlewares and read by handlers.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Offset descriptor for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPagination {
    /// 1-based page number
    pub page: u64,
    /// Items per page
    pub page_size: u64,
    /// Items to skip, `(page - 1) * page_size`
    pub skip: u64,
    /// Items to fetch, equal to `page_size`
    pub take: u64,
    /// Whether the values came from the fallback config
    pub used_fallback: bool,
}

impl OffsetPagination {
    /// Build a descriptor from a page number and page size.
    ///
    /// `skip` saturates at `u64::MAX`; the middleware never produces a
    /// page whose offset does not fit.
    pub fn from_page(page: u64, page_size: u64, used_fallback: bool) -> Self {
        Self {
            page,
            page_size,
            skip: page.saturating_sub(1).saturating_mul(page_size),
            take: page_size,
            used_fallback,
        }
    }
}

/// Cursor descriptor for one request
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPagination {
    /// Decoded cursor, `None` when the client sent none and it was accepted
    pub cursor: Option<JsonObject>,
    /// Whether the cursor was built from the fallback config
    pub used_fallback: bool,
}

impl CursorPagination {
    /// Look up a field of the decoded cursor
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.cursor.as_ref().and_then(|c| c.get(key))
    }

    /// Deserialize the cursor into a caller-defined type
    pub fn cursor_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.cursor
            .as_ref()
            .map(|c| serde_json::from_value(JsonValue::Object(c.clone())))
            .transpose()
            .map_err(Into::into)
    }
}

/// Request-scoped pagination state
///
/// Each middleware writes only its own field, so an offset and a cursor
/// descriptor can coexist on the same request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PaginationContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<OffsetPagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorPagination>,
}

impl PaginationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no middleware has attached anything
    pub fn is_empty(&self) -> bool {
        self.offset.is_none() && self.cursor.is_none()
    }
}
