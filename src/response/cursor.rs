//! Cursor-based response formatter

use super::sink::{paginated_body, ResponseSink};
use crate::error::Result;
use crate::pagination::encode_cursor;
use crate::types::{JsonObject, JsonValue};
use axum::http::StatusCode;
use serde::Serialize;

/// Input for [`cursor_based_response`]
#[derive(Debug, Clone)]
pub struct CursorResponseOptions<T> {
    /// Items of the current page
    pub data: Vec<T>,
    /// Encoded cursor for the following page, if any
    pub next_cursor: Option<String>,
    /// Encoded cursor for the preceding page, if any
    pub prev_cursor: Option<String>,
    /// Maximum items requested per page
    pub limit: u64,
    /// Items returned in this page
    pub count: u64,
    pub status: StatusCode,
    /// Extra top-level keys
    pub extra: JsonObject,
}

impl<T> CursorResponseOptions<T> {
    pub fn new(data: Vec<T>, limit: u64, count: u64) -> Self {
        Self {
            data,
            next_cursor: None,
            prev_cursor: None,
            limit,
            count,
            status: StatusCode::OK,
            extra: JsonObject::new(),
        }
    }

    /// Encode `cursor` as the token for the following page
    pub fn with_next_cursor<C: Serialize + ?Sized>(mut self, cursor: &C) -> Result<Self> {
        self.next_cursor = Some(encode_cursor(cursor)?);
        Ok(self)
    }

    /// Encode `cursor` as the token for the preceding page
    pub fn with_prev_cursor<C: Serialize + ?Sized>(mut self, cursor: &C) -> Result<Self> {
        self.prev_cursor = Some(encode_cursor(cursor)?);
        Ok(self)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// The `pagination` block of a cursor response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPageInfo {
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub has_next: bool,
    pub has_previous: bool,
    pub limit: u64,
    pub count: u64,
}

/// Build a cursor-paginated body, send it, and return it
pub fn cursor_based_response<T, S>(sink: &mut S, options: CursorResponseOptions<T>) -> Result<JsonValue>
where
    T: Serialize,
    S: ResponseSink,
{
    let info = CursorPageInfo {
        has_next: options.next_cursor.is_some(),
        has_previous: options.prev_cursor.is_some(),
        next_cursor: options.next_cursor,
        prev_cursor: options.prev_cursor,
        limit: options.limit,
        count: options.count,
    };
    let body = paginated_body(&options.data, &info, options.extra)?;

    sink.set_status(options.status).send(body.clone());

    Ok(body)
}
