//! Offset-based response formatter

use super::sink::{paginated_body, ResponseSink};
use crate::error::{Error, Result};
use crate::pagination::OffsetPagination;
use crate::types::{JsonObject, JsonValue};
use axum::http::StatusCode;
use serde::Serialize;

/// Input for [`offset_based_response`]
#[derive(Debug, Clone)]
pub struct OffsetResponseOptions<T> {
    /// Items of the current page
    pub data: Vec<T>,
    /// Items skipped before this page
    pub skip: u64,
    /// Page size; must be at least 1
    pub take: u64,
    /// Total items across all pages
    pub total: u64,
    pub status: StatusCode,
    /// Extra top-level keys
    pub extra: JsonObject,
}

impl<T> OffsetResponseOptions<T> {
    pub fn new(data: Vec<T>, skip: u64, take: u64, total: u64) -> Self {
        Self {
            data,
            skip,
            take,
            total,
            status: StatusCode::OK,
            extra: JsonObject::new(),
        }
    }

    /// Use `skip` / `take` from the request's offset descriptor
    pub fn from_pagination(data: Vec<T>, pagination: &OffsetPagination, total: u64) -> Self {
        Self::new(data, pagination.skip, pagination.take, total)
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

/// The `pagination` block of an offset response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPageInfo {
    pub page: u64,
    pub page_size: u64,
    pub skip: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl OffsetPageInfo {
    /// Derive page metadata from `skip`, `take`, and `total`
    pub fn compute(skip: u64, take: u64, total: u64) -> Result<Self> {
        if take == 0 {
            return Err(Error::config("take must be at least 1"));
        }

        let page = skip / take + 1;
        let total_pages = total.div_ceil(take);

        Ok(Self {
            page,
            page_size: take,
            skip,
            total,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        })
    }
}

/// Build an offset-paginated body, send it, and return it
pub fn offset_based_response<T, S>(sink: &mut S, options: OffsetResponseOptions<T>) -> Result<JsonValue>
where
    T: Serialize,
    S: ResponseSink,
{
    let info = OffsetPageInfo::compute(options.skip, options.take, options.total)?;
    let body = paginated_body(&options.data, &info, options.extra)?;

    sink.set_status(options.status).send(body.clone());

    Ok(body)
}
