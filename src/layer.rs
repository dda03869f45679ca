//! Axum integration
//!
//! Middleware functions for `axum::middleware::from_fn_with_state`, a
//! [`PaginationContext`] extractor for handlers, and the mapping from
//! [`Error`] to an HTTP response.
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use pagify::layer::offset_pagination;
//! use pagify::pagination::OffsetMiddleware;
//! use std::sync::Arc;
//!
//! let offset = Arc::new(OffsetMiddleware::default());
//! let app: Router = Router::new().route(
//!     "/items",
//!     get(list_items).layer(middleware::from_fn_with_state(offset, offset_pagination)),
//! );
//! ```

use crate::error::{Error, Result};
use crate::pagination::{CursorMiddleware, OffsetMiddleware, PaginationContext};
use crate::types::QueryParams;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;

/// Offset pagination as an axum middleware
pub async fn offset_pagination(
    State(middleware): State<Arc<OffsetMiddleware>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Err(e) = apply(&mut request, |method, query, ctx| {
        middleware.process(method, query, ctx)
    }) {
        return e.into_response();
    }
    next.run(request).await
}

/// Cursor pagination as an axum middleware
pub async fn cursor_pagination(
    State(middleware): State<Arc<CursorMiddleware>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Err(e) = apply(&mut request, |method, query, ctx| {
        middleware.process(method, query, ctx)
    }) {
        return e.into_response();
    }
    next.run(request).await
}

/// Run a middleware against the request's method, query, and context.
///
/// The context is only stored back when something was attached, so a
/// bypassed request keeps no pagination extension.
fn apply(
    request: &mut Request,
    process: impl FnOnce(&str, &QueryParams, &mut PaginationContext) -> Result<()>,
) -> Result<()> {
    let method = request.method().clone();
    let query = QueryParams::parse(request.uri().query().unwrap_or_default());

    let mut ctx = request
        .extensions_mut()
        .remove::<PaginationContext>()
        .unwrap_or_default();
    let result = process(method.as_str(), &query, &mut ctx);
    if !ctx.is_empty() {
        request.extensions_mut().insert(ctx);
    }
    result
}

#[async_trait]
impl<S> FromRequestParts<S> for PaginationContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    /// Whatever the pagination middlewares attached; empty when bypassed
    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<PaginationContext>()
            .cloned()
            .unwrap_or_default())
    }
}

impl Error {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidPaginationValues { .. } | Error::CursorDecode { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CursorOptions, OffsetOptions};
    use axum::body::Body;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            Error::invalid_values("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::cursor_decode("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::config("bad").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_apply_leaves_bypassed_request_untouched() {
        let middleware = OffsetMiddleware::default();
        let mut request = axum::http::Request::builder()
            .method("POST")
            .uri("/items?page=x")
            .body(Body::empty())
            .unwrap();

        apply(&mut request, |m, q, c| middleware.process(m, q, c)).unwrap();

        assert!(request.extensions().get::<PaginationContext>().is_none());
    }

    #[test]
    fn test_apply_merges_into_existing_context() {
        let offset = OffsetMiddleware::new(OffsetOptions::new());
        let cursor = CursorMiddleware::new(CursorOptions::new());
        let mut request = axum::http::Request::builder()
            .uri("/items?page=2&pageSize=10")
            .body(Body::empty())
            .unwrap();

        apply(&mut request, |m, q, c| offset.process(m, q, c)).unwrap();
        apply(&mut request, |m, q, c| cursor.process(m, q, c)).unwrap();

        let ctx = request.extensions().get::<PaginationContext>().unwrap();
        assert_eq!(ctx.offset.unwrap().skip, 10);
        assert!(ctx.cursor.is_some());
    }

    #[test]
    fn test_apply_returns_error() {
        let middleware = OffsetMiddleware::default();
        let mut request = axum::http::Request::builder()
            .uri("/items")
            .body(Body::empty())
            .unwrap();

        let err = apply(&mut request, |m, q, c| middleware.process(m, q, c)).unwrap_err();

        assert!(err.is_invalid_values());
        assert!(request.extensions().get::<PaginationContext>().is_none());
    }
}
