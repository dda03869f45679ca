// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_self)]
#![allow(clippy::unused_async)]

//! # pagify
//!
//! Pagination helpers for axum request handlers.
//!
//! ## Features
//!
//! - **Offset Pagination**: `page` / `pageSize` query parameters → `skip` / `take`
//! - **Cursor Pagination**: opaque Base64 JSON cursor tokens
//! - **Fallback Values**: substitute defaults for missing or rejected input, or fail
//! - **Response Formatters**: consistent `{ data, pagination, ... }` bodies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use pagify::config::{OffsetFallback, OffsetOptions};
//! use pagify::layer::offset_pagination;
//! use pagify::pagination::{OffsetMiddleware, PaginationContext};
//! use pagify::response::{offset_based_response, JsonReply, OffsetResponseOptions};
//! use std::sync::Arc;
//!
//! async fn list_users(pagination: PaginationContext) -> pagify::Result<JsonReply> {
//!     let offset = pagination.offset.unwrap_or_default();
//!     let (users, total) = fetch_users(offset.skip, offset.take).await;
//!
//!     let mut reply = JsonReply::new();
//!     offset_based_response(
//!         &mut reply,
//!         OffsetResponseOptions::from_pagination(users, &offset, total),
//!     )?;
//!     Ok(reply)
//! }
//!
//! let offset = Arc::new(OffsetMiddleware::new(
//!     OffsetOptions::new().with_fallback(OffsetFallback::new(1, 20)),
//! ));
//! let app: Router = Router::new().route(
//!     "/users",
//!     get(list_users).layer(middleware::from_fn_with_state(offset, offset_pagination)),
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! request ─► Middleware ─► handler ─► Responder ─► response
//!            │                        │
//!            ├ OffsetMiddleware        ├ offset_based_response
//!            └ CursorMiddleware        └ cursor_based_response
//!                   │
//!            PaginationContext (request extension)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Middleware configuration and defaults
pub mod config;

/// Pagination middlewares and request context
pub mod pagination;

/// Paginated response formatters
pub mod response;

/// Axum middleware adapters and extractors
pub mod layer;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use config::{
    CursorConfig, CursorFallback, CursorOptions, FallbackPolicy, OffsetConfig, OffsetFallback,
    OffsetOptions,
};
pub use pagination::{
    decode_cursor, encode_cursor, CursorMiddleware, CursorPagination, OffsetMiddleware,
    OffsetPagination, PaginationContext,
};
pub use response::{
    cursor_based_response, offset_based_response, CursorResponseOptions, JsonReply,
    OffsetResponseOptions, ResponseSink,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
