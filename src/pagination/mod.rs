//! Pagination module
//!
//! Supports: Offset (page/pageSize) and Cursor (Base64 JSON token)
//!
//! # Overview
//!
//! Both middlewares follow the same decision: parse the raw query input,
//! run the configured validator, and if the input is missing or rejected
//! either substitute the configured fallback values or fail with
//! [`Error::InvalidPaginationValues`](crate::Error::InvalidPaginationValues).
//! The result is stored on the request's [`PaginationContext`].

mod codec;
mod cursor;
mod offset;
mod policy;
mod types;

pub use codec::{decode_cursor, encode_cursor};
pub use cursor::CursorMiddleware;
pub use offset::{parse_int, OffsetMiddleware};
pub use types::{CursorPagination, OffsetPagination, PaginationContext};
