//! Response module
//!
//! Formatters that turn a page of data plus its pagination descriptor into
//! a consistent response body and emit it through a [`ResponseSink`].
//!
//! Body shapes:
//!
//! ```text
//! offset: { data, pagination: { page, pageSize, skip, total, totalPages, hasNext, hasPrevious }, ...extra }
//! cursor: { data, pagination: { nextCursor, prevCursor, hasNext, hasPrevious, limit, count }, ...extra }
//! ```
//!
//! `extra` keys are merged last at the top level and win over `data` and
//! `pagination`.

mod cursor;
mod offset;
mod sink;

pub use cursor::{cursor_based_response, CursorPageInfo, CursorResponseOptions};
pub use offset::{offset_based_response, OffsetPageInfo, OffsetResponseOptions};
pub use sink::{JsonReply, ResponseSink};

#[cfg(test)]
mod tests;
