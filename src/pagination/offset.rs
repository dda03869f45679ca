//! Offset-based pagination middleware
//!
//! Reads `page` / `pageSize` (names configurable) from the query string and
//! attaches an [`OffsetPagination`] with the matching `skip` / `take`.

use super::policy::resolve;
use super::types::{OffsetPagination, PaginationContext};
use crate::config::{OffsetConfig, OffsetOptions};
use crate::error::{Error, Result};
use crate::types::QueryParams;
use tracing::{debug, warn};

/// Offset pagination middleware
///
/// Configured once per route; `process` runs once per request.
///
/// ```
/// use pagify::config::{OffsetFallback, OffsetOptions};
/// use pagify::pagination::{OffsetMiddleware, PaginationContext};
/// use pagify::types::QueryParams;
///
/// let middleware = OffsetMiddleware::new(
///     OffsetOptions::new().with_fallback(OffsetFallback::new(1, 10)),
/// );
///
/// let mut ctx = PaginationContext::new();
/// let query = QueryParams::parse("page=3&pageSize=20");
/// middleware.process("GET", &query, &mut ctx).unwrap();
///
/// let offset = ctx.offset.unwrap();
/// assert_eq!((offset.skip, offset.take), (40, 20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OffsetMiddleware {
    config: OffsetConfig,
}

impl OffsetMiddleware {
    /// Create a middleware, merging `options` with the defaults
    pub fn new(options: OffsetOptions) -> Self {
        Self::from_config(OffsetConfig::build(options))
    }

    /// Create a middleware from an already merged config
    pub fn from_config(config: OffsetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OffsetConfig {
        &self.config
    }

    /// Process one request.
    ///
    /// Requests whose method is not supported, or any request when pagination
    /// is disabled, pass through with `ctx` untouched. Otherwise only
    /// `ctx.offset` is written.
    pub fn process(
        &self,
        method: &str,
        query: &QueryParams,
        ctx: &mut PaginationContext,
    ) -> Result<()> {
        if self.config.disable_pagination {
            debug!("Offset pagination disabled, skipping");
            return Ok(());
        }
        if !self.config.supports(method) {
            debug!(method, "Offset pagination not enabled for method, skipping");
            return Ok(());
        }

        ctx.offset = Some(self.resolve(query)?);
        Ok(())
    }

    /// Compute the offset descriptor for a query, ignoring method filtering
    pub fn resolve(&self, query: &QueryParams) -> Result<OffsetPagination> {
        let config = &self.config;
        let message = config.invalid_values_message.as_str();

        let parsed = match (
            query.get_str(&config.page_param_name).and_then(parse_int),
            query.get_str(&config.page_size_param_name).and_then(parse_int),
        ) {
            (Some(page), Some(page_size)) => Some((page, page_size)),
            _ => None,
        };
        let accepted = parsed.filter(|&(page, page_size)| {
            config.validator.validate(page, page_size) && !skip_overflows(page, page_size)
        });

        let resolved = resolve(accepted, &config.fall_back_values, message, |fallback| {
            fallback.is_usable().then_some((
                fallback.default_page_value,
                fallback.default_page_size_value,
            ))
        })?;

        let (page, page_size) = resolved.value;
        match (u64::try_from(page), u64::try_from(page_size)) {
            (Ok(page), Ok(page_size))
                if page >= 1 && page_size >= 1 && (page - 1).checked_mul(page_size).is_some() =>
            {
                Ok(OffsetPagination::from_page(
                    page,
                    page_size,
                    resolved.used_fallback,
                ))
            }
            _ => {
                warn!(page, page_size, "Pagination values out of range: {message}");
                Err(Error::invalid_values(message))
            }
        }
    }
}

/// `(page - 1) * page_size` does not fit in a `u64`
fn skip_overflows(page: i64, page_size: i64) -> bool {
    match (u64::try_from(page), u64::try_from(page_size)) {
        (Ok(page), Ok(page_size)) => page
            .saturating_sub(1)
            .checked_mul(page_size)
            .is_none(),
        _ => false,
    }
}

/// Parse a base-10 integer prefix the way `parseInt(s, 10)` does.
///
/// Leading whitespace is skipped, an optional sign is accepted, and parsing
/// stops at the first non-digit. Returns `None` when there are no digits or
/// the value does not fit in an `i64`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
