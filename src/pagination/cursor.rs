//! Cursor-based pagination middleware
//!
//! Reads a Base64 JSON token from the query string, validates the decoded
//! object, and attaches a [`CursorPagination`].

use super::codec::decode_cursor;
use super::policy::resolve;
use super::types::{CursorPagination, PaginationContext};
use crate::config::{CursorConfig, CursorOptions};
use crate::error::Result;
use crate::types::{JsonObject, JsonValue, QueryParams};
use tracing::debug;

/// Cursor pagination middleware
#[derive(Debug, Clone, Default)]
pub struct CursorMiddleware {
    config: CursorConfig,
}

impl CursorMiddleware {
    /// Create a middleware, merging `options` with the defaults
    pub fn new(options: CursorOptions) -> Self {
        Self::from_config(CursorConfig::build(options))
    }

    /// Create a middleware from an already merged config
    pub fn from_config(config: CursorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// Process one request.
    ///
    /// Same bypass rules as the offset middleware; only `ctx.cursor` is written.
    pub fn process(
        &self,
        method: &str,
        query: &QueryParams,
        ctx: &mut PaginationContext,
    ) -> Result<()> {
        if self.config.disable_pagination {
            debug!("Cursor pagination disabled, skipping");
            return Ok(());
        }
        if !self.config.supports(method) {
            debug!(method, "Cursor pagination not enabled for method, skipping");
            return Ok(());
        }

        ctx.cursor = Some(self.resolve(query)?);
        Ok(())
    }

    /// Compute the cursor descriptor for a query, ignoring method filtering.
    ///
    /// A token that fails to decode is treated as if no cursor was sent.
    pub fn resolve(&self, query: &QueryParams) -> Result<CursorPagination> {
        let config = &self.config;

        let decoded = query
            .get_str(&config.cursor_param_name)
            .and_then(|token| match decode_cursor(token) {
                Ok(cursor) => Some(cursor),
                Err(e) => {
                    debug!(error = %e, "Discarding undecodable cursor");
                    None
                }
            });

        let accepted = config
            .validator
            .validate(decoded.as_ref())
            .then_some(decoded);

        let resolved = resolve(
            accepted,
            &config.fall_back_values,
            &config.invalid_values_message,
            |fallback| {
                if !fallback.is_usable() {
                    return None;
                }
                let mut cursor = JsonObject::new();
                cursor.insert(
                    config.last_property_name.clone(),
                    fallback.default_last.clone().unwrap_or(JsonValue::Null),
                );
                cursor.insert(
                    config.limit_property_name.clone(),
                    JsonValue::from(fallback.default_limit),
                );
                Some(Some(cursor))
            },
        )?;

        Ok(CursorPagination {
            cursor: resolved.value,
            used_fallback: resolved.used_fallback,
        })
    }
}
