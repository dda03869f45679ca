//! Validate, fall back, or fail
//!
//! The decision shared by the offset and cursor middlewares once their raw
//! input has been parsed and run through the validator.

use crate::config::FallbackPolicy;
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// A value the middleware can attach to the request
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved<T> {
    pub value: T,
    pub used_fallback: bool,
}

/// Settle on pagination values for one request.
///
/// `accepted` is the parsed input if it passed validation. Otherwise the
/// fallback policy is consulted: `substitute` builds the replacement from the
/// configured values and returns `None` when they are unusable.
pub(crate) fn resolve<T, F>(
    accepted: Option<T>,
    fallback: &FallbackPolicy<F>,
    message: &str,
    substitute: impl FnOnce(&F) -> Option<T>,
) -> Result<Resolved<T>> {
    if let Some(value) = accepted {
        return Ok(Resolved {
            value,
            used_fallback: false,
        });
    }

    match fallback.values().and_then(substitute) {
        Some(value) => {
            debug!("Pagination input missing or rejected, using fallback values");
            Ok(Resolved {
                value,
                used_fallback: true,
            })
        }
        None => {
            warn!(
                fallback_enabled = fallback.is_enabled(),
                "Pagination input rejected: {message}"
            );
            Err(Error::invalid_values(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_input_wins() {
        let fallback = FallbackPolicy::Enabled(5);
        let resolved = resolve(Some(1), &fallback, "bad", |v| Some(*v)).unwrap();
        assert_eq!(
            resolved,
            Resolved {
                value: 1,
                used_fallback: false
            }
        );
    }

    #[test]
    fn test_rejected_input_uses_fallback() {
        let fallback = FallbackPolicy::Enabled(5);
        let resolved = resolve(None, &fallback, "bad", |v| Some(*v)).unwrap();
        assert_eq!(resolved.value, 5);
        assert!(resolved.used_fallback);
    }

    #[test]
    fn test_disabled_fallback_errors() {
        let fallback: FallbackPolicy<i32> = FallbackPolicy::Disabled;
        let err = resolve(None, &fallback, "bad page", |v| Some(*v)).unwrap_err();
        assert!(err.is_invalid_values());
        assert_eq!(err.to_string(), "bad page");
    }

    #[test]
    fn test_unusable_fallback_errors() {
        let fallback = FallbackPolicy::Enabled(0);
        let err = resolve(None, &fallback, "bad", |v: &i32| (*v != 0).then_some(*v)).unwrap_err();
        assert!(err.is_invalid_values());
    }
}
