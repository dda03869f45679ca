//! Middleware configuration
//!
//! Each middleware is configured once, at route registration, from a partial
//! options struct. `OffsetConfig::build` / `CursorConfig::build` merge the
//! options with the defaults below and produce an immutable config that is
//! shared by every request on the route.
//!
//! Options can also be loaded from YAML:
//!
//! ```yaml
//! offset:
//!   supportedHttpMethods: [GET, POST]
//!   pageParamName: p
//!   fallBackValues:
//!     defaultPageValue: 1
//!     defaultPageSizeValue: 20
//! cursor:
//!   cursorParamName: cursor
//!   fallBackValues: false
//! ```

use crate::error::{Error, Result};
use crate::types::{HttpMethod, JsonObject, JsonValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Defaults
// ============================================================================

/// Query parameter holding the page number
pub const DEFAULT_PAGE_PARAM_NAME: &str = "page";

/// Query parameter holding the page size
pub const DEFAULT_PAGE_SIZE_PARAM_NAME: &str = "pageSize";

/// Query parameter holding the Base64 cursor token
pub const DEFAULT_CURSOR_PARAM_NAME: &str = "c";

/// Cursor field holding the last-seen key
pub const DEFAULT_LAST_PROPERTY_NAME: &str = "last";

/// Cursor field holding the page limit
pub const DEFAULT_LIMIT_PROPERTY_NAME: &str = "limit";

/// Error message used when no message is configured
pub const DEFAULT_INVALID_VALUES_MESSAGE: &str =
    "One or more required pagination values are missing";

/// Methods processed when no method list is configured
pub fn default_supported_methods() -> Vec<HttpMethod> {
    vec![HttpMethod::GET]
}

// ============================================================================
// Fallback Policy
// ============================================================================

/// What to do when pagination input is missing or rejected
///
/// Written as `false` or as a mapping of substitute values in config files.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FallbackPolicy<T> {
    /// Invalid input is a hard error
    #[default]
    Disabled,
    /// Invalid input is replaced by these values
    Enabled(T),
}

impl<T> FallbackPolicy<T> {
    /// The substitute values, if enabled
    pub fn values(&self) -> Option<&T> {
        match self {
            FallbackPolicy::Disabled => None,
            FallbackPolicy::Enabled(values) => Some(values),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, FallbackPolicy::Enabled(_))
    }
}

impl<T: Serialize> Serialize for FallbackPolicy<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FallbackPolicy::Disabled => serializer.serialize_bool(false),
            FallbackPolicy::Enabled(values) => values.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FallbackPolicy<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Flag(bool),
            Values(T),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => Ok(FallbackPolicy::Disabled),
            Repr::Flag(true) => Err(serde::de::Error::custom(
                "fallBackValues must be `false` or a mapping of default values",
            )),
            Repr::Values(values) => Ok(FallbackPolicy::Enabled(values)),
        }
    }
}

/// Substitute values for offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetFallback {
    #[serde(default)]
    pub default_page_value: i64,
    #[serde(default)]
    pub default_page_size_value: i64,
}

impl OffsetFallback {
    pub fn new(default_page_value: i64, default_page_size_value: i64) -> Self {
        Self {
            default_page_value,
            default_page_size_value,
        }
    }

    /// Both values must be non-zero to be used
    pub fn is_usable(&self) -> bool {
        self.default_page_value != 0 && self.default_page_size_value != 0
    }
}

/// Substitute values for cursor pagination
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorFallback {
    /// Last-seen value; `Some(Null)` is an explicit "no starting point",
    /// `None` means the value was never configured.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_last: Option<JsonValue>,
    #[serde(default)]
    pub default_limit: i64,
}

impl CursorFallback {
    pub fn new(default_last: impl Into<JsonValue>, default_limit: i64) -> Self {
        Self {
            default_last: Some(default_last.into()),
            default_limit,
        }
    }

    /// A last value must be defined (null counts) and the limit must be non-zero
    pub fn is_usable(&self) -> bool {
        self.default_last.is_some() && self.default_limit != 0
    }
}

fn deserialize_present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

// ============================================================================
// Validators
// ============================================================================

/// Acceptance predicate for parsed `(page, page_size)` values
#[derive(Clone)]
pub struct OffsetValidator(Arc<dyn Fn(i64, i64) -> bool + Send + Sync>);

impl OffsetValidator {
    pub fn new(f: impl Fn(i64, i64) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn validate(&self, page: i64, page_size: i64) -> bool {
        (self.0)(page, page_size)
    }
}

impl Default for OffsetValidator {
    /// Accepts `page >= 1 && page_size >= 1`
    fn default() -> Self {
        Self::new(|page, page_size| page >= 1 && page_size >= 1)
    }
}

impl fmt::Debug for OffsetValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OffsetValidator(..)")
    }
}

/// Acceptance predicate for a decoded cursor (`None` when no cursor was sent)
#[derive(Clone)]
pub struct CursorValidator(Arc<dyn Fn(Option<&JsonObject>) -> bool + Send + Sync>);

impl CursorValidator {
    pub fn new(f: impl Fn(Option<&JsonObject>) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn validate(&self, cursor: Option<&JsonObject>) -> bool {
        (self.0)(cursor)
    }
}

impl Default for CursorValidator {
    /// Accepts everything
    fn default() -> Self {
        Self::new(|_| true)
    }
}

impl fmt::Debug for CursorValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CursorValidator(..)")
    }
}

// ============================================================================
// Offset Config
// ============================================================================

/// Partial options for the offset middleware; unset fields take defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OffsetOptions {
    #[serde(default)]
    pub supported_http_methods: Option<Vec<HttpMethod>>,
    #[serde(default)]
    pub disable_pagination: Option<bool>,
    #[serde(default)]
    pub page_param_name: Option<String>,
    #[serde(default)]
    pub page_size_param_name: Option<String>,
    #[serde(default)]
    pub fall_back_values: Option<FallbackPolicy<OffsetFallback>>,
    #[serde(default)]
    pub invalid_values_message: Option<String>,
    #[serde(skip)]
    pub validator: Option<OffsetValidator>,
}

impl OffsetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supported_methods(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.supported_http_methods = Some(methods.into_iter().collect());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disable_pagination = Some(disabled);
        self
    }

    pub fn with_page_param_name(mut self, name: impl Into<String>) -> Self {
        self.page_param_name = Some(name.into());
        self
    }

    pub fn with_page_size_param_name(mut self, name: impl Into<String>) -> Self {
        self.page_size_param_name = Some(name.into());
        self
    }

    pub fn with_fallback(mut self, fallback: OffsetFallback) -> Self {
        self.fall_back_values = Some(FallbackPolicy::Enabled(fallback));
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.fall_back_values = Some(FallbackPolicy::Disabled);
        self
    }

    pub fn with_validator(mut self, f: impl Fn(i64, i64) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(OffsetValidator::new(f));
        self
    }

    pub fn with_invalid_values_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_values_message = Some(message.into());
        self
    }
}

/// Fully merged offset middleware configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetConfig {
    pub supported_http_methods: Vec<HttpMethod>,
    pub disable_pagination: bool,
    pub page_param_name: String,
    pub page_size_param_name: String,
    pub fall_back_values: FallbackPolicy<OffsetFallback>,
    pub invalid_values_message: String,
    #[serde(skip)]
    pub validator: OffsetValidator,
}

impl OffsetConfig {
    /// Merge options with the defaults
    pub fn build(options: OffsetOptions) -> Self {
        Self {
            supported_http_methods: options
                .supported_http_methods
                .unwrap_or_else(default_supported_methods),
            disable_pagination: options.disable_pagination.unwrap_or(false),
            page_param_name: options
                .page_param_name
                .unwrap_or_else(|| DEFAULT_PAGE_PARAM_NAME.to_string()),
            page_size_param_name: options
                .page_size_param_name
                .unwrap_or_else(|| DEFAULT_PAGE_SIZE_PARAM_NAME.to_string()),
            fall_back_values: options.fall_back_values.unwrap_or_default(),
            invalid_values_message: options
                .invalid_values_message
                .unwrap_or_else(|| DEFAULT_INVALID_VALUES_MESSAGE.to_string()),
            validator: options.validator.unwrap_or_default(),
        }
    }

    /// Check whether requests with this method are processed
    pub fn supports(&self, method: &str) -> bool {
        supports(&self.supported_http_methods, method)
    }
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self::build(OffsetOptions::default())
    }
}

// ============================================================================
// Cursor Config
// ============================================================================

/// Partial options for the cursor middleware; unset fields take defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CursorOptions {
    #[serde(default)]
    pub supported_http_methods: Option<Vec<HttpMethod>>,
    #[serde(default)]
    pub disable_pagination: Option<bool>,
    #[serde(default)]
    pub cursor_param_name: Option<String>,
    #[serde(default)]
    pub last_property_name: Option<String>,
    #[serde(default)]
    pub limit_property_name: Option<String>,
    #[serde(default)]
    pub fall_back_values: Option<FallbackPolicy<CursorFallback>>,
    #[serde(default)]
    pub invalid_values_message: Option<String>,
    #[serde(skip)]
    pub validator: Option<CursorValidator>,
}

impl CursorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supported_methods(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.supported_http_methods = Some(methods.into_iter().collect());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disable_pagination = Some(disabled);
        self
    }

    pub fn with_cursor_param_name(mut self, name: impl Into<String>) -> Self {
        self.cursor_param_name = Some(name.into());
        self
    }

    pub fn with_last_property_name(mut self, name: impl Into<String>) -> Self {
        self.last_property_name = Some(name.into());
        self
    }

    pub fn with_limit_property_name(mut self, name: impl Into<String>) -> Self {
        self.limit_property_name = Some(name.into());
        self
    }

    pub fn with_fallback(mut self, fallback: CursorFallback) -> Self {
        self.fall_back_values = Some(FallbackPolicy::Enabled(fallback));
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.fall_back_values = Some(FallbackPolicy::Disabled);
        self
    }

    pub fn with_validator(
        mut self,
        f: impl Fn(Option<&JsonObject>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(CursorValidator::new(f));
        self
    }

    pub fn with_invalid_values_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_values_message = Some(message.into());
        self
    }
}

/// Fully merged cursor middleware configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorConfig {
    pub supported_http_methods: Vec<HttpMethod>,
    pub disable_pagination: bool,
    pub cursor_param_name: String,
    pub last_property_name: String,
    pub limit_property_name: String,
    pub fall_back_values: FallbackPolicy<CursorFallback>,
    pub invalid_values_message: String,
    #[serde(skip)]
    pub validator: CursorValidator,
}

impl CursorConfig {
    /// Merge options with the defaults
    pub fn build(options: CursorOptions) -> Self {
        Self {
            supported_http_methods: options
                .supported_http_methods
                .unwrap_or_else(default_supported_methods),
            disable_pagination: options.disable_pagination.unwrap_or(false),
            cursor_param_name: options
                .cursor_param_name
                .unwrap_or_else(|| DEFAULT_CURSOR_PARAM_NAME.to_string()),
            last_property_name: options
                .last_property_name
                .unwrap_or_else(|| DEFAULT_LAST_PROPERTY_NAME.to_string()),
            limit_property_name: options
                .limit_property_name
                .unwrap_or_else(|| DEFAULT_LIMIT_PROPERTY_NAME.to_string()),
            fall_back_values: options.fall_back_values.unwrap_or_default(),
            invalid_values_message: options
                .invalid_values_message
                .unwrap_or_else(|| DEFAULT_INVALID_VALUES_MESSAGE.to_string()),
            validator: options.validator.unwrap_or_default(),
        }
    }

    /// Check whether requests with this method are processed
    pub fn supports(&self, method: &str) -> bool {
        supports(&self.supported_http_methods, method)
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self::build(CursorOptions::default())
    }
}

fn supports(methods: &[HttpMethod], method: &str) -> bool {
    methods.iter().any(|m| m.matches(method))
}

// ============================================================================
// Config Files
// ============================================================================

/// Options for both middlewares, as read from a config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagifyConfig {
    #[serde(default)]
    pub offset: OffsetOptions,
    #[serde(default)]
    pub cursor: CursorOptions,
}

/// Load middleware options from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<PagifyConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load middleware options from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<PagifyConfig> {
    let config: PagifyConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}
