//! Cursor token codec
//!
//! A token is the standard Base64 encoding of the cursor's JSON text.
//! There is no versioning or signature: any token that decodes to a JSON
//! object is a cursor.
//!
//! ASCII whitespace in a token is ignored on decode, as `atob` does. A `+`
//! that reached the query string unescaped arrives as a space and is dropped,
//! which usually leaves a token that no longer decodes.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::Serialize;

/// Standard alphabet; padding is written on encode and optional on decode
const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a cursor value as a token
pub fn encode_cursor<T: Serialize + ?Sized>(cursor: &T) -> Result<String> {
    let json = serde_json::to_vec(cursor)?;
    Ok(CURSOR_ENGINE.encode(json))
}

/// Decode a token back into a cursor object
pub fn decode_cursor(token: &str) -> Result<JsonObject> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = CURSOR_ENGINE
        .decode(compact)
        .map_err(|e| Error::cursor_decode(format!("not valid Base64: {e}")))?;

    let value: JsonValue = serde_json::from_slice(&bytes)
        .map_err(|e| Error::cursor_decode(format!("not valid JSON: {e}")))?;

    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::cursor_decode(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
