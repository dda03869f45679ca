//! Response transport

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Where a formatted body is sent
pub trait ResponseSink {
    /// Set the HTTP status of the response
    fn set_status(&mut self, status: StatusCode) -> &mut Self;

    /// Emit the response body
    fn send(&mut self, body: JsonValue);
}

/// In-memory sink that becomes an axum JSON response
#[derive(Debug, Clone, PartialEq)]
pub struct JsonReply {
    status: StatusCode,
    body: Option<JsonValue>,
}

impl JsonReply {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&JsonValue> {
        self.body.as_ref()
    }
}

impl Default for JsonReply {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for JsonReply {
    fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    fn send(&mut self, body: JsonValue) {
        self.body = Some(body);
    }
}

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Assemble `{ data, pagination, ...extra }`
pub(crate) fn paginated_body<T: Serialize, P: Serialize>(
    data: &[T],
    pagination: &P,
    extra: JsonObject,
) -> Result<JsonValue> {
    let mut body = JsonObject::new();
    body.insert("data".to_string(), serde_json::to_value(data)?);
    body.insert("pagination".to_string(), serde_json::to_value(pagination)?);
    body.extend(extra);
    Ok(JsonValue::Object(body))
}
