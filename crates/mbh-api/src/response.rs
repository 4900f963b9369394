//! JSON envelope returned by the AJAX endpoint

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{success, message?, ...payload}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AjaxResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AjaxResponse {
    /// Object payloads are flattened into the envelope; anything else lands under `data`.
    pub fn success(payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload: Map::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: Map::new(),
        }
    }
}

impl IntoResponse for AjaxResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
