//! Normalizing backend responses into payloads or typed failures

use crate::error::GatewayError;
use crate::types::FieldErrors;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A successful response, with the parsed JSON body when there was one
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub payload: Option<Value>,
}

impl ApiResponse {
    /// Read a raw response.
    ///
    /// 204 is never parsed. Other 2xx responses with an empty body also
    /// yield no payload. Non-2xx responses become `RequestRejected`, and a 400
    /// carrying a JSON object keeps that object as field errors.
    pub async fn read(response: Response) -> Result<Self, GatewayError> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Self {
                status,
                payload: None,
            });
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let field_errors = if status == StatusCode::BAD_REQUEST {
                serde_json::from_slice::<serde_json::Map<String, Value>>(&bytes)
                    .ok()
                    .map(FieldErrors::from)
            } else {
                None
            };
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(status = status.as_u16(), "request rejected by backend");
            return Err(GatewayError::RequestRejected {
                status: status.as_u16(),
                field_errors,
                body,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self {
                status,
                payload: None,
            });
        }

        Ok(Self {
            status,
            payload: Some(serde_json::from_slice(&bytes)?),
        })
    }

    /// Decode the payload. A missing payload decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        Ok(serde_json::from_value(self.payload.unwrap_or(Value::Null))?)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}
