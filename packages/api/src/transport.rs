//! HTTP plumbing behind [`FleetClient`](crate::FleetClient).
//!
//! [`Transport`] is the seam between the client's request policy (bearer
//! tokens, status mapping, the 401 handler) and the wire. The browser build
//! uses [`ReqwestTransport`]; tests script responses with a fake.

use serde_json::Value;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A single file part of a multipart form.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipartFile {
    pub field: String,
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartFile),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API origin, starting with `/api/`.
    pub path: String,
    pub bearer: Option<String>,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field of a JSON error body, if present.
    pub fn message(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}

/// Sends one request and returns the raw response. Non-2xx statuses are
/// returned as responses; only network failures are errors.
pub trait Transport: Clone + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport. On wasm32 reqwest drives the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.mime)?;
                builder.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_message() {
        let response = ApiResponse {
            status: 400,
            body: br#"{"message":"Vehicle already exists"}"#.to_vec(),
        };
        assert_eq!(response.message().as_deref(), Some("Vehicle already exists"));
        assert!(!response.is_success());

        let response = ApiResponse {
            status: 500,
            body: b"<html>oops</html>".to_vec(),
        };
        assert!(response.message().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = ReqwestTransport::new("http://localhost:3000/");
        assert_eq!(transport.url("/api/vehicle/listall"), "http://localhost:3000/api/vehicle/listall");
    }
}
