//! Outgoing API request description

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used against the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the remote API, built per call and never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path appended to the base URL, e.g. `/products/4`
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    /// Headers applied after the defaults; they win on name collision
    pub extra_headers: HashMap<String, String>,
    /// Attach the stored bearer token, if any
    pub authorize: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            extra_headers: HashMap::new(),
            authorize: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Send without the bearer token, used by the login call
    pub fn anonymous(mut self) -> Self {
        self.authorize = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_defaults() {
        let req = ApiRequest::get("/products");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/products");
        assert!(req.body.is_none());
        assert!(req.extra_headers.is_empty());
        assert!(req.authorize);
    }

    #[test]
    fn test_post_with_headers() {
        let req = ApiRequest::post("/categories", json!({"name": "Shoes"}))
            .with_header("X-Trace", "abc")
            .anonymous();

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.body, Some(json!({"name": "Shoes"})));
        assert_eq!(req.extra_headers.get("X-Trace").map(String::as_str), Some("abc"));
        assert!(!req.authorize);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
