//! HTTP response type.

use std::collections::HashMap;

/// An HTTP response from the Gitea API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased names (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty bodies become `{}`.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as a JSON object, if it is one.
    #[must_use]
    pub const fn body_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match &self.body {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-total-count".to_string(), vec!["42".to_string()]);
        let response = HttpResponse::new(200, headers, json!([]));

        assert_eq!(response.header("X-Total-Count"), Some("42"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_body_object() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"id": 1}));
        assert_eq!(response.body_object().unwrap().get("id"), Some(&json!(1)));

        let response = HttpResponse::new(200, HashMap::new(), json!([1, 2]));
        assert!(response.body_object().is_none());
    }
}
