//! HTTP client for the chat backend.
//!
//! One call to [`ChatClient::send`] issues exactly one `POST` carrying
//! `{"message": ...}` and hands back the decoded JSON body. The HTTP status is
//! not treated as a failure on its own; only transport errors and bodies that
//! cannot be read as a JSON value are.

use reqwest::{header, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Request body sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// Text typed by the user, sent as-is.
    pub message: String,
}

/// Decoded reply body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    body: Value,
}

impl ChatResponse {
    /// Wrap an already decoded body.
    pub fn from_value(body: Value) -> Self {
        Self { body }
    }

    /// The raw JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Text of the `response` field, if it is present and truthy.
    ///
    /// Missing, `null`, `false`, `0` and `""` count as absent. Strings are used
    /// verbatim; any other value is rendered as JSON text.
    #[allow(clippy::float_cmp)]
    pub fn reply_text(&self) -> Option<String> {
        let value = self.body.get("response")?;
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Client bound to a single chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ChatClient {
    /// Create a client posting to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one message and decode the reply body.
    pub async fn send(&self, message: &str) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        debug!(endpoint = %self.endpoint, "Posting chat message");
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint = %self.endpoint, "Chat backend returned non-success status");
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;
        if body.is_null() {
            return Err(ClientError::NullBody);
        }

        Ok(ChatResponse::from_value(body))
    }
}

/// Errors that can occur while talking to the chat backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Network or transport failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body was not JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body was the JSON literal `null`.
    #[error("Response body is null")]
    NullBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> ChatClient {
        ChatClient::new(&format!("{}/chat", server.uri())).unwrap()
    }

    #[test]
    fn test_reply_text_truthiness() {
        let cases = [
            (json!({"response": "hi"}), Some("hi".to_string())),
            (json!({}), None),
            (json!({"response": null}), None),
            (json!({"response": ""}), None),
            (json!({"response": false}), None),
            (json!({"response": 0}), None),
            (json!({"response": 42}), Some("42".to_string())),
            (json!({"response": true}), Some("true".to_string())),
            (json!(["response"]), None),
            (json!("plain string"), None),
        ];

        for (body, expected) in cases {
            let response = ChatResponse::from_value(body.clone());
            assert_eq!(response.reply_text(), expected, "body: {body}");
        }
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = ChatClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_send_posts_json_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"message": "Hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there!"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).send("Hello").await.unwrap();
        assert_eq!(response.reply_text().as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn test_send_empty_message_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"message": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).send("").await.unwrap();
        assert_eq!(response.reply_text(), None);
    }

    #[tokio::test]
    async fn test_non_success_status_with_json_body_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"response": "still here"})),
            )
            .mount(&server)
            .await;

        let response = client_for(&server).send("x").await.unwrap();
        assert_eq!(response.reply_text().as_deref(), Some("still here"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).send("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_null_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let err = client_for(&server).send("x").await.unwrap_err();
        assert!(matches!(err, ClientError::NullBody));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        // Bind then drop a listener so the port is closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ChatClient::new(&format!("http://127.0.0.1:{port}/chat")).unwrap();

        let err = client.send("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }
}
