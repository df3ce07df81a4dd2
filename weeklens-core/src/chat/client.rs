//! HTTP client for the remote assistant.
//!
//! Contract: `POST <endpoint>` with `{"message": "..."}`, answered by
//! `{"response": "..."}`. One request per submission, no retries. Anything
//! other than a 2xx response carrying a string `response` field is an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::error::{Error, Result};

/// Request body for the assistant endpoint
#[derive(Serialize)]
struct AskRequest<'a> {
    message: &'a str,
}

/// Response body from the assistant endpoint
#[derive(Debug, Deserialize)]
struct AskResponse {
    response: String,
}

/// HTTP client for the assistant endpoint
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl AssistantClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message and wait for the full reply.
    pub async fn ask(&self, message: &str) -> Result<String> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AskRequest { message })
            .send()
            .await
            .map_err(|e| Error::Assistant(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Assistant(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Assistant(format!("API error ({}): {}", status, body)));
        }

        parse_reply(&body)
    }
}

/// Extract the assistant text from a response body.
pub fn parse_reply(body: &str) -> Result<String> {
    let reply: AskResponse = serde_json::from_str(body)
        .map_err(|e| Error::Assistant(format!("failed to parse response: {}", e)))?;
    Ok(reply.response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}/", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn client_for(endpoint: String) -> AssistantClient {
        AssistantClient::new(&AssistantConfig {
            endpoint,
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(
            parse_reply(r#"{"response": "hi there"}"#).unwrap(),
            "hi there"
        );
        // Extra fields are fine
        assert_eq!(
            parse_reply(r#"{"response": "ok", "sources": []}"#).unwrap(),
            "ok"
        );
    }

    #[test]
    fn test_parse_reply_missing_field_is_error() {
        assert!(matches!(
            parse_reply(r#"{"answer": "hi"}"#),
            Err(Error::Assistant(_))
        ));
        assert!(parse_reply(r#"{"response": null}"#).is_err());
        assert!(parse_reply(r#"{"response": 42}"#).is_err());
        assert!(parse_reply("<html>502</html>").is_err());
    }

    #[test]
    fn test_client_requires_valid_config() {
        let config = AssistantConfig {
            endpoint: "nowhere".to_string(),
            ..Default::default()
        };
        assert!(AssistantClient::new(&config).is_err());
        assert!(AssistantClient::new(&AssistantConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_ask_posts_message_json() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"response":"hi there"}"#).await;
        let client = client_for(endpoint);

        let reply = client.ask("hello").await.unwrap();
        assert_eq!(reply, "hi there");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST / HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"message":"hello"}"#));
    }

    #[tokio::test]
    async fn test_ask_server_error() {
        let (endpoint, server) =
            serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = client_for(endpoint);

        let err = client.ask("hello").await.unwrap_err();
        assert!(err.to_string().contains("500"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ask_without_response_field() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"detail":"nope"}"#).await;
        let client = client_for(endpoint);

        assert!(matches!(
            client.ask("hello").await,
            Err(Error::Assistant(_))
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ask_connection_refused() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/", addr));
        assert!(client.ask("hello").await.is_err());
    }
}
