//! Gemini `generateContent` word source.

use std::time::Duration;

use log::debug;
use serde_json::{json, Value};

use super::WordSource;
use crate::config::GenerationConfig;
use crate::engine::prompt::lexicon_prompt;
use crate::types::{CuratorError, CuratorResult};

/// Word source backed by the Gemini REST API.
pub struct GeminiSource {
    model: String,
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiSource {
    /// Build a source from configuration. Fails if the API key variable is
    /// unset or the HTTP client cannot be created.
    pub fn new(config: &GenerationConfig) -> CuratorResult<Self> {
        let api_key = config.resolve_api_key()?;
        Self::with_key(config, api_key)
    }

    /// Build a source with an explicit API key.
    pub fn with_key(config: &GenerationConfig, api_key: impl Into<String>) -> CuratorResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CuratorError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Request URL. The key travels in the `x-goog-api-key` header so it
    /// never appears in URLs echoed by transport errors.
    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }

    /// Request body for one prompt.
    pub fn request_payload(prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        })
    }

    /// Pull the generated text out of a response body.
    pub fn parse_response_text(response_json: &str) -> CuratorResult<String> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| CuratorError::Generation(format!("Malformed response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(CuratorError::Generation(format!("Gemini API error: {}", msg)));
        }

        let text: String = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CuratorError::EmptyResponse);
        }
        Ok(text)
    }
}

impl WordSource for GeminiSource {
    fn name(&self) -> &str {
        "gemini"
    }

    fn fetch_words(&self, topic: &str, count: usize) -> CuratorResult<String> {
        let payload = Self::request_payload(&lexicon_prompt(topic, count));
        debug!("gemini: requesting {} words for {:?}", count, topic);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| {
                CuratorError::Generation(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            CuratorError::Generation(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            return Err(CuratorError::Generation(format!("Gemini API error: {}", msg)));
        }

        Self::parse_response_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"respawn, hitbox"}]}}]}"#;
        assert_eq!(
            GeminiSource::parse_response_text(body).unwrap(),
            "respawn, hitbox"
        );
    }

    #[test]
    fn test_parse_joins_parts() {
        let body =
            r#"{"candidates":[{"content":{"parts":[{"text":"respawn, "},{"text":"hitbox"}]}}]}"#;
        assert_eq!(
            GeminiSource::parse_response_text(body).unwrap(),
            "respawn, hitbox"
        );
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        match GeminiSource::parse_response_text(body) {
            Err(CuratorError::Generation(msg)) => assert!(msg.contains("API key not valid")),
            other => panic!("Expected Generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(matches!(
            GeminiSource::parse_response_text(r#"{"candidates":[]}"#),
            Err(CuratorError::EmptyResponse)
        ));
        assert!(matches!(
            GeminiSource::parse_response_text("<html>"),
            Err(CuratorError::Generation(_))
        ));
    }

    #[test]
    fn test_url_uses_config() {
        let config = GenerationConfig {
            endpoint: "http://localhost:9/models/".into(),
            model: "test-model".into(),
            ..GenerationConfig::default()
        };
        let source = GeminiSource::with_key(&config, "k").unwrap();
        assert_eq!(
            source.url(),
            "http://localhost:9/models/test-model:generateContent"
        );
    }

    // ==================== HTTP round trips ====================

    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    const KEY: &str = "test-key-0042";

    /// Serve one canned HTTP response; the raw request head is sent back
    /// on the returned channel.
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/models", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                head.push_str(&line);
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            tx.send(head).unwrap();
        });
        (endpoint, rx)
    }

    fn source_at(endpoint: &str) -> GeminiSource {
        let config = GenerationConfig {
            endpoint: endpoint.to_string(),
            timeout_secs: 5,
            ..GenerationConfig::default()
        };
        GeminiSource::with_key(&config, KEY).unwrap()
    }

    #[test]
    fn test_fetch_sends_key_in_header() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"respawn, hitbox"}]}}]}"#;
        let (endpoint, rx) = serve_once("200 OK", body);
        let text = source_at(&endpoint).fetch_words("Gaming", 2).unwrap();
        assert_eq!(text, "respawn, hitbox");

        let head = rx.recv().unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("POST /models/gemini-1.5-pro:generateContent "));
        assert!(!request_line.contains(KEY));
        assert!(head
            .to_ascii_lowercase()
            .contains(&format!("x-goog-api-key: {}", KEY)));
    }

    #[test]
    fn test_fetch_error_status_with_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        let (endpoint, _rx) = serve_once("429 Too Many Requests", body);
        match source_at(&endpoint).fetch_words("Gaming", 2) {
            Err(CuratorError::Generation(msg)) => {
                assert!(msg.contains("Resource has been exhausted"), "{}", msg)
            }
            other => panic!("Expected Generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_status_with_plain_body() {
        let (endpoint, _rx) = serve_once("502 Bad Gateway", "upstream down");
        match source_at(&endpoint).fetch_words("Gaming", 2) {
            Err(CuratorError::Generation(msg)) => {
                assert!(msg.contains("502"), "{}", msg);
                assert!(msg.contains("upstream down"), "{}", msg);
            }
            other => panic!("Expected Generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_ok_without_candidates() {
        let (endpoint, _rx) = serve_once("200 OK", r#"{"candidates":[]}"#);
        assert!(matches!(
            source_at(&endpoint).fetch_words("Gaming", 2),
            Err(CuratorError::EmptyResponse)
        ));
    }

    #[test]
    fn test_transport_error_hides_key() {
        // Bind then drop so the port is known to refuse connections.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("http://127.0.0.1:{}/models", port);
        let err = source_at(&endpoint).fetch_words("Gaming", 2).unwrap_err();
        assert!(err.is_generation_failure());
        assert!(!err.to_string().contains(KEY), "{}", err);
    }
}
