use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{log_debug, log_warn};

use super::response::{candidate_text, parse_analysis};
use super::schema::{response_schema, SYSTEM_INSTRUCTION, USER_PROMPT};
use super::{VisionClient, VisionConfig, VisionError};
use crate::models::AnalysisResult;

const ENABLE_LOGS: bool = true;

/// Calls the Gemini `generateContent` REST endpoint.
///
/// The HTTP client is built without a timeout, leaving it to the transport.
#[derive(Debug)]
pub struct GeminiVisionClient {
    client: reqwest::Client,
    config: VisionConfig,
}

impl GeminiVisionClient {
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| VisionError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, image_base64: &str, mime_type: &str) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": mime_type, "data": image_base64 } },
                    { "text": USER_PROMPT },
                ]
            }],
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": self.config.temperature,
            }
        })
    }
}

#[async_trait]
impl VisionClient for GeminiVisionClient {
    async fn analyze(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<AnalysisResult, VisionError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(VisionError::ConfigurationMissing(
                    "API key not found; set LETSDOG_API_KEY at build time or runtime".into(),
                ))
            }
        };

        log_debug!(
            "Sending analysis request to {} (model {}, {} payload bytes, {})",
            self.config.endpoint,
            self.config.model,
            image_base64.len(),
            mime_type
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(image_base64, mime_type))
            .send()
            .await
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log_warn!("Vision API returned {}", status);
            return Err(VisionError::Transport(format!("HTTP {status}: {body}")));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| VisionError::SchemaViolation(format!("failed to parse API response: {e}")))?;

        parse_analysis(candidate_text(&envelope)?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::test_support::{labrador, LABRADOR_JSON};

    fn client(api_key: Option<&str>) -> GeminiVisionClient {
        let mut config = VisionConfig::new(api_key.map(str::to_string));
        config.endpoint = "http://127.0.0.1:9/v1beta/".into();
        GeminiVisionClient::new(config).unwrap()
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        assert_eq!(
            client(None).url(),
            "http://127.0.0.1:9/v1beta/models/gemini-flash-latest:generateContent"
        );
    }

    #[test]
    fn request_body_carries_image_and_schema() {
        let body = client(None).request_body("AAAA", "image/webp");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/webp");
        assert_eq!(parts[0]["inline_data"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], USER_PROMPT);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["temperature"], 0.4);
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Honden Keuzehulp"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let err = client(None).analyze("AAAA", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, VisionError::ConfigurationMissing(_)));

        let err = client(Some("  ")).analyze("AAAA", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, VisionError::ConfigurationMissing(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let err = client(Some("test-key"))
            .analyze("AAAA", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::Transport(_)));
    }

    /// Serves one canned HTTP response on a local port and returns a client
    /// pointed at it.
    async fn client_answering(status_line: &'static str, body: String) -> GeminiVisionClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        let config = VisionConfig::new(Some("test-key".into()))
            .with_endpoint(format!("http://{addr}/v1beta"));
        GeminiVisionClient::new(config).unwrap()
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn server_error_status_is_transport_error() {
        let client = client_answering(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"error":{"message":"backend unavailable"}}"#.into(),
        )
        .await;

        let err = client.analyze("AAAA", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, VisionError::Transport(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn ok_envelope_yields_analysis() {
        let client = client_answering("HTTP/1.1 200 OK", envelope(LABRADOR_JSON)).await;

        let analysis = client.analyze("AAAA", "image/jpeg").await.unwrap();
        assert_eq!(analysis, labrador());
    }

    #[tokio::test]
    async fn blocked_prompt_is_refusal() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        let client = client_answering("HTTP/1.1 200 OK", body).await;

        let err = client.analyze("AAAA", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, VisionError::ServiceRefused(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_schema_violation() {
        let client = client_answering("HTTP/1.1 200 OK", "<html>oops</html>".into()).await;

        let err = client.analyze("AAAA", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, VisionError::SchemaViolation(_)));
    }
}
