//! Perplexity chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AvailabilityLookup, EnrichmentError};
use crate::domain::ott::{extract_services_from_text, parse_services_json};
use crate::domain::OttService;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct PerplexityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.perplexity.ai".to_string(),
            model: "llama-3.1-sonar-small-128k-online".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn prompt(title: &str, year: i32) -> String {
    format!(
        r#"Find where the movie "{title}" ({year}) is available to watch online. Include streaming services, rental options, and purchase options. Format the response as JSON with this structure:
{{
  "services": [
    {{
      "name": "Service Name",
      "type": "stream|rent|buy",
      "price": "price if applicable",
      "quality": "HD|4K if available",
      "regions": ["US", "UK", etc],
      "url": "direct link if available"
    }}
  ]
}}"#
    )
}

#[derive(Debug, Clone)]
pub struct PerplexityClient {
    client: Client,
    config: PerplexityConfig,
}

impl PerplexityClient {
    pub fn new(config: PerplexityConfig) -> Result<Self, EnrichmentError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn ask(&self, api_key: &str, content: String) -> Result<String, EnrichmentError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Perplexity request failed");
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(EnrichmentError::MissingContent)
    }
}

#[async_trait]
impl AvailabilityLookup for PerplexityClient {
    async fn lookup(&self, title: &str, year: i32) -> Result<Vec<OttService>, EnrichmentError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(EnrichmentError::MissingCredential),
        };

        let content = self.ask(api_key, prompt(title, year)).await?;
        match parse_services_json(&content) {
            Some(services) => Ok(services),
            None => {
                debug!(title, "Answer was not JSON, scanning text");
                Ok(extract_services_from_text(&content))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OttServiceType;
    use mockito::{Matcher, Server};

    fn client(base_url: String, api_key: Option<&str>) -> PerplexityClient {
        PerplexityClient::new(PerplexityConfig {
            api_key: api_key.map(String::from),
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    fn completion(content: &str) -> String {
        serde_json::json!({ "choices": [{ "message": { "content": content } }] }).to_string()
    }

    #[tokio::test]
    async fn parses_json_answer() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama-3.1-sonar-small-128k-online",
                "max_tokens": 1000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(
                r#"{"services":[{"name":"Max","type":"stream","quality":"4K","regions":["US"]}]}"#,
            ))
            .create_async()
            .await;

        let services = client(server.url(), Some("test-key"))
            .lookup("Dune: Part Two", 2024)
            .await
            .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Max");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn falls_back_to_keyword_scan_on_prose() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("Streaming on Hulu. You can also rent it."))
            .create_async()
            .await;

        let services = client(server.url(), Some("k"))
            .lookup("Oppenheimer", 2023)
            .await
            .unwrap();
        assert_eq!(services[0].name, "Hulu");
        assert_eq!(services[1].service_type, OttServiceType::Rent);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let err = client(server.url(), Some("k"))
            .lookup("Oppenheimer", 2023)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrichmentError::Status(500)));
    }

    #[tokio::test]
    async fn missing_content_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client(server.url(), Some("k"))
            .lookup("Oppenheimer", 2023)
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "missing_content");
    }

    #[tokio::test]
    async fn no_key_skips_the_request() {
        let c = client("http://127.0.0.1:9".into(), None);
        assert!(!c.has_credential());
        let err = c.lookup("Oppenheimer", 2023).await.unwrap_err();
        assert!(matches!(err, EnrichmentError::MissingCredential));
    }
}
