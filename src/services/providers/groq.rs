/// Groq chat-completions provider
///
/// Groq exposes an OpenAI-compatible `/chat/completions` endpoint. Each call
/// sends the persona as the system message and the product prompt as the user
/// message, with a low temperature and a small token ceiling so replies stay
/// short and factual.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::providers::ExplanationProvider,
};

/// Connection and sampling settings for the Groq API
#[derive(Clone)]
pub struct GroqSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for GroqSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqSettings")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct GroqProvider {
    http_client: HttpClient,
    settings: GroqSettings,
}

impl GroqProvider {
    pub fn new(settings: GroqSettings) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn build_request<'a>(&'a self, persona: &'a str, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: persona,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            stream: false,
        }
    }
}

/// Pulls the first non-blank completion out of a response
fn first_completion(response: ChatCompletionResponse) -> AppResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::ExternalApi("Completion contained no text".to_string()))
}

#[async_trait::async_trait]
impl ExplanationProvider for GroqProvider {
    async fn generate(&self, persona: &str, prompt: &str) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.settings.api_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.build_request(persona, prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = first_completion(completion)?;

        tracing::debug!(
            provider = "groq",
            model = %self.settings.model,
            chars = text.len(),
            "Explanation generated"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}
