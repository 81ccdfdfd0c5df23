use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_EXPLANATION_TOKENS: u32 = 300;

type MockFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

enum Backend {
    Anthropic {
        http: reqwest::Client,
        api_key: String,
        model: String,
    },
    Mock {
        responder: MockFn,
    },
}

/// Generative-text collaborator for free-form exercise explanations. One
/// success path; any transport or decoding failure surfaces as an error to
/// the caller.
pub struct ExplainerClient {
    backend: Backend,
}

impl ExplainerClient {
    pub fn new_anthropic(api_key: String, model: Option<String>) -> Self {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        debug!(%model, "explainer using anthropic backend");

        Self {
            backend: Backend::Anthropic {
                http: reqwest::Client::new(),
                api_key,
                model,
            },
        }
    }

    pub fn new_mock_fn(responder: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            backend: Backend::Mock {
                responder: Arc::new(responder),
            },
        }
    }

    pub fn explanation_prompt(utterance: &str) -> String {
        format!(
            r#"The user asked: "{utterance}"

Please explain the exercise they're asking about in a clear, beginner-friendly way.
Include:
- Starting position
- Step-by-step instructions
- Common mistakes to avoid
- One helpful tip

Keep it concise (3-4 sentences max) and encouraging."#
        )
    }

    pub async fn explain(&self, utterance: &str) -> Result<String> {
        self.complete(&Self::explanation_prompt(utterance)).await
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        match &self.backend {
            Backend::Anthropic {
                http,
                api_key,
                model,
            } => {
                let request = MessagesRequest {
                    model,
                    max_tokens: MAX_EXPLANATION_TOKENS,
                    messages: vec![Message {
                        role: "user",
                        content: prompt,
                    }],
                };

                let response = http
                    .post(ANTHROPIC_MESSAGES_URL)
                    .header("x-api-key", api_key)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json(&request)
                    .send()
                    .await
                    .context("explanation request failed to send")?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    error!(%status, "explanation service returned an error");
                    return Err(anyhow!("explanation service returned {status}: {body}"));
                }

                let parsed: MessagesResponse = response
                    .json()
                    .await
                    .context("malformed explanation response")?;

                let text = parsed
                    .content
                    .into_iter()
                    .find(|block| block.kind == "text")
                    .map(|block| block.text.trim().to_string())
                    .filter(|text| !text.is_empty())
                    .ok_or_else(|| anyhow!("explanation response contained no text"))?;

                debug!(length = text.len(), "explanation received");
                Ok(text)
            }
            Backend::Mock { responder } => Ok(responder(prompt).trim().to_string()),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}
