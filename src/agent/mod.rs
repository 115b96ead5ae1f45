use async_trait::async_trait;
use rig::completion::Prompt;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use tracing::{debug, error};

use crate::errors::AppError;

#[cfg(test)]
pub mod testing;

/// A single non-streaming text-completion call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Generator backed by the rig [`gemini::Client`].
///
/// The client is built once from the key handed in by the caller; a fresh
/// agent is built per call. Without a key every call fails with
/// [`AppError::MissingApiKey`], which the generation service turns into
/// fallback text instead of refusing to start.
#[derive(Clone)]
pub struct GeminiAgent {
    client: ClientSlot,
    model: String,
}

#[derive(Clone)]
enum ClientSlot {
    Ready(gemini::Client),
    MissingKey,
    Failed(String),
}

impl GeminiAgent {
    pub fn new(api_key: Option<&str>, model: &str, base_url: &str) -> Self {
        let client = match api_key {
            None => ClientSlot::MissingKey,
            Some(key) => match gemini::Client::builder().api_key(key).base_url(base_url).build() {
                Ok(client) => ClientSlot::Ready(client),
                Err(e) => {
                    error!("Failed to build Gemini client for {base_url}: {e}");
                    ClientSlot::Failed(e.to_string())
                }
            },
        };
        Self { client, model: model.to_string() }
    }

    fn client(&self) -> Result<&gemini::Client, AppError> {
        match &self.client {
            ClientSlot::Ready(client) => Ok(client),
            ClientSlot::MissingKey => Err(AppError::MissingApiKey),
            ClientSlot::Failed(message) => Err(AppError::ClientBuild { message: message.clone() }),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let agent = self.client()?.agent(&self.model).build();

        debug!("Sending prompt to {}: {}", self.model, preview(prompt));

        let text = agent.prompt(prompt).await.map_err(|e| {
            error!("Gemini generation failed with model {}: {e}", self.model);
            AppError::InferenceError { message: e.to_string() }
        })?;

        debug!("Generated text length: {}", text.len());
        Ok(text)
    }
}

/// First 50 characters of a prompt, for log lines.
pub fn preview(prompt: &str) -> String {
    let mut out: String = prompt.chars().take(50).collect();
    if prompt.chars().nth(50).is_some() {
        out.push_str("...");
    }
    out
}
