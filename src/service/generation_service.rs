use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::TextGenerator;
use crate::errors::AppError;

/// What a generation call produced. Both variants are served as a normal
/// result; only callers in this crate can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Answered(String),
    Degraded(String),
}

impl GenerationOutcome {
    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::Answered(text) | GenerationOutcome::Degraded(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::Answered(text) | GenerationOutcome::Degraded(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GenerationOutcome::Degraded(_))
    }
}

pub fn fallback_text(message: &str) -> String {
    let message = if message.trim().is_empty() { "Unknown error" } else { message };
    format!("I encountered an issue processing your request: {message}. Please try again.")
}

#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Runs one generation call. Recoverable failures come back as
    /// [`GenerationOutcome::Degraded`]; anything else is returned as an error.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, AppError> {
        info!("Starting text generation with model: {}", self.generator.model());
        match self.generator.generate(prompt).await {
            Ok(text) => Ok(GenerationOutcome::Answered(text)),
            Err(e) if e.is_recoverable() => {
                warn!("Generation degraded to fallback text: {e}");
                Ok(GenerationOutcome::Degraded(fallback_text(&e.to_string())))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{FailingGenerator, RecordingGenerator};

    #[tokio::test]
    async fn answers_pass_through() {
        let svc = GenerationService::new(Arc::new(RecordingGenerator::replying("Route via port")));
        let outcome = svc.generate("prompt").await.unwrap();
        assert_eq!(outcome, GenerationOutcome::Answered("Route via port".into()));
        assert!(!outcome.is_degraded());
    }

    #[tokio::test]
    async fn provider_failure_becomes_fallback_text() {
        let svc = GenerationService::new(Arc::new(FailingGenerator::new(|| {
            AppError::InferenceError { message: "Resource has been exhausted".into() }
        })));
        let outcome = svc.generate("prompt").await.unwrap();
        assert!(outcome.is_degraded());
        assert_eq!(
            outcome.text(),
            "I encountered an issue processing your request: Resource has been exhausted. Please try again."
        );
    }

    #[tokio::test]
    async fn missing_key_becomes_fallback_text() {
        let svc = GenerationService::new(Arc::new(FailingGenerator::new(|| AppError::MissingApiKey)));
        let outcome = svc.generate("prompt").await.unwrap();
        assert!(outcome.is_degraded());
        assert!(outcome.text().contains("GEMINI_API_KEY is not configured"));
    }

    #[tokio::test]
    async fn empty_failure_message_reads_unknown_error() {
        let svc = GenerationService::new(Arc::new(FailingGenerator::new(|| {
            AppError::InferenceError { message: String::new() }
        })));
        let outcome = svc.generate("prompt").await.unwrap();
        assert_eq!(
            outcome.into_text(),
            "I encountered an issue processing your request: Unknown error. Please try again."
        );
    }

    #[tokio::test]
    async fn non_recoverable_failure_is_returned() {
        let svc = GenerationService::new(Arc::new(FailingGenerator::new(|| {
            AppError::ClientBuild { message: "invalid header value".into() }
        })));
        let err = svc.generate("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::ClientBuild { .. }));
    }
}
