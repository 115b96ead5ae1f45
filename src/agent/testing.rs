//! Generator doubles for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::TextGenerator;
use crate::errors::AppError;

/// Answers every prompt with a fixed reply and remembers what it was sent.
#[derive(Default)]
pub struct RecordingGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn model(&self) -> &str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call with a fixed [`AppError`] built on demand.
pub struct FailingGenerator {
    make_error: fn() -> AppError,
}

impl FailingGenerator {
    pub fn new(make_error: fn() -> AppError) -> Self {
        Self { make_error }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn model(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        Err((self.make_error)())
    }
}

pub struct PanickingGenerator;

#[async_trait]
impl TextGenerator for PanickingGenerator {
    fn model(&self) -> &str {
        "panicking"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        panic!("generator exploded");
    }
}
