use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::agent::preview;
use crate::errors::AppError;
use crate::models::{CaseFields, GenerateRequest, CASE_ANALYSIS, GENERAL_QUERY};
use crate::service::generation_service::{GenerationOutcome, GenerationService};
use crate::service::prompt_builder::{build_case_analysis_prompt, build_general_prompt};

/// Decodes and validates a raw `/api/generate` body.
pub fn parse_request(body: &[u8]) -> Result<GenerateRequest, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(AppError::InvalidJson)?;

    // A body that is not an object has no `type` to read.
    let object = match value {
        Value::Object(map) => map,
        _ => return Err(AppError::MissingType),
    };

    let kind = object.get("type").filter(|v| is_present(v)).ok_or(AppError::MissingType)?;

    match kind.as_str() {
        Some(CASE_ANALYSIS) => match object.get("data") {
            None | Some(Value::Null) => Err(AppError::MissingData),
            Some(Value::Object(data)) => {
                Ok(GenerateRequest::CaseAnalysis(CaseFields::from_object(data)))
            }
            Some(_) => Err(AppError::InvalidData),
        },
        Some(GENERAL_QUERY) => match object.get("prompt").filter(|v| is_present(v)) {
            Some(Value::String(prompt)) => Ok(GenerateRequest::GeneralQuery(prompt.clone())),
            // Other truthy values are forwarded as their JSON text.
            Some(other) => Ok(GenerateRequest::GeneralQuery(other.to_string())),
            None => Err(AppError::MissingPrompt),
        },
        Some(other) => Err(AppError::InvalidType { value: other.to_string() }),
        None => Err(AppError::InvalidType { value: kind.to_string() }),
    }
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Routes a validated request to its prompt and runs the generation call.
#[derive(Clone)]
pub struct DispatchService {
    generation: GenerationService,
}

impl DispatchService {
    pub fn new(generation: GenerationService) -> Self {
        Self { generation }
    }

    pub fn render_prompt(request: &GenerateRequest) -> String {
        match request {
            GenerateRequest::CaseAnalysis(fields) => build_case_analysis_prompt(fields),
            GenerateRequest::GeneralQuery(prompt) => build_general_prompt(prompt),
        }
    }

    /// Errors returned here escaped the generation wrapper, panics included.
    pub async fn dispatch(&self, request: GenerateRequest) -> Result<GenerationOutcome, AppError> {
        match &request {
            GenerateRequest::CaseAnalysis(fields) => {
                info!("Generating case analysis for location {:?}", fields.location)
            }
            GenerateRequest::GeneralQuery(prompt) => {
                info!("Generating text for prompt: {}", preview(prompt))
            }
        }

        let prompt = Self::render_prompt(&request);
        let outcome = AssertUnwindSafe(self.generation.generate(&prompt))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                error!("Generation panicked for {} request: {message}", request.kind());
                Err(AppError::Unexpected(message))
            })?;

        debug!(
            "Generated {} result ({} chars, degraded: {})",
            request.kind(),
            outcome.text().len(),
            outcome.is_degraded()
        );
        Ok(outcome)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "generation task panicked".to_string()
    }
}
