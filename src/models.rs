use serde::Serialize;
use serde_json::{Map, Value};

/// Free-text case details entered on the case analysis panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFields {
    pub location: String,
    pub substances: String,
    pub quantity: String,
    pub suspects: String,
}

impl CaseFields {
    /// Reads the four fields out of a JSON object without judging them.
    /// Missing or `null` values become empty text, other scalars their JSON text.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            location: field_text(object, "location"),
            substances: field_text(object, "substances"),
            quantity: field_text(object, "quantity"),
            suspects: field_text(object, "suspects"),
        }
    }
}

fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A validated request to `/api/generate`, one variant per `type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    CaseAnalysis(CaseFields),
    GeneralQuery(String),
}

impl GenerateRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateRequest::CaseAnalysis(_) => CASE_ANALYSIS,
            GenerateRequest::GeneralQuery(_) => GENERAL_QUERY,
        }
    }
}

pub const CASE_ANALYSIS: &str = "case-analysis";
pub const GENERAL_QUERY: &str = "general-query";

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None, stack: None }
    }
}

/// Body of `GET /api/env-test`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub api_key_defined: bool,
    pub api_key_preview: Option<String>,
    // Key name read by existing dashboard builds
    #[serde(rename = "nodeEnv")]
    pub environment: String,
}
