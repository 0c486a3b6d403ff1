//! Parsing raw model generations into validated extraction output.

use glass_miner_core::models::{ExtractionOutput, ValidationError};
use glass_miner_core::payload::{find_payload, strip_reasoning};
use thiserror::Error;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no JSON payload found in model output")]
    MissingPayload,

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("malformed extraction: {0}")]
    Schema(#[from] ValidationError),

    #[error("model load error: {0}")]
    ModelLoad(String),

    #[error("LLM inference error: {0}")]
    Inference(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Parse a raw generation into a validated [`ExtractionOutput`].
///
/// Strips the reasoning preamble, slices the brace-bounded payload, parses
/// it, and runs schema validation. Nothing reaches the caller that a
/// downstream consumer could not deserialize again.
pub fn parse_generation(raw: &str) -> ExtractionResult<ExtractionOutput> {
    let answer = strip_reasoning(raw);
    let payload = find_payload(answer).ok_or(ExtractionError::MissingPayload)?;

    let output: ExtractionOutput = serde_json::from_str(payload)?;
    output.validate()?;

    Ok(output)
}
