//! Decoding of conversion endpoint responses
//!
//! Endpoints answer `{"success": true, "download_url": "..."}` or
//! `{"success": false, "error": "..."}`. Error responses sent with a 4xx/5xx
//! status often omit `success` entirely, so a missing flag counts as failure.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Succeeded { download_url: String },
    /// `message` is the server-supplied text, if it sent one
    Failed { message: Option<String> },
}

impl ConversionResponse {
    pub fn into_outcome(self) -> Result<ConversionOutcome, ConvertError> {
        if self.success {
            return match self.download_url {
                Some(url) if !url.is_empty() => {
                    Ok(ConversionOutcome::Succeeded { download_url: url })
                }
                _ => Err(ConvertError::MalformedResponse(
                    "success without download_url".to_string(),
                )),
            };
        }
        let message = self.error.filter(|m| !m.trim().is_empty());
        Ok(ConversionOutcome::Failed { message })
    }
}

/// Decode a response body
pub fn decode(body: &str) -> Result<ConversionOutcome, ConvertError> {
    let response: ConversionResponse = serde_json::from_str(body)
        .map_err(|e| ConvertError::MalformedResponse(e.to_string()))?;
    response.into_outcome()
}
