//! Site-wide settings
//!
//! Pages may embed a JSON object in `<body data-convert-config="...">`; any
//! missing key falls back to the default.

use crate::error::ConvertError;
use crate::tool::ToolSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix prepended to every endpoint path (e.g. `https://api.example.com`)
    pub api_base: String,
    /// When false, Word/PDF document zones accept any file
    pub strict_document_types: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            strict_document_types: true,
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConvertError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConvertError> {
        if !self.api_base.is_empty()
            && !self.api_base.starts_with("http://")
            && !self.api_base.starts_with("https://")
            && !self.api_base.starts_with('/')
        {
            return Err(ConvertError::Config(format!(
                "api_base must be absolute or root-relative: {}",
                self.api_base
            )));
        }
        Ok(())
    }

    pub fn endpoint_url(&self, spec: &ToolSpec) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), spec.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolKind;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_json("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert!(config.strict_document_types);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SiteConfig::from_json(r#"{"api_base":"https://api.example.com/"}"#).unwrap();
        assert_eq!(config.api_base, "https://api.example.com/");
        assert!(config.strict_document_types);
        assert_eq!(
            config.endpoint_url(&ToolKind::MergePdf.spec()),
            "https://api.example.com/merge-pdf-action"
        );
    }

    #[test]
    fn test_endpoint_without_base() {
        let config = SiteConfig::default();
        assert_eq!(config.endpoint_url(&ToolKind::ImageToPdf.spec()), "/convert");
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            SiteConfig::from_json("{not json"),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{"api_base":"ftp.example.com"}"#),
            Err(ConvertError::Config(_))
        ));
    }
}
