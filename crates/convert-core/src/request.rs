//! Assembly of the outbound multipart request

use crate::config::SiteConfig;
use crate::error::ConvertError;
use crate::file::SelectedFile;
use crate::tool::{OptionKind, ToolSpec};
use std::collections::BTreeMap;

/// Raw user input for a tool's option fields, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    values: BTreeMap<String, String>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug)]
pub enum PartValue<'a, H> {
    File(&'a SelectedFile<H>),
    Text(String),
}

#[derive(Debug)]
pub struct FormPart<'a, H> {
    pub name: &'static str,
    pub value: PartValue<'a, H>,
}

/// One submission: where to post and the parts in order
#[derive(Debug)]
pub struct ConversionRequest<'a, H> {
    pub url: String,
    pub parts: Vec<FormPart<'a, H>>,
}

impl<'a, H> ConversionRequest<'a, H> {
    /// File parts come first, in the order given, followed by option fields.
    pub fn build(
        spec: &ToolSpec,
        files: impl IntoIterator<Item = &'a SelectedFile<H>>,
        options: &OptionValues,
        config: &SiteConfig,
    ) -> Result<Self, ConvertError> {
        let mut parts: Vec<FormPart<'a, H>> = files
            .into_iter()
            .map(|f| FormPart {
                name: spec.file_field,
                value: PartValue::File(f),
            })
            .collect();

        if parts.is_empty() {
            return Err(ConvertError::Rejected(spec.labels.rejection.to_string()));
        }
        if !spec.is_multi() {
            parts.truncate(1);
        }

        for field in spec.options {
            let raw = options.get(field.name).map(str::trim).unwrap_or("");
            match field.kind {
                OptionKind::Choice { choices, default } => {
                    let value = if raw.is_empty() { default } else { raw };
                    if !choices.contains(&value) {
                        return Err(ConvertError::InvalidOption {
                            name: field.name.to_string(),
                            value: value.to_string(),
                        });
                    }
                    parts.push(FormPart {
                        name: field.name,
                        value: PartValue::Text(value.to_string()),
                    });
                }
                OptionKind::OptionalNumber => {
                    if raw.is_empty() {
                        continue;
                    }
                    match raw.parse::<u32>() {
                        Ok(n) if n > 0 => parts.push(FormPart {
                            name: field.name,
                            value: PartValue::Text(n.to_string()),
                        }),
                        _ => {
                            return Err(ConvertError::InvalidOption {
                                name: field.name.to_string(),
                                value: raw.to_string(),
                            })
                        }
                    }
                }
            }
        }

        Ok(Self {
            url: config.endpoint_url(spec),
            parts,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &SelectedFile<H>> {
        self.parts.iter().filter_map(|p| match p.value {
            PartValue::File(f) => Some(f),
            PartValue::Text(_) => None,
        })
    }

    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        self.parts
            .iter()
            .filter_map(|p| match &p.value {
                PartValue::Text(t) => Some((p.name, t.as_str())),
                PartValue::File(_) => None,
            })
            .collect()
    }
}
