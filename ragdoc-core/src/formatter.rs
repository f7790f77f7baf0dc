use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::render_value;
use crate::{Document, FormatterConfigError, Metadata, Value};

pub const CONTENT_PLACEHOLDER: &str = "{content}";
pub const METADATA_STRING_PLACEHOLDER: &str = "{metadata_string}";
pub const KEY_PLACEHOLDER: &str = "{key}";
pub const VALUE_PLACEHOLDER: &str = "{value}";

pub const DEFAULT_METADATA_TEMPLATE: &str = "{key}: {value}";
pub const DEFAULT_METADATA_SEPARATOR: &str = "\n";
pub const DEFAULT_TEXT_TEMPLATE: &str = "{metadata_string}\n\n{content}";

/// Selects which metadata entries take part in a rendered document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataMode {
    #[default]
    All,
    Embed,
    Inference,
    None,
}

/// Renders a document (content plus a subset of its metadata) into a single string.
pub trait ContentFormatter: Send + Sync + fmt::Debug {
    fn format(&self, document: &Document, mode: MetadataMode) -> String;

    /// Downcast hook used by pipeline stages that merge formatter settings.
    fn as_default(&self) -> Option<&DefaultContentFormatter> {
        None
    }
}

/// Template-driven formatter attached to every document unless replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultContentFormatter {
    metadata_template: String,
    metadata_separator: String,
    text_template: String,
    excluded_inference_metadata_keys: BTreeSet<String>,
    excluded_embed_metadata_keys: BTreeSet<String>,
}

impl Default for DefaultContentFormatter {
    fn default() -> Self {
        Self {
            metadata_template: DEFAULT_METADATA_TEMPLATE.to_string(),
            metadata_separator: DEFAULT_METADATA_SEPARATOR.to_string(),
            text_template: DEFAULT_TEXT_TEMPLATE.to_string(),
            excluded_inference_metadata_keys: BTreeSet::new(),
            excluded_embed_metadata_keys: BTreeSet::new(),
        }
    }
}

impl DefaultContentFormatter {
    pub fn builder() -> DefaultContentFormatterBuilder {
        DefaultContentFormatterBuilder::default()
    }

    pub fn metadata_template(&self) -> &str {
        &self.metadata_template
    }

    pub fn metadata_separator(&self) -> &str {
        &self.metadata_separator
    }

    pub fn text_template(&self) -> &str {
        &self.text_template
    }

    pub fn excluded_inference_metadata_keys(&self) -> &BTreeSet<String> {
        &self.excluded_inference_metadata_keys
    }

    pub fn excluded_embed_metadata_keys(&self) -> &BTreeSet<String> {
        &self.excluded_embed_metadata_keys
    }

    /// Copy of `self` whose excluded key sets also contain those of `other`.
    /// Templates are taken from `self`.
    pub fn merge_exclusions(&self, other: &DefaultContentFormatter) -> Self {
        let mut merged = self.clone();
        merged
            .excluded_inference_metadata_keys
            .extend(other.excluded_inference_metadata_keys.iter().cloned());
        merged
            .excluded_embed_metadata_keys
            .extend(other.excluded_embed_metadata_keys.iter().cloned());
        merged
    }

    /// Metadata entries visible under `mode`, sorted by key.
    pub fn select_metadata<'a>(
        &self,
        metadata: &'a Metadata,
        mode: MetadataMode,
    ) -> Vec<(&'a String, &'a Value)> {
        let excluded = match mode {
            MetadataMode::All => None,
            MetadataMode::None => return Vec::new(),
            MetadataMode::Inference => Some(&self.excluded_inference_metadata_keys),
            MetadataMode::Embed => Some(&self.excluded_embed_metadata_keys),
        };

        let mut entries: Vec<(&String, &Value)> = metadata
            .iter()
            .filter(|(key, _)| excluded.map_or(true, |excluded| !excluded.contains(*key)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl ContentFormatter for DefaultContentFormatter {
    fn format(&self, document: &Document, mode: MetadataMode) -> String {
        let entries = self.select_metadata(document.metadata(), mode);
        tracing::trace!(
            document_id = %document.id(),
            mode = ?mode,
            selected = entries.len(),
            "formatting document"
        );

        let metadata_string = entries
            .into_iter()
            .map(|(key, value)| {
                fill_template(
                    &self.metadata_template,
                    &[
                        (KEY_PLACEHOLDER, key.as_str()),
                        (VALUE_PLACEHOLDER, render_value(value).as_str()),
                    ],
                )
            })
            .collect::<Vec<_>>()
            .join(&self.metadata_separator);

        fill_template(
            &self.text_template,
            &[
                (METADATA_STRING_PLACEHOLDER, metadata_string.as_str()),
                (CONTENT_PLACEHOLDER, document.content()),
            ],
        )
    }

    fn as_default(&self) -> Option<&DefaultContentFormatter> {
        Some(self)
    }
}

/// Single pass placeholder substitution. Substituted text is never rescanned, so
/// content containing `{key}` or `{content}` comes through verbatim.
fn fill_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'outer: while !rest.is_empty() {
        if rest.starts_with('{') {
            for (placeholder, value) in substitutions {
                if let Some(tail) = rest.strip_prefix(placeholder) {
                    out.push_str(value);
                    rest = tail;
                    continue 'outer;
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}

/// Starts a builder from the settings of an existing formatter.
impl From<&DefaultContentFormatter> for DefaultContentFormatterBuilder {
    fn from(formatter: &DefaultContentFormatter) -> Self {
        Self {
            metadata_template: Some(formatter.metadata_template.clone()),
            metadata_separator: Some(formatter.metadata_separator.clone()),
            text_template: Some(formatter.text_template.clone()),
            excluded_inference_metadata_keys: formatter.excluded_inference_metadata_keys.clone(),
            excluded_embed_metadata_keys: formatter.excluded_embed_metadata_keys.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DefaultContentFormatterBuilder {
    metadata_template: Option<String>,
    metadata_separator: Option<String>,
    text_template: Option<String>,
    excluded_inference_metadata_keys: BTreeSet<String>,
    excluded_embed_metadata_keys: BTreeSet<String>,
}

impl DefaultContentFormatterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata_template(mut self, value: impl Into<String>) -> Self {
        self.metadata_template = Some(value.into());
        self
    }

    pub fn metadata_separator(mut self, value: impl Into<String>) -> Self {
        self.metadata_separator = Some(value.into());
        self
    }

    pub fn text_template(mut self, value: impl Into<String>) -> Self {
        self.text_template = Some(value.into());
        self
    }

    pub fn excluded_inference_metadata_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.excluded_inference_metadata_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn excluded_embed_metadata_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.excluded_embed_metadata_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<DefaultContentFormatter, FormatterConfigError> {
        let metadata_template = non_empty(
            self.metadata_template,
            DEFAULT_METADATA_TEMPLATE,
            "metadata_template",
        )?;
        // Whitespace-only separators are legitimate ("\n", " ").
        let metadata_separator = self
            .metadata_separator
            .unwrap_or_else(|| DEFAULT_METADATA_SEPARATOR.to_string());
        let text_template = non_empty(self.text_template, DEFAULT_TEXT_TEMPLATE, "text_template")?;

        if !text_template.contains(CONTENT_PLACEHOLDER) {
            tracing::warn!(
                text_template = %text_template,
                "text template has no {{content}} placeholder; document content will be dropped"
            );
        }

        Ok(DefaultContentFormatter {
            metadata_template,
            metadata_separator,
            text_template,
            excluded_inference_metadata_keys: self.excluded_inference_metadata_keys,
            excluded_embed_metadata_keys: self.excluded_embed_metadata_keys,
        })
    }
}

fn non_empty(
    value: Option<String>,
    default: &str,
    field: &'static str,
) -> Result<String, FormatterConfigError> {
    match value {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(FormatterConfigError::EmptyTemplate { field }),
        Some(value) => Ok(value),
    }
}

/// Serde-friendly formatter settings, e.g. read from a JSON or TOML config file.
/// Missing fields fall back to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_template: Option<String>,
    pub excluded_inference_metadata_keys: Vec<String>,
    pub excluded_embed_metadata_keys: Vec<String>,
}

impl FormatterConfig {
    pub fn into_formatter(self) -> Result<DefaultContentFormatter, FormatterConfigError> {
        let mut builder = DefaultContentFormatter::builder()
            .excluded_inference_metadata_keys(self.excluded_inference_metadata_keys)
            .excluded_embed_metadata_keys(self.excluded_embed_metadata_keys);
        if let Some(template) = self.metadata_template {
            builder = builder.metadata_template(template);
        }
        if let Some(separator) = self.metadata_separator {
            builder = builder.metadata_separator(separator);
        }
        if let Some(template) = self.text_template {
            builder = builder.text_template(template);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_template_does_not_rescan_substituted_text() {
        let out = fill_template(
            "{metadata_string}|{content}",
            &[
                (METADATA_STRING_PLACEHOLDER, "{content}"),
                (CONTENT_PLACEHOLDER, "body"),
            ],
        );
        assert_eq!(out, "{content}|body");
    }

    #[test]
    fn fill_template_keeps_unknown_braces_and_multibyte_text() {
        let out = fill_template("{other} ü {key}", &[(KEY_PLACEHOLDER, "k")]);
        assert_eq!(out, "{other} ü k");
    }
}
