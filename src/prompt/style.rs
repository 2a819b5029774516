//! Named prompt styles.

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

use super::render::validate_text;

/// A named (system, template) pair controlling the tone of generated posts.
///
/// Loaded from the style library; read-only for the duration of a run. The
/// `key` is the library map key, filled in after deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStyle {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system: String,
    pub template: String,
}

impl PromptStyle {
    /// Check every placeholder in `system` and `template` against the
    /// recognized variable set.
    ///
    /// Unknown placeholders are a configuration error, caught here before
    /// any generation call.
    pub fn validate(&self) -> Result<(), TemplateError> {
        validate_text(&self.system, "system")?;
        validate_text(&self.template, "template")
    }
}
