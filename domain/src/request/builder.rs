//! Request builder

use crate::core::mode::ConsoleMode;
use crate::core::model::Model;
use crate::prompt::{DEFAULT_ANALYSIS_PROMPT, PromptTemplate};
use crate::session::attachment::{AttachedFile, AttachedImage};
use crate::session::entities::ContentPart;
use serde::{Deserialize, Serialize};

/// Fixed sampling parameters, identical for both modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    /// Reasoning-effort budget in tokens.
    pub thinking_budget: u32,
}

impl GenerationParams {
    pub const TEMPERATURE: f32 = 0.2;
    pub const THINKING_BUDGET: u32 = 32_768;
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: Self::TEMPERATURE,
            thinking_budget: Self::THINKING_BUDGET,
        }
    }
}

/// A single self-contained call to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub model: Model,
    /// Mode captured at build time; also selects `system_directive`.
    pub mode: ConsoleMode,
    pub system_directive: String,
    /// Images first, then exactly one text part.
    pub parts: Vec<ContentPart>,
    pub params: GenerationParams,
}

impl ModelRequest {
    /// The trailing text part.
    pub fn text(&self) -> Option<&str> {
        self.parts.iter().rev().find_map(ContentPart::as_text)
    }

    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, ContentPart::Image { .. }))
            .count()
    }
}

/// Composes [`ModelRequest`]s for a fixed model.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    model: Model,
}

impl RequestBuilder {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Text to submit for `prompt`: the prompt itself, or the default
    /// analysis instruction when it is blank and attachments exist.
    pub fn effective_prompt(prompt: &str, has_attachments: bool) -> &str {
        if prompt.trim().is_empty() && has_attachments {
            DEFAULT_ANALYSIS_PROMPT
        } else {
            prompt
        }
    }

    pub fn build(
        &self,
        prompt: &str,
        mode: ConsoleMode,
        files: &[AttachedFile],
        images: &[AttachedImage],
    ) -> ModelRequest {
        let mut parts: Vec<ContentPart> = images
            .iter()
            .map(|img| ContentPart::image(img.mime_type.clone(), img.data.clone()))
            .collect();

        let has_attachments = !files.is_empty() || !images.is_empty();
        let mut text = PromptTemplate::file_context(files).unwrap_or_default();
        text.push_str(Self::effective_prompt(prompt, has_attachments));
        parts.push(ContentPart::text(text));

        ModelRequest {
            model: self.model.clone(),
            mode,
            system_directive: PromptTemplate::system_directive(mode),
            parts,
            params: GenerationParams::default(),
        }
    }
}
