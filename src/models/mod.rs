//! Data models for roomedit.
//!
//! This module contains the type definitions for:
//! - The caller-facing edit request and result (`edit`)
//! - The upstream Google Gemini `generateContent` API (`gemini`)

// Author: kelexine (https://github.com/kelexine)

pub mod edit;
pub mod gemini;

pub use edit::{EditOutcome, EditRequest, EditedImageResult};
pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Modality, Part, PromptFeedback,
};
