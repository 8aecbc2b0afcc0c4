// roomedit - Edit hotel room photos with natural-language prompts via Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod server;
pub mod translation;
pub mod utils;
pub mod vision;

pub use editor::ImageEditor;
pub use error::{EditError, Result};
pub use models::{EditRequest, EditedImageResult};
