//! Image encoding for the Gemini edit request.
//!
//! This module turns uploaded image bytes into the base64 `inlineData`
//! payload Gemini expects, and back again for the edited result. It also
//! holds the accepted formats and size limits.
//!
//! # Submodules
//!
//! - `models`: Accepted image formats and validation constraints.
//! - `encoder`: Base64 payload and data URI conversion.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod encoder;
pub mod models;

pub use encoder::{data_url, encode_image, parse_data_url, EncodedImage};
pub use models::{validate_image_size, ImageFormat, MAX_IMAGE_SIZE_BYTES};
