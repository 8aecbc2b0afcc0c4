// Translation module - edit request ↔ Gemini API translation
// Author: kelexine (https://github.com/kelexine)

pub mod request;
pub mod response;

pub use request::build_edit_request;
pub use response::normalize_response;
