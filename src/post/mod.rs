//! Platform specs and post formatting.

pub mod format;
pub mod platform;

pub use format::{MAX_APPENDED_HASHTAGS, format_post};
pub use platform::{MIN_MAX_LENGTH, PlatformSpec};
