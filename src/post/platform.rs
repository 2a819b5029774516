//! Per-platform posting constraints.

use serde::{Deserialize, Serialize};

/// Smallest `max_length` a platform may declare.
///
/// Anything below this cannot hold viable content and is rejected at
/// configuration load, not inside the formatter.
pub const MIN_MAX_LENGTH: usize = 8;

/// Constraints for one posting destination.
///
/// `guidelines` are informational (shown in listings, woven into style
/// text by users if they wish); only `max_length` and `default_hashtags`
/// are applied programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub max_length: usize,
    #[serde(default)]
    pub guidelines: Vec<String>,
    #[serde(default)]
    pub default_hashtags: Vec<String>,
}
