//! The style library: prompt styles and platform specs keyed by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::post::platform::{MIN_MAX_LENGTH, PlatformSpec};
use crate::prompt::style::PromptStyle;

/// Loaded styles and platforms, read-only for the duration of a run.
///
/// Backed by `BTreeMap` so listings and serialized files are
/// deterministically ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleLibrary {
    styles: BTreeMap<String, PromptStyle>,
    platforms: BTreeMap<String, PlatformSpec>,
}

impl StyleLibrary {
    /// Build a library from parts, filling each entry's `key` from its map
    /// key. Does not validate; callers do.
    pub(crate) fn from_parts(
        styles: BTreeMap<String, PromptStyle>,
        platforms: BTreeMap<String, PlatformSpec>,
    ) -> Self {
        let mut library = StyleLibrary { styles, platforms };
        for (key, style) in library.styles.iter_mut() {
            style.key = key.clone();
        }
        for (key, platform) in library.platforms.iter_mut() {
            platform.key = key.clone();
        }
        library
    }

    /// Parse and validate a library from YAML text.
    ///
    /// `path` only labels errors. Every style's placeholders are checked
    /// against the recognized variable set and every platform against the
    /// `max_length` floor, so bad custom templates fail here — before any
    /// generation call.
    pub fn from_yaml(text: &str, path: &str) -> Result<Self, ConfigError> {
        let parsed: StyleLibrary =
            serde_yaml::from_str(text).map_err(|e| ConfigError::ParseFailed {
                path: path.to_string(),
                source: e,
            })?;

        let library = StyleLibrary::from_parts(parsed.styles, parsed.platforms);
        library.validate()?;
        Ok(library)
    }

    /// Validate every style and platform in the library.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, style) in &self.styles {
            style.validate().map_err(|source| ConfigError::InvalidStyle {
                key: key.clone(),
                source,
            })?;
        }

        for (key, platform) in &self.platforms {
            if platform.max_length < MIN_MAX_LENGTH {
                return Err(ConfigError::MaxLengthTooSmall {
                    key: key.clone(),
                    max_length: platform.max_length,
                    min: MIN_MAX_LENGTH,
                });
            }
        }

        Ok(())
    }

    /// Look up a style by key.
    pub fn style(&self, key: &str) -> Result<&PromptStyle, ConfigError> {
        self.styles.get(key).ok_or_else(|| ConfigError::UnknownStyle {
            key: key.to_string(),
            available: self.style_keys().join(", "),
        })
    }

    /// Look up a platform by key.
    pub fn platform(&self, key: &str) -> Result<&PlatformSpec, ConfigError> {
        self.platforms
            .get(key)
            .ok_or_else(|| ConfigError::UnknownPlatform {
                key: key.to_string(),
                available: self.platform_keys().join(", "),
            })
    }

    pub fn styles(&self) -> impl Iterator<Item = &PromptStyle> {
        self.styles.values()
    }

    pub fn platforms(&self) -> impl Iterator<Item = &PlatformSpec> {
        self.platforms.values()
    }

    fn style_keys(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }

    fn platform_keys(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_library;
    use crate::error::TemplateError;

    #[test]
    fn test_default_library_validates() {
        let library = default_library();
        assert!(library.validate().is_ok());
        assert!(library.style("casual").is_ok());
        assert!(library.platform("twitter").is_ok());
    }

    #[test]
    fn test_keys_filled_from_map_keys() {
        let library = default_library();
        let style = library.style("casual").unwrap();
        assert_eq!(style.key, "casual");
        let platform = library.platform("twitter").unwrap();
        assert_eq!(platform.key, "twitter");
    }

    #[test]
    fn test_unknown_style_lists_available() {
        let library = default_library();
        let err = library.style("sarcastic").unwrap_err();
        match err {
            ConfigError::UnknownStyle { key, available } => {
                assert_eq!(key, "sarcastic");
                assert!(available.contains("casual"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_platform_lists_available() {
        let library = default_library();
        let err = library.platform("myspace").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlatform { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_placeholder() {
        let yaml = r#"
styles:
  broken:
    name: Broken
    system: "You write posts."
    template: "Post about {nonexistent_var}"
platforms:
  twitter:
    name: Twitter/X
    max_length: 280
"#;
        let err = StyleLibrary::from_yaml(yaml, "styles.yaml").unwrap_err();
        match err {
            ConfigError::InvalidStyle { key, source } => {
                assert_eq!(key, "broken");
                let TemplateError::UnknownPlaceholder { name, .. } = source;
                assert_eq!(name, "nonexistent_var");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_yaml_rejects_tiny_max_length() {
        let yaml = r#"
styles:
  casual:
    name: Casual
    system: "sys"
    template: "{commit_message}"
platforms:
  sms:
    name: SMS
    max_length: 4
"#;
        let err = StyleLibrary::from_yaml(yaml, "styles.yaml").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MaxLengthTooSmall { max_length: 4, .. }
        ));
    }

    #[test]
    fn test_from_yaml_parses_valid_library() {
        let yaml = r##"
styles:
  plain:
    name: Plain
    description: Just the facts
    system: "You write short posts."
    template: "{files_count} files: {diff_summary}"
platforms:
  blog:
    name: Blog
    max_length: 5000
    guidelines:
      - Long form is fine
    default_hashtags:
      - "#changelog"
"##;
        let library = StyleLibrary::from_yaml(yaml, "styles.yaml").unwrap();
        assert_eq!(library.style("plain").unwrap().description, "Just the facts");
        assert_eq!(library.platform("blog").unwrap().max_length, 5000);
        assert_eq!(
            library.platform("blog").unwrap().default_hashtags,
            vec!["#changelog".to_string()]
        );
    }
}
