//! Persisted configuration: settings and the style library.
//!
//! Settings live in `config.yaml`, styles and platforms in `styles.yaml`,
//! both under the buildpost config directory. The directory is an explicit
//! value threaded through the entry point (`--config-dir` in the CLI) so
//! tests can inject fixtures without touching the real home.

pub mod defaults;
pub mod library;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ConfigError;
use crate::llm::Provider;

pub use library::StyleLibrary;

/// Resolve a provider key against the supported set.
pub fn resolve_provider(key: &str) -> Result<Provider, ConfigError> {
    Provider::from_key(key).ok_or_else(|| ConfigError::UnknownProvider {
        key: key.to_string(),
        available: Provider::supported_keys().join(", "),
    })
}

/// Persisted settings (`config.yaml`), strongly typed.
///
/// Missing file means defaults; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Active generation provider key.
    pub provider: String,
    /// Per-provider model overrides; absent keys use the CLI's default.
    pub models: BTreeMap<String, String>,
    pub defaults: Defaults,
    pub generation: Generation,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            provider: Provider::Claude.key().to_string(),
            models: BTreeMap::new(),
            defaults: Defaults::default(),
            generation: Generation::default(),
        }
    }
}

impl Settings {
    /// The active provider, validated against the supported set.
    pub fn active_provider(&self) -> Result<Provider, ConfigError> {
        resolve_provider(&self.provider)
    }

    /// Configured model override for a provider, if any.
    pub fn model_for(&self, provider: Provider) -> Option<String> {
        self.models.get(provider.key()).cloned()
    }
}

/// Default pipeline selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub style: String,
    pub platform: String,
    pub include_hashtags: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            style: "casual".to_string(),
            platform: "twitter".to_string(),
            include_hashtags: true,
        }
    }
}

/// Generation parameters passed to the provider client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Generation {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Generation {
    fn default() -> Self {
        Generation {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Filesystem access to the config directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// A store rooted at an explicit directory.
    pub fn new(dir: PathBuf) -> Self {
        ConfigStore { dir }
    }

    /// A store rooted at the platform config directory.
    pub fn from_project_dirs() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("", "", "buildpost").ok_or(ConfigError::NoConfigDir)?;
        Ok(ConfigStore::new(dirs.config_dir().to_path_buf()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join("config.yaml")
    }

    pub fn library_path(&self) -> PathBuf {
        self.dir.join("styles.yaml")
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        let path = self.settings_path();

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        serde_yaml::from_str(&text).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Save settings atomically.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), ConfigError> {
        let path = self.settings_path();
        let text = serde_yaml::to_string(settings).map_err(|e| ConfigError::SerializeFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        self.write_atomic(&path, &text)
    }

    /// Load and validate the style library, falling back to the built-in
    /// defaults when the file is absent.
    pub fn load_library(&self) -> Result<StyleLibrary, ConfigError> {
        let path = self.library_path();

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(defaults::default_library());
            }
            Err(e) => {
                return Err(ConfigError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        StyleLibrary::from_yaml(&text, &path.display().to_string())
    }

    /// Write default files for anything missing; returns the created paths.
    pub fn init(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut created = Vec::new();

        let settings_path = self.settings_path();
        if !settings_path.exists() {
            self.save_settings(&Settings::default())?;
            created.push(settings_path);
        }

        let library_path = self.library_path();
        if !library_path.exists() {
            self.save_library(&defaults::default_library())?;
            created.push(library_path);
        }

        Ok(created)
    }

    /// Reset settings to defaults. The style library is left untouched.
    pub fn reset(&self) -> Result<(), ConfigError> {
        self.save_settings(&Settings::default())
    }

    fn save_library(&self, library: &StyleLibrary) -> Result<(), ConfigError> {
        let path = self.library_path();
        let text = serde_yaml::to_string(library).map_err(|e| ConfigError::SerializeFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        self.write_atomic(&path, &text)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), ConfigError> {
        let to_write_err = |e: std::io::Error| ConfigError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        };

        std::fs::create_dir_all(&self.dir).map_err(to_write_err)?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(to_write_err)?;
        tmp.write_all(content.as_bytes()).map_err(to_write_err)?;
        tmp.persist(path).map_err(|e| to_write_err(e.error))?;

        Ok(())
    }
}
