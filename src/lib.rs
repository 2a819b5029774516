//! buildpost - A CLI tool that turns git commits into social media posts using AI.
//!
//! # Overview
//!
//! buildpost extracts a structured summary from a commit (or commit range),
//! renders it through a named prompt style, sends the prompt to a generation
//! provider CLI, and post-processes the result against per-platform length
//! and hashtag constraints.
//!
//! The pipeline is Extractor → Renderer → GenerationClient → Formatter;
//! every stage is a pure function of its inputs except the generation call,
//! which is the single I/O boundary and is never retried.

pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod post;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigStore, Settings, StyleLibrary};
pub use error::{ConfigError, GitError, ProviderError, TemplateError};
pub use git::{CommitSummary, FileChange};
pub use llm::{GenerationClient, GenerationRequest, Provider};
pub use post::{PlatformSpec, format_post};
pub use prompt::{PromptStyle, RenderedPrompt, render};
