//! Generation provider abstraction.

use std::env;
use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::error::ProviderError;

use super::claude::ClaudeClient;
use super::codex::CodexClient;

/// Default timeout for provider subprocess execution (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "BUILDPOST_PROVIDER_TIMEOUT";

/// Supported generation providers, selected by configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Claude,
    Codex,
}

impl Provider {
    /// The configuration key for this provider.
    pub fn key(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::Codex => "codex",
        }
    }

    /// The executable spawned for this provider.
    pub fn binary(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::Codex => "codex",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Claude => "Claude Code",
            Provider::Codex => "Codex",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            Provider::Claude => "npm install -g @anthropic-ai/claude-code",
            Provider::Codex => "npm install -g @openai/codex",
        }
    }

    /// Look a provider up by configuration key.
    pub fn from_key(key: &str) -> Option<Provider> {
        match key {
            "claude" => Some(Provider::Claude),
            "codex" => Some(Provider::Codex),
            _ => None,
        }
    }

    pub fn supported_keys() -> &'static [&'static str] {
        &["claude", "codex"]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One generation request: the rendered prompt pair plus generation
/// parameters from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Model override for the provider CLI; `None` uses the CLI's default.
    pub model: Option<String>,
}

/// Capability interface for text generation.
///
/// The pipeline holds a `Box<dyn GenerationClient>` and never branches on
/// provider identity. The call is a single non-retried boundary: any
/// failure is terminal for the invocation and propagates verbatim.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// The provider behind this client.
    fn provider(&self) -> Provider;

    /// Verify the provider CLI is installed and runnable.
    async fn check_installed(&self) -> Result<(), ProviderError>;

    /// Generate text for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// Build the client for a provider key.
pub fn client_for(provider: Provider) -> Box<dyn GenerationClient> {
    match provider {
        Provider::Claude => Box::new(ClaudeClient),
        Provider::Codex => Box::new(CodexClient),
    }
}

/// Get the configured subprocess timeout.
///
/// Reads from BUILDPOST_PROVIDER_TIMEOUT if set, otherwise uses the
/// default of 300 seconds. Logs a warning if the environment variable is
/// set but contains an invalid value.
pub(crate) fn provider_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check that a provider CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// verifies the binary actually runs.
pub(crate) async fn check_cli_available(provider: Provider) -> Result<(), ProviderError> {
    if which::which(provider.binary()).is_err() {
        return Err(ProviderError::NotInstalled(provider));
    }

    let version_check = Command::new(provider.binary())
        .arg("--version")
        .output()
        .await
        .map_err(|e| ProviderError::SpawnFailed(provider, e))?;

    if !version_check.status.success() {
        return Err(ProviderError::NotInstalled(provider));
    }

    Ok(())
}

/// Run a provider command under the configured timeout and return stdout.
pub(crate) async fn run_provider_command(
    provider: Provider,
    mut cmd: Command,
) -> Result<String, ProviderError> {
    let timeout_duration = provider_timeout();
    let timeout_secs = timeout_duration.as_secs();

    let output = timeout(
        timeout_duration,
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).output(),
    )
    .await
    .map_err(|_| ProviderError::Timeout(provider, timeout_secs))?
    .map_err(|e| ProviderError::SpawnFailed(provider, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(ProviderError::NonZeroExit {
            provider,
            code,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
