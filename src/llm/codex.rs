//! Codex CLI generation client.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ProviderError;

use super::provider::{
    GenerationClient, GenerationRequest, Provider, check_cli_available, run_provider_command,
};

/// Client that spawns the Codex CLI via `codex exec`.
pub struct CodexClient;

#[async_trait]
impl GenerationClient for CodexClient {
    fn provider(&self) -> Provider {
        Provider::Codex
    }

    async fn check_installed(&self) -> Result<(), ProviderError> {
        check_cli_available(Provider::Codex).await
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        debug!(
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            "codex CLI ignores sampling parameters"
        );

        let mut cmd = Command::new(Provider::Codex.binary());
        cmd.arg("exec");

        if let Some(model) = &request.model {
            cmd.arg("--model").arg(model);
        }

        // codex exec has no separate system channel; prepend it
        cmd.arg(combine_prompt(&request.system, &request.user));

        let stdout = run_provider_command(Provider::Codex, cmd).await?;

        let text = stdout.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(Provider::Codex));
        }

        Ok(text.to_string())
    }
}

fn combine_prompt(system: &str, user: &str) -> String {
    if system.trim().is_empty() {
        user.to_string()
    } else {
        format!("{system}\n\n{user}")
    }
}
