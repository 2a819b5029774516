//! Claude Code CLI generation client.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::ProviderError;

use super::provider::{
    GenerationClient, GenerationRequest, Provider, check_cli_available, run_provider_command,
};

/// Client that spawns the Claude Code CLI.
pub struct ClaudeClient;

/// Claude CLI JSON envelope when using --output-format json.
#[derive(Deserialize)]
struct ClaudeCliResponse {
    result: String,
    #[serde(default)]
    is_error: bool,
}

#[async_trait]
impl GenerationClient for ClaudeClient {
    fn provider(&self) -> Provider {
        Provider::Claude
    }

    async fn check_installed(&self) -> Result<(), ProviderError> {
        check_cli_available(Provider::Claude).await
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        // The CLI exposes no sampling controls; temperature/max_tokens stay
        // on the request for clients that support them.
        debug!(
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            "claude CLI ignores sampling parameters"
        );

        let mut cmd = Command::new(Provider::Claude.binary());
        cmd.arg("-p")
            .arg(&request.user)
            .arg("--append-system-prompt")
            .arg(&request.system)
            .arg("--output-format")
            .arg("json");

        if let Some(model) = &request.model {
            cmd.arg("--model").arg(model);
        }

        let stdout = run_provider_command(Provider::Claude, cmd).await?;
        parse_claude_response(&stdout)
    }
}

/// Unwrap the CLI JSON envelope, falling back to raw output.
fn parse_claude_response(response: &str) -> Result<String, ProviderError> {
    let content = match serde_json::from_str::<ClaudeCliResponse>(response) {
        Ok(envelope) if envelope.is_error => {
            return Err(ProviderError::ExecutionFailed(
                Provider::Claude,
                envelope.result,
            ));
        }
        Ok(envelope) => envelope.result,
        Err(_) => response.to_string(),
    };

    let text = content.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse(Provider::Claude));
    }

    Ok(text.to_string())
}
