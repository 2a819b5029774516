//! End-to-end pipeline tests with a fake generation client.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use buildpost::config::defaults::default_library;
use buildpost::error::ProviderError;
use buildpost::git::extract_commit;
use buildpost::llm::{GenerationClient, GenerationRequest, Provider};
use buildpost::post::format_post;
use buildpost::prompt::render;
use common::TestRepo;

/// Returns canned text and records how often it was called.
struct FakeClient {
    response: String,
    calls: AtomicUsize,
}

impl FakeClient {
    fn new(response: &str) -> Self {
        FakeClient {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationClient for FakeClient {
    fn provider(&self) -> Provider {
        Provider::Claude
    }

    async fn check_installed(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Always fails, recording call count.
struct FailingClient {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationClient for FailingClient {
    fn provider(&self) -> Provider {
        Provider::Codex
    }

    async fn check_installed(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::ExecutionFailed(
            Provider::Codex,
            "quota exceeded".to_string(),
        ))
    }
}

fn request_from(summary: &buildpost::CommitSummary) -> GenerationRequest {
    let library = default_library();
    let style = library.style("casual").unwrap();
    let prompt = render(style, summary).unwrap();

    GenerationRequest {
        system: prompt.system,
        user: prompt.user,
        temperature: 0.7,
        max_tokens: 500,
        model: None,
    }
}

#[tokio::test]
async fn test_full_pipeline_produces_compliant_post() {
    let repo = TestRepo::new();
    repo.commit_files(
        &[("src/parser.rs", "fn parse() {}\n"), ("README.md", "# tool\n")],
        "feat(parser): add skeleton parser",
    );

    let summary = extract_commit(&repo.repo, "HEAD").unwrap();
    let request = request_from(&summary);

    // The rendered prompt carries the commit data
    assert!(request.user.contains("feat(parser): add skeleton parser"));
    assert!(request.user.contains("src/parser.rs (+1/-0)"));

    let client = FakeClient::new("Just shipped the first cut of the parser. Small start, big plans.");
    let generated = client.generate(&request).await.unwrap();

    let library = default_library();
    let platform = library.platform("twitter").unwrap();
    let post = format_post(&generated, platform, true);

    assert!(!post.is_empty());
    assert!(post.chars().count() <= platform.max_length);
    assert!(post.contains("#BuildInPublic"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_failure_is_terminal_and_not_retried() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "one\n", "feat: first");

    let summary = extract_commit(&repo.repo, "HEAD").unwrap();
    let request = request_from(&summary);

    let client = FailingClient {
        calls: AtomicUsize::new(0),
    };

    let err = client.generate(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::ExecutionFailed(Provider::Codex, msg) if msg == "quota exceeded"));
    // Single attempt only; the pipeline never retries the boundary
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_long_generation_is_truncated_not_rejected() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "one\n", "feat: first");

    let summary = extract_commit(&repo.repo, "HEAD").unwrap();
    let request = request_from(&summary);

    let long_text = "shipping lots of words today ".repeat(20);
    let client = FakeClient::new(&long_text);
    let generated = client.generate(&request).await.unwrap();

    let library = default_library();
    let platform = library.platform("twitter").unwrap();
    let post = format_post(&generated, platform, true);

    assert!(post.chars().count() <= 280);
    assert!(post.ends_with('…'));
    // Hashtags were omitted rather than squeezed in
    assert!(!post.contains('#'));
}
