//! buildpost - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buildpost::config::{ConfigStore, resolve_provider};
use buildpost::git::{extract_commit, extract_range, open_repository};
use buildpost::llm::{GenerationRequest, client_for};
use buildpost::post::format_post;
use buildpost::prompt::render;

/// Turn git commits into social media posts using AI.
#[derive(Parser, Debug)]
#[command(name = "buildpost")]
#[command(about = "Turn your git commits into social media posts using AI")]
#[command(version)]
struct Cli {
    /// Specific commit to post about (hash, branch, or tag; defaults to HEAD)
    #[arg(short = 'c', long)]
    commit: Option<String>,

    /// Commit range to summarize (e.g. HEAD~5..HEAD)
    #[arg(short = 'r', long, conflicts_with = "commit")]
    range: Option<String>,

    /// Prompt style (casual, professional, ...)
    #[arg(short = 's', long)]
    style: Option<String>,

    /// Target platform (twitter, linkedin, ...)
    #[arg(short = 'p', long)]
    platform: Option<String>,

    /// Exclude hashtags from the post
    #[arg(long)]
    no_hashtags: bool,

    /// Generation provider to use (claude, codex)
    #[arg(long)]
    provider: Option<String>,

    /// Model override for the provider CLI
    #[arg(long)]
    model: Option<String>,

    /// Print the rendered prompt without calling the provider
    #[arg(long)]
    dry_run: bool,

    /// Config directory (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage buildpost configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Inspect prompt styles
    Styles {
        #[command(subcommand)]
        command: StyleCommands,
    },
    /// Inspect platform specs
    Platforms {
        #[command(subcommand)]
        command: PlatformCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current settings
    Show,
    /// Switch the active generation provider
    SetProvider {
        provider: String,
        /// Default model to use with this provider
        #[arg(long)]
        model: Option<String>,
    },
    /// Write default config files
    Init,
    /// Reset settings to defaults
    Reset,
}

#[derive(Subcommand, Debug)]
enum StyleCommands {
    /// List available prompt styles
    List,
}

#[derive(Subcommand, Debug)]
enum PlatformCommands {
    /// List available platforms
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BUILDPOST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = config_store(cli.config_dir.clone())?;

    match &cli.command {
        Some(Commands::Config { command }) => run_config(command, &store),
        Some(Commands::Styles {
            command: StyleCommands::List,
        }) => list_styles(&store),
        Some(Commands::Platforms {
            command: PlatformCommands::List,
        }) => list_platforms(&store),
        None => run_generate(&cli, &store).await,
    }
}

fn config_store(dir: Option<PathBuf>) -> Result<ConfigStore> {
    match dir {
        Some(dir) => Ok(ConfigStore::new(dir)),
        None => ConfigStore::from_project_dirs().context("Failed to locate config directory"),
    }
}

/// The generate pipeline: extract → render → generate → format.
async fn run_generate(cli: &Cli, store: &ConfigStore) -> Result<()> {
    // Step 1: Load configuration
    let settings = store
        .load_settings()
        .context("Failed to load configuration")?;
    let library = store.load_library().context("Failed to load style library")?;

    // Step 2: Open git repository
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let repo = open_repository(&cwd)?;

    // Step 3: Extract the commit summary
    let summary = if let Some(range) = &cli.range {
        println!("Summarizing range {range}...");
        extract_range(&repo, range)?
    } else {
        extract_commit(&repo, cli.commit.as_deref().unwrap_or("HEAD"))?
    };

    println!("Commit: {}", summary.short_hash);
    println!("Message: {}", summary.subject());
    println!(
        "Files: {} changed (+{}/-{})",
        summary.files_count, summary.insertions, summary.deletions
    );

    // Step 4: Resolve style and platform
    let style_key = cli.style.as_deref().unwrap_or(&settings.defaults.style);
    let platform_key = cli
        .platform
        .as_deref()
        .unwrap_or(&settings.defaults.platform);

    let style = library.style(style_key)?;
    let platform = library.platform(platform_key)?;

    // Step 5: Render the prompt
    let prompt = render(style, &summary)?;

    if cli.dry_run {
        println!("\n--- System Prompt ---\n{}", prompt.system);
        println!("\n--- User Prompt ---\n{}", prompt.user);
        return Ok(());
    }

    // Step 6: Call the generation provider (single attempt, no retry)
    let provider = match &cli.provider {
        Some(key) => resolve_provider(key)?,
        None => settings.active_provider()?,
    };

    let client = client_for(provider);
    client.check_installed().await?;

    let request = GenerationRequest {
        system: prompt.system,
        user: prompt.user,
        temperature: settings.generation.temperature,
        max_tokens: settings.generation.max_tokens,
        model: cli.model.clone().or_else(|| settings.model_for(provider)),
    };

    println!("\nGenerating post with {provider}...");
    let generated = client
        .generate(&request)
        .await
        .context("Failed to generate post")?;

    // Step 7: Format for the platform
    let include_hashtags = !cli.no_hashtags && settings.defaults.include_hashtags;
    let post = format_post(&generated, platform, include_hashtags);

    if post.is_empty() {
        bail!(
            "Formatted post is empty: platform '{platform_key}' max_length {} cannot hold the generated content",
            platform.max_length
        );
    }

    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("{post}");
    println!("{rule}");
    println!(
        "Characters: {}/{} ({style_key} | {platform_key})",
        post.chars().count(),
        platform.max_length
    );

    Ok(())
}

fn run_config(command: &ConfigCommands, store: &ConfigStore) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let settings = store
                .load_settings()
                .context("Failed to load configuration")?;
            print!("{}", serde_yaml::to_string(&settings)?);
            println!("# config directory: {}", store.dir().display());
        }
        ConfigCommands::SetProvider { provider, model } => {
            let resolved = resolve_provider(provider)?;

            let mut settings = store
                .load_settings()
                .context("Failed to load configuration")?;
            settings.provider = resolved.key().to_string();
            if let Some(model) = model {
                settings
                    .models
                    .insert(resolved.key().to_string(), model.clone());
            }
            store.save_settings(&settings)?;

            println!("✓ Active provider set to {resolved}.");
            if let Some(model) = model {
                println!("  Default model set to '{model}'.");
            }
        }
        ConfigCommands::Init => {
            let created = store.init()?;
            if created.is_empty() {
                println!(
                    "Configuration already initialized at {}",
                    store.dir().display()
                );
            } else {
                for path in created {
                    println!("✓ Wrote {}", path.display());
                }
            }
        }
        ConfigCommands::Reset => {
            store.reset()?;
            println!("✓ Settings reset to defaults.");
        }
    }

    Ok(())
}

fn list_styles(store: &ConfigStore) -> Result<()> {
    let library = store.load_library().context("Failed to load style library")?;

    println!("Available styles:\n");
    for style in library.styles() {
        println!("  {:<14} {:<14} {}", style.key, style.name, style.description);
    }

    Ok(())
}

fn list_platforms(store: &ConfigStore) -> Result<()> {
    let library = store.load_library().context("Failed to load style library")?;

    println!("Available platforms:\n");
    for platform in library.platforms() {
        println!(
            "  {:<10} {:<10} max {:>5} chars",
            platform.key, platform.name, platform.max_length
        );
        for guideline in &platform.guidelines {
            println!("             - {guideline}");
        }
    }

    Ok(())
}
