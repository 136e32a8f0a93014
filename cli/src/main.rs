//! CLI entrypoint for story-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use story_chat_application::{StoryChatService, StoryGenerator};
use story_chat_infrastructure::{
    ConfigLoader, FileConfig, FileGenerationConfig, JsonlConversationLogger,
    OfflineStoryGenerator,
};
use story_chat_presentation::{ChatRepl, Cli, OutputFormat, ReplConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("Effective configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, config.logging.log_dir.as_deref());
    info!("Starting story-chat");

    check_config(&config)?;

    // === Dependency Injection ===
    let generator = build_generator(&config.generation)?;
    let mut service = StoryChatService::new(
        generator,
        config.session.to_session_config(),
        config.generation_params(),
    );

    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::open(path) {
            Ok(logger) => {
                info!("Conversation log: {}", logger.path().display());
                service = service.with_conversation_logger(Arc::new(logger));
            }
            Err(e) => warn!("Conversation log disabled ({}): {}", path.display(), e),
        }
    }
    let service = Arc::new(service);

    let shutdown = CancellationToken::new();
    let sweeper = service
        .session_config()
        .sweep_interval
        .map(|interval| service.spawn_sweeper(interval, shutdown.clone()));

    let repl_config = ReplConfig {
        show_progress: !cli.quiet && cli.output == OutputFormat::Text,
        output: cli.output,
        ..ReplConfig::default()
    };
    let mut repl = ChatRepl::new(Arc::clone(&service), repl_config);

    let result = if cli.message.is_empty() {
        repl.run().await.map_err(anyhow::Error::from)
    } else {
        repl.run_once(&cli.message).await;
        Ok(())
    };

    shutdown.cancel();
    if let Some(handle) = sweeper {
        let _ = handle.await;
    }

    result
}

/// Install the tracing subscriber; the returned guard flushes the log file on drop
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "story-chat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}

/// Report configuration issues; errors stop startup
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            errors += 1;
            error!("{}", issue.message);
            eprintln!("Config error: {}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if errors > 0 {
        bail!("Invalid configuration ({} error(s))", errors);
    }
    Ok(())
}

fn build_generator(config: &FileGenerationConfig) -> Result<Arc<dyn StoryGenerator>> {
    match config.provider.to_lowercase().as_str() {
        "offline" => Ok(Arc::new(OfflineStoryGenerator)),
        #[cfg(feature = "ollama")]
        "ollama" => Ok(Arc::new(
            story_chat_infrastructure::OllamaStoryGenerator::new(
                config.endpoint.as_str(),
                config.model.as_str(),
            )?,
        )),
        other => bail!("Generation provider '{}' is not available in this build", other),
    }
}
