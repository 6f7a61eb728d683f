use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use anseong_tour::ai::LocalLlm;
use anseong_tour::{logger, server, DispatchResult, Dispatcher, KnowledgeBase, Settings};

#[derive(Parser)]
#[command(name = "anseong-tour")]
#[command(about = "Anseong tourism chatbot with a form page and an HTTP endpoint")]
struct Cli {
    #[arg(short, long, default_value = "config/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the form page and the HTTP endpoint (default)
    Serve,
    /// Answer a single question and exit
    Ask { input: String },
    /// List the known tourist spots
    Spots,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    logger::init(&settings.logging)?;

    info!("Starting anseong-tour v{}", env!("CARGO_PKG_VERSION"));

    let knowledge = match &settings.knowledge.path {
        Some(path) => KnowledgeBase::from_json_file(path)?,
        None => KnowledgeBase::anseong(),
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Spots => {
            for entry in knowledge.list_all() {
                println!("{}: {}", entry.name, entry.description);
            }
            Ok(())
        }
        Command::Ask { input } => {
            let dispatcher = build_dispatcher(&settings, knowledge).await?;
            match dispatcher.ask(input).await? {
                DispatchResult::LocationList(entries) => {
                    for entry in entries {
                        println!("{}: {}\n  {}", entry.name, entry.description, entry.image_ref);
                    }
                }
                DispatchResult::GeneratedText(text) => println!("{text}"),
            }
            Ok(())
        }
        Command::Serve => {
            let dispatcher = build_dispatcher(&settings, knowledge).await?;
            if let Err(e) = server::serve(dispatcher, &settings.server).await {
                error!("Server stopped: {}", e);
                return Err(e.into());
            }
            Ok(())
        }
    }
}

// The model must load before any surface starts; failure here ends the process.
async fn build_dispatcher(
    settings: &Settings,
    knowledge: KnowledgeBase,
) -> anyhow::Result<Arc<Dispatcher>> {
    let llm = LocalLlm::load(&settings.model)
        .await
        .context("Failed to load language model")?;

    let dispatcher = Dispatcher::new(
        Arc::new(knowledge),
        Box::new(llm),
        &settings.knowledge,
        settings.model.max_length,
    )?;
    Ok(Arc::new(dispatcher))
}
