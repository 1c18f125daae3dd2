//! CLI application for the utility-bill explainer.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, chat, config, extract, preview, process, speak};

/// Bill explainer - read a utility bill, translate it and talk about it
#[derive(Parser)]
#[command(name = "billex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OCR, extract and translate a single bill image
    Process(process::ProcessArgs),

    /// Process multiple bill images
    Batch(batch::BatchArgs),

    /// Extract bill fields from a text or PDF file, offline
    Extract(extract::ExtractArgs),

    /// Show the contents of an upload without OCR
    Preview(preview::PreviewArgs),

    /// Ask questions about a bill
    Chat(chat::ChatArgs),

    /// Read text aloud
    Speak(speak::SpeakArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config).await,
        Commands::Batch(args) => batch::run(args, config).await,
        Commands::Extract(args) => extract::run(args).await,
        Commands::Preview(args) => preview::run(args).await,
        Commands::Chat(args) => chat::run(args, config).await,
        Commands::Speak(args) => speak::run(args, config).await,
        Commands::Config(args) => config::run(args, config).await,
    }
}
