//! Process command - OCR, extract and translate a single bill image.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use billex_core::{MediaKind, RequestOrchestrator};

use super::output::{format_response, OutputFormat};
use super::{apply_language, load_config, read_document};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input bill image (PNG or JPEG)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Target language (code or name), overriding the config
    #[arg(short, long)]
    language: Option<String>,

    /// Print the raw OCR text as well
    #[arg(long)]
    show_text: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_language(&mut config, args.language.as_deref())?;

    let document = read_document(&args.input)?;
    if document.kind != MediaKind::Image {
        anyhow::bail!(
            "{} is a {} file. Only bill images can be OCR'd; use 'billex preview' or 'billex extract' instead.",
            args.input.display(),
            document.kind
        );
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Reading and translating into {}...",
        config.translation.target_language
    ));

    let orchestrator = RequestOrchestrator::from_config(&config)?;
    let response = orchestrator.process_document(document).await;
    pb.finish_and_clear();
    let response = response?;

    if args.validate {
        let issues = response.parsed_info.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    if args.show_text {
        eprintln!("{}", style("OCR text:").bold());
        eprintln!("{}", response.ocr_text);
        eprintln!();
    }

    let output = format_response(&response, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
