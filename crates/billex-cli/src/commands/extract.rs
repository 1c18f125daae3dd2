//! Extract command - run the field extractor on a text or PDF file.
//!
//! Works offline: no OCR, translation or model calls.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use billex_core::upload::PDF_NO_TEXT_NOTICE;
use billex_core::{BillFieldExtractor, MediaKind};

use super::output::{format_record, OutputFormat};
use super::read_document;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (.txt or text-based .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List every amount and date candidate, not just the first
    #[arg(long)]
    candidates: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input)?;

    let text = match document.kind {
        MediaKind::Image => anyhow::bail!(
            "{} is an image and needs OCR; use 'billex process' instead.",
            args.input.display()
        ),
        MediaKind::Pdf | MediaKind::PlainText => {
            let preview = document.preview()?;
            match preview.text {
                Some(text) => text,
                None => anyhow::bail!("{}", PDF_NO_TEXT_NOTICE),
            }
        }
    };

    info!("Extracting fields from {} chars", text.len());

    let extractor = BillFieldExtractor::new();
    let record = extractor.extract(&text);

    println!("{}", format_record(&record, args.format)?);

    if args.candidates {
        eprintln!("{}", style("Amount candidates:").bold());
        for amount in extractor.amount_candidates(&text) {
            eprintln!("  - {}", amount);
        }
        eprintln!("{}", style("Date candidates:").bold());
        for date in extractor.date_candidates(&text) {
            eprintln!("  - {}", date);
        }
    }

    if args.validate {
        let issues = record.validate();
        if issues.is_empty() {
            eprintln!("{} No validation issues", style("✓").green());
        } else {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    Ok(())
}
