//! Preview command - show what an upload contains without OCR.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::read_document;

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Input file (image, PDF or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the preview as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input)?;
    let preview = document.preview()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        style("ℹ").blue(),
        args.input.display(),
        preview.kind
    );
    if let Some(pages) = preview.page_count {
        println!("   Pages: {}", pages);
    }
    if let Some((width, height)) = preview.image_size {
        println!("   Size: {}x{}", width, height);
    }
    if let Some(notice) = &preview.notice {
        println!("{} {}", style("⚠").yellow(), notice);
    }
    if let Some(text) = &preview.text {
        println!();
        println!("{}", text);
    }

    Ok(())
}
