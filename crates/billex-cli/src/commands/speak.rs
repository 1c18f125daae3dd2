//! Speak command - synthesize speech for a piece of text.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use billex_core::speech::HuggingFaceSpeech;
use billex_core::{BillexConfig, Language, SpeechService, SynthesizedAudio};

use super::{apply_language, load_config};

/// Arguments for the speak command.
#[derive(Args)]
pub struct SpeakArgs {
    /// Text to read aloud
    #[arg(required = true)]
    text: String,

    /// Language (code or name), overriding the config
    #[arg(short, long)]
    language: Option<String>,

    /// Output audio file (default: speech.<ext> for the returned format)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: SpeakArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    apply_language(&mut config, args.language.as_deref())?;
    let language = config.translation.target_language;

    let speech = speech_service(&config);
    let audio = speech.speak(&args.text, language).await?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("speech.{}", audio_extension(&audio.content_type))));
    write_audio(&path, &audio, language)
}

pub fn speech_service(config: &BillexConfig) -> SpeechService {
    SpeechService::new(Arc::new(HuggingFaceSpeech::from_config(
        &config.speech,
        config.hf_token.clone(),
    )))
}

pub fn write_audio(path: &Path, audio: &SynthesizedAudio, language: Language) -> anyhow::Result<()> {
    fs::write(path, &audio.bytes)?;
    info!("Wrote {} bytes of {}", audio.bytes.len(), audio.content_type);
    println!(
        "{} {} audio written to {}",
        style("✓").green(),
        language,
        path.display()
    );
    Ok(())
}

/// File extension for an audio MIME type.
pub fn audio_extension(content_type: &str) -> &'static str {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    match mime {
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" => "ogg",
        _ => "wav",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extension() {
        assert_eq!(audio_extension("audio/flac"), "flac");
        assert_eq!(audio_extension("audio/mpeg; charset=binary"), "mp3");
        assert_eq!(audio_extension("audio/wav"), "wav");
        assert_eq!(audio_extension("application/octet-stream"), "wav");
    }
}
