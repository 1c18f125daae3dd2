//! Chat command - ask questions about a bill, optionally hearing the answers.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use billex_core::generate::GenerationParams;
use billex_core::{ChatService, ChatTranscript, ChatTurn, ModelHandle};

use super::speak::{audio_extension, speech_service, write_audio};
use super::{apply_language, load_config};

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Ask a single question and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Language for the UI and spoken replies (code or name)
    #[arg(short, long)]
    language: Option<String>,

    /// Directory for audio written by /speak (default: current directory)
    #[arg(long)]
    audio_dir: Option<PathBuf>,
}

pub async fn run(args: ChatArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    apply_language(&mut config, args.language.as_deref())?;
    let language = config.translation.target_language;

    let model = ModelHandle::initialize(&config.generation, config.hf_token.as_deref()).await;
    if let Some(reason) = model.unavailable_reason() {
        warn!("Chat model unavailable: {}", reason);
    }
    let chat = ChatService::new(model, GenerationParams::from(&config.generation));

    if let Some(query) = args.query {
        println!("{}", chat.reply(&query).await?);
        return Ok(());
    }

    let speech = speech_service(&config);
    let ui = language.ui_strings();
    let audio_dir = args.audio_dir.unwrap_or_else(|| PathBuf::from("."));

    println!("{}", style(ui.title).bold());
    println!("{}", style(ui.chat).cyan());
    println!(
        "{}",
        style("Commands: /speak reads the last reply aloud, /quit exits").dim()
    );

    let mut transcript = ChatTranscript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", style(ui.input).green());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/speak" => {
                match speech.speak_last(&transcript, language).await {
                    Ok(Some(audio)) => {
                        let path = audio_dir.join(format!(
                            "reply-{}.{}",
                            transcript.len(),
                            audio_extension(&audio.content_type)
                        ));
                        write_audio(&path, &audio, language)?;
                    }
                    Ok(None) => println!("{} Nothing to speak yet", style("ℹ").blue()),
                    Err(e) => eprintln!("{} {}", style("✗").red(), e),
                }
            }
            query => {
                transcript.push(ChatTurn::user(query));
                match chat.reply(query).await {
                    Ok(reply) => {
                        println!("{}", reply);
                        transcript.push(ChatTurn::assistant(reply));
                    }
                    Err(e) => eprintln!("{} {}", style("✗").red(), e),
                }
            }
        }
    }

    Ok(())
}
