//! Subcommands and the helpers they share.

pub mod batch;
pub mod chat;
pub mod config;
pub mod extract;
pub mod output;
pub mod preview;
pub mod process;
pub mod speak;

use std::path::{Path, PathBuf};

use billex_core::{BillexConfig, Language, RawDocument};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billex")
        .join("config.json")
}

/// The explicit `--config` path, or the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the config file (when present) and overlay the environment.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<BillexConfig> {
    let path = config_path(explicit);

    let mut config = if path.exists() {
        BillexConfig::from_file(&path)?
    } else if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        BillexConfig::default()
    };

    config.apply_env()?;
    Ok(config)
}

/// Override the target language from a `--language` flag.
pub fn apply_language(config: &mut BillexConfig, language: Option<&str>) -> anyhow::Result<()> {
    if let Some(name) = language {
        config.translation.target_language = name.parse::<Language>()?;
    }
    Ok(())
}

/// Read a file from disk and detect its kind from the extension and bytes.
pub fn read_document(path: &Path) -> anyhow::Result<RawDocument> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let bytes = std::fs::read(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).map(str::to_string);
    Ok(RawDocument::from_upload(bytes, None, filename)?)
}
