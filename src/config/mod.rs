pub mod toml_config;

pub use toml_config::AssistantConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "recycle-assist")]
#[command(about = "Chat with a recycling assistant that points you to nearby recyclers")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a TOML catalog file (overrides the config file)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Thinking delay in milliseconds (overrides the config file)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Answer a single message and exit
    #[arg(short, long)]
    pub message: Option<String>,

    /// Write the conversation as JSON to this file on exit
    #[arg(long)]
    pub transcript: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<AssistantConfig> {
        let mut config = match &self.config {
            Some(path) => AssistantConfig::from_file(path)?,
            None => AssistantConfig::default(),
        };

        if let Some(catalog) = &self.catalog {
            tracing::debug!("Catalog overridden to: {}", catalog);
            config.set_catalog_path(catalog.clone());
        }

        if let Some(delay) = self.delay_ms {
            tracing::debug!("Thinking delay overridden to: {}ms", delay);
            config.assistant.thinking_delay_ms = delay;
        }

        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).json = true;
        }

        Ok(config)
    }
}
