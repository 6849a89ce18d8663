use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::model::Effort;

/// Terminal front-end for a streaming web-research agent.
#[derive(Debug, Clone, Parser)]
#[command(name = "research-tui", version, about)]
pub struct Config {
    /// Base URL of the agent server
    #[arg(long, env = "RESEARCH_API_URL", default_value = "http://localhost:2024")]
    pub api_url: String,

    /// Graph (assistant) to run on the server
    #[arg(long, env = "RESEARCH_ASSISTANT_ID", default_value = "agent")]
    pub assistant_id: String,

    /// Initial research effort: low, medium or high
    #[arg(long, env = "RESEARCH_EFFORT", default_value = "medium", value_parser = parse_effort)]
    pub effort: Effort,

    /// Initial reasoning model
    #[arg(long, env = "RESEARCH_MODEL", default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Log file (the terminal is owned by the UI). Defaults to $TMPDIR/research-tui.log
    #[arg(long, env = "RESEARCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

fn parse_effort(s: &str) -> Result<Effort, ConfigError> {
    s.parse()
}

impl Config {
    /// Reject configurations that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("research-tui.log"))
    }
}
