pub mod cli;
pub mod http;
pub mod toml_config;

use crate::core::{CardSource, Result};
use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{
    is_remote_location, validate_non_empty_string, validate_path, validate_range,
    validate_source_location, Validate,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::CatalogFileConfig;

pub const DEFAULT_SOURCE: &str = "cards.json";
pub const DEFAULT_BAR_WIDTH: usize = 30;
pub const DEFAULT_EXPORT_PATH: &str = "./export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "cards.csv",
            ExportFormat::Json => "cards.json",
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Set name to show, or "All"
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive text matched against name, set and set number
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the (filtered) card grid and summary
    List(FilterArgs),
    /// Print the category selector entries
    Sets,
    /// Print the full detail of one card
    Show { id: String },
    /// Remove a card after confirmation (not saved)
    Delete {
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Interactive session on stdin
    Browse,
    /// Write the filtered view to a file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "card-catalog")]
#[command(about = "Browse a trading card catalog from the terminal")]
pub struct CliConfig {
    /// Card data file path or http(s) URL
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Optional TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI flags layered over the config file, layered over built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source_location: String,
    pub timeout_seconds: Option<u64>,
    pub default_category: Option<String>,
    pub bar_width: usize,
    pub export_path: String,
    pub export_format: ExportFormat,
}

impl Settings {
    pub fn resolve(cli: &CliConfig, file: Option<&CatalogFileConfig>) -> Self {
        let source = file.and_then(|f| f.source.as_ref());
        let display = file.and_then(|f| f.display.as_ref());
        let export = file.and_then(|f| f.export.as_ref());

        Self {
            source_location: cli
                .source
                .clone()
                .or_else(|| source.and_then(|s| s.location.clone()))
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            timeout_seconds: cli
                .timeout_seconds
                .or_else(|| source.and_then(|s| s.timeout_seconds)),
            default_category: display.and_then(|d| d.default_category.clone()),
            bar_width: display
                .and_then(|d| d.bar_width)
                .unwrap_or(DEFAULT_BAR_WIDTH),
            export_path: export
                .and_then(|e| e.output_path.clone())
                .unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string()),
            export_format: export
                .and_then(|e| e.format)
                .unwrap_or(ExportFormat::Csv),
        }
    }

    /// 載入 `--config` 指定的檔案（若有）並合併設定
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(CatalogFileConfig::from_file(path)?),
            None => None,
        };
        let settings = Self::resolve(cli, file.as_ref());
        settings.validate()?;
        Ok(settings)
    }

    pub fn open_source(&self) -> Result<Box<dyn CardSource>> {
        open_source(self)
    }
}

/// Pick the card source implementation for the configured location.
pub fn open_source<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn CardSource>> {
    let location = config.source_location();
    if is_remote_location(location) {
        Ok(Box::new(http::HttpSource::new(
            location,
            config.timeout_seconds(),
        )?))
    } else {
        Ok(Box::new(cli::FileSource::new(location)))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_source_location("source", &self.source_location)?;
        validate_range("display.bar_width", self.bar_width, 1, 200)?;
        validate_path("export.output_path", &self.export_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }
        if let Some(category) = &self.default_category {
            validate_non_empty_string("display.default_category", category)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn source_location(&self) -> &str {
        &self.source_location
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn default_category(&self) -> Option<&str> {
        self.default_category.as_deref()
    }

    fn bar_width(&self) -> usize {
        self.bar_width
    }

    fn export_path(&self) -> &str {
        &self.export_path
    }
}
