use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load cards from {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Card not found: {id}")]
    CardNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DataSource,
    Configuration,
    Output,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn data_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// 是否為資料載入錯誤（來源無法連線或內容格式錯誤）
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::DataLoad { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataLoad { .. } | Self::Http(_) | Self::Serialization(_) => {
                ErrorCategory::DataSource
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::Io(_) | Self::Csv(_) | Self::Readline(_) => ErrorCategory::Output,
            Self::CardNotFound { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DataLoad { .. } | Self::Http(_) => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::Serialization(_)
            | Self::Csv(_)
            | Self::CardNotFound { .. } => ErrorSeverity::High,
            Self::Io(_) | Self::Readline(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataLoad { source_name, .. } => {
                format!("Could not load the card list from {}", source_name)
            }
            Self::Http(_) => "The card data server could not be reached".to_string(),
            Self::Io(e) => format!("A file operation failed: {}", e),
            Self::Serialization(_) => "Card data could not be encoded or decoded".to_string(),
            Self::Csv(_) => "The CSV export could not be written".to_string(),
            Self::Readline(e) => format!("The terminal could not be read: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::ConfigValidationError { field, message } => {
                format!("Setting '{}' failed validation: {}", field, message)
            }
            Self::CardNotFound { id } => format!("No card with id {} in the catalog", id),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::DataSource => {
                "Check that the source exists and contains {\"cards\": [...]} with name, set and price on every card"
            }
            ErrorCategory::Configuration => "Review the command-line flags and the TOML config file",
            ErrorCategory::Output => {
                "Check that the output directory exists and is writable, and that stdin is a terminal"
            }
            ErrorCategory::Lookup => "Run `card-catalog list` to see the available card ids",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
