use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Fetch failed for {url}: {message}")]
    FetchError { url: String, message: String },

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Decryption failed: {message}")]
    DecryptError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write {file}: {source}")]
    WriteError {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Decrypt,
    Output,
    Config,
    Internal,
}

impl DirectoryError {
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchError {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn decrypt(message: impl Into<String>) -> Self {
        Self::DecryptError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::FetchError { .. } => ErrorCategory::Fetch,
            Self::PdfError(_) | Self::DecryptError { .. } => ErrorCategory::Decrypt,
            Self::WriteError { .. } | Self::CsvError(_) => ErrorCategory::Output,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::IoError(_) => ErrorCategory::Internal,
        }
    }

    /// Process exit code for this failure class. 2 is left to clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Fetch => 3,
            ErrorCategory::Decrypt => 4,
            ErrorCategory::Output => 5,
            ErrorCategory::Config => 6,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => {
                "Check your network connection and the download page / PDF URL"
            }
            ErrorCategory::Decrypt => "Check the PDF password in your configuration",
            ErrorCategory::Output => {
                "Check that the output directory exists, is writable and has free space"
            }
            ErrorCategory::Config => "Fix the configuration file or command line arguments",
            ErrorCategory::Internal => "Re-run with --verbose for more details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) => format!("Could not download the directory: {}", e),
            Self::FetchError { url, message } => {
                format!("Could not download the directory from {}: {}", url, message)
            }
            Self::PdfError(e) => format!("The directory PDF could not be read: {}", e),
            Self::DecryptError { message } => {
                format!("The directory PDF could not be decrypted: {}", message)
            }
            Self::WriteError { file, source } => format!("Could not write {}: {}", file, source),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
