use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML writing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Page source '{name}' failed: {message}")]
    SourceError { name: String, message: String },

    #[error("Invalid page '{path}': {reason}")]
    InvalidPageError { path: String, reason: String },

    #[error("Background task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Rendering,
    Storage,
}

impl SitemapError {
    pub fn source_error(name: &str, message: impl Into<String>) -> Self {
        Self::SourceError {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_page(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPageError {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::HttpError(_)
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::SourceError { .. }
            | Self::TaskError { .. } => ErrorCategory::Source,
            Self::XmlError(_) | Self::UrlError(_) | Self::InvalidPageError { .. } => {
                ErrorCategory::Rendering
            }
            Self::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Source => format!("Could not enumerate site pages: {}", self),
            ErrorCategory::Rendering => format!("Could not build sitemap entries: {}", self),
            ErrorCategory::Storage => format!("Could not write sitemap files: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Add the missing key to sitemap.toml or set the environment variable it references"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check sitemap.toml against the documented options"
            }
            Self::HttpError(_) | Self::SourceError { .. } => {
                "Check that the content API is reachable and returns a JSON list"
            }
            Self::CsvError(_) => "Check the routes file header: path,changefreq,priority,lastmod,access",
            Self::SerializationError(_) => "The content API returned a response that is not valid JSON",
            Self::InvalidPageError { .. } | Self::UrlError(_) => {
                "Route paths must be relative to site.base_url or share its origin"
            }
            Self::XmlError(_) => "Re-run with --verbose to see which page failed to serialize",
            Self::IoError(_) => "Check that the output directory exists and is writable",
            Self::TaskError { .. } => "Re-run with --verbose; this usually indicates a panic in a page source",
        }
    }
}

pub type Result<T> = std::result::Result<T, SitemapError>;
