//! Error types shared by the extractor, graph, metric and audit layers.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for modmap operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Dependency extraction errors (unreadable or malformed adjacency data)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Layout diagram could not be used
    #[error("Layout error: {0}")]
    Layout(String),

    /// Graph construction errors
    #[error("Graph error: {0}")]
    Graph(String),

    /// A metric computation failed
    #[error("Metric '{metric}' failed: {message}")]
    Metric {
        metric: &'static str,
        message: String,
    },

    /// A pipeline stage panicked
    #[error("Stage '{stage}' panicked: {message}")]
    StagePanicked {
        stage: &'static str,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl AuditError {
    /// Wrap an IO error with the path that caused it
    pub fn io_at(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{}: {}", path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout(message.into())
    }

    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph(message.into())
    }

    pub fn metric(metric: &'static str, message: impl Into<String>) -> Self {
        Self::Metric {
            metric,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Error category name, used in diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileSystem { .. } | Self::Io(_) => "io",
            Self::Extraction(_) | Self::Json(_) => "extraction",
            Self::Layout(_) => "layout",
            Self::Graph(_) => "graph",
            Self::Metric { .. } => "metric",
            Self::StagePanicked { .. } => "panic",
            Self::Configuration(_) | Self::Toml(_) | Self::Pattern(_) => "config",
        }
    }
}

/// Result type alias for modmap operations
pub type Result<T> = std::result::Result<T, AuditError>;
