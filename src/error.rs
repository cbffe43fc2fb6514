use std::fmt;
use thiserror::Error;

/// A single structural problem found while importing a journey document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the offending field, e.g. `steps[2].title`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while importing or converting journey data.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    #[error("Failed to parse journey JSON: {0}")]
    Json(String),

    #[error("Journey document is invalid:\n{}", format_field_errors(.errors))]
    Invalid { errors: Vec<FieldError> },
}

impl ImportError {
    /// The itemized field errors, empty for parse failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ImportError::Invalid { errors } => errors,
            ImportError::Json(_) => &[],
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors that can occur while rasterizing or assembling export documents.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Capture target '{0}' was not found")]
    TargetNotFound(String),

    #[error("An export is already in progress")]
    Busy,

    #[error("Failed to parse SVG for capture target '{target}': {message}")]
    SvgParse { target: String, message: String },

    #[error("Failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    PngEncode(String),

    #[error("Invalid background color '{0}'")]
    InvalidBackground(String),

    #[error("Captured image is empty")]
    EmptyImage,

    #[error("Failed to convert page to PDF: {0}")]
    PdfConvert(String),
}

/// Errors that can occur while loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file '{path}': {message}")]
    Parse { path: String, message: String },
}

/// Errors raised by view-state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Step '{0}' does not exist in this journey")]
    UnknownStep(String),

    #[error("Journey has no steps")]
    EmptyJourney,
}
