use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for labelport operations.
#[derive(Debug, Error)]
pub enum LabelportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse annotation set JSON from {path}: {source}")]
    AnnotationSetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Failed to write YAML: {0}")]
    YamlWrite(#[source] serde_yaml::Error),

    #[error("Failed to write CSV: {0}")]
    CsvWrite(#[source] csv::Error),

    #[error("Failed to render {format} output")]
    TextRender {
        format: &'static str,
        #[source]
        source: std::fmt::Error,
    },

    #[error("Export produced invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageSizeRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image dimensions of {path} are invalid: {message}")]
    ImageSizeInvalid { path: PathBuf, message: String },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
