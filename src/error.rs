//! # Error Types
//!
//! This module defines error types used throughout the moire library.

use thiserror::Error;

/// Main error type for moire operations
#[derive(Debug, Error)]
pub enum MoireError {
    /// Image settings rejected at the input boundary
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Preference store could not be read or written
    #[error("Preferences error: {0}")]
    Preferences(String),

    /// Export target invalid or encoding failed
    #[error("Export error: {0}")]
    Export(String),

    /// Raster allocation or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
