//! # Error Types
//!
//! This module defines error types used throughout the ledboard library.

use thiserror::Error;

/// Main error type for ledboard operations
#[derive(Debug, Error)]
pub enum LedboardError {
    /// Transport-level errors (address resolution, socket setup)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid or incomplete configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Event bus errors (connect, subscribe)
    #[error("Bus error: {0}")]
    Bus(String),

    /// A numeric protocol field outside the encodable 0..=99 range
    #[error("Field value {0} is outside 0..=99")]
    FieldOutOfRange(i64),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
