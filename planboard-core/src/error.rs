//! Error types for planboard.

use thiserror::Error;

use crate::event::EventId;
use crate::form::FormError;

/// Errors that can occur in planboard operations.
#[derive(Error, Debug)]
pub enum PlanboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value '{value}' for preference '{key}'")]
    Preference { key: String, value: String },

    #[error("Unknown preference '{0}'")]
    UnknownPreference(String),

    #[error("Invalid date/time '{0}'")]
    InvalidTime(String),

    #[error("Invalid color '{0}'. Use a #rrggbb hex value or a category name")]
    InvalidColor(String),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Events API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not reach events API: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for planboard operations.
pub type PlanboardResult<T> = Result<T, PlanboardError>;
