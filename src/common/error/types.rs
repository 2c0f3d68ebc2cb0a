//! Error taxonomy for slide extraction.
//!
//! Only [`Error::NotFound`] on the top-level slides directory and configuration
//! problems are fatal for a run. Callers isolate everything else to a slide, a
//! reference or a single path command.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bonebox operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed markup in a slide or relationships document
    #[error("Parse error: {0}")]
    Parse(String),

    /// A referenced file or directory does not exist
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A drawing command carries fewer points than its type requires
    #[error("Malformed path command <{command}>: expected {required} points, found {found}")]
    MalformedPathCommand {
        command: &'static str,
        required: usize,
        found: usize,
    },

    /// A drawing command coordinate does not fit in EMU range once scaled
    #[error("Coordinate overflow in path command <{command}>")]
    CoordinateOverflow { command: &'static str },

    /// JSON (de)serialization of an output document failed
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration file could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// A command-line or API argument is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for bonebox operations.
pub type Result<T> = std::result::Result<T, Error>;
