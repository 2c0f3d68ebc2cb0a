//! Unified error types for bonebox.
//!
//! This module provides the single error type used by every layer, from XML
//! parsing up to the pipeline orchestrator.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
