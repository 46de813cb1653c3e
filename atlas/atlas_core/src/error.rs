//! Error types for the Atlas plugin system.
//!
//! The error surface at this layer is deliberately narrow. Every setter on
//! a plugin instance is a total function over its domain (booleans and
//! key/value maps) and cannot fail; the one failure class that matters is
//! initialization that did not complete, and that is surfaced through
//! `is_initialized()` rather than a propagated error. What remains here is
//! the initializer hook's error channel and the serde helpers used by
//! whatever component persists settings.

use thiserror::Error;

/// Root error type for the Atlas plugin system.
#[derive(Debug, Error)]
pub enum Error {
    /// Plugin-related errors
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors related to plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// One-time setup could not complete. The instance stays
    /// uninitialized and a later `initialize` call may retry.
    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(String),
}

/// Result type used throughout the Atlas plugin system.
pub type Result<T> = std::result::Result<T, Error>;
