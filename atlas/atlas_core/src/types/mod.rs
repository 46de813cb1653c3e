//! Core data types for the Atlas plugin system.

pub mod plugin;

pub use plugin::{PluginEvent, PluginMetadata};
