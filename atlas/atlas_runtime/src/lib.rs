//! Atlas Runtime - plugin registry and manager for the Atlas host
//!
//! This crate provides the components the host embeds to work with
//! plugins: a [`DescriptorRegistry`] enumerating the plugin types
//! available at startup, and a [`PluginManager`] owning the live
//! instances and answering the render/update loop's queries.
//!
//! All operations are synchronous, in-memory mutations of small state;
//! the host serializes access.

pub mod plugin;

pub use plugin::manager::PluginManager;
pub use plugin::registry::DescriptorRegistry;
