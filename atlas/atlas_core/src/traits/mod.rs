//! Core traits of the Atlas plugin system.
//!
//! The one interface every plugin type implements is
//! [`PluginDescriptor`], the immutable factory that produces live
//! instances.

pub mod descriptor;

pub use descriptor::PluginDescriptor;
