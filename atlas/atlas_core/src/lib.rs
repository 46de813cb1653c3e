//! # Atlas Core
//!
//! `atlas_core` provides the fundamental building blocks for the Atlas
//! plugin host: error types, strongly-typed identifiers, the open settings
//! model, and the descriptor/instance contract that render plugins follow.
//!
//! ## Core Principles
//!
//! The Atlas plugin system rests on a small number of contracts that the
//! host and every plugin agree on:
//!
//! 1. **Descriptor/instance split**: an immutable [`PluginDescriptor`]
//!    carries the identity and factory defaults of a plugin type; every
//!    live, configurable plugin is a [`PluginInstance`] produced by its
//!    descriptor. Descriptors hold no per-instance state.
//!
//! 2. **Settings mirroring**: each instance keeps an open key/value
//!    settings map that always contains the `"enabled"` and `"visible"`
//!    keys, equal to the live flags. The two flags can be driven either
//!    through their setters or through a full settings replacement, and
//!    the mirror holds after every public mutation.
//!
//! 3. **Session state vs. configuration**: `enabled` and `visible` are
//!    session state, not configuration. Restoring factory defaults resets
//!    every configuration key but leaves the two flags untouched, so a
//!    settings-reset action can never hide a plugin the user has shown.
//!
//! 4. **One-way initialization**: `initialize` runs one-time setup at most
//!    once. Setup failure is silent, observable only through
//!    `is_initialized()`, and a later call may retry.
//!
//! 5. **Synchronous notification**: change events are dispatched inline to
//!    explicitly registered callbacks. There is no cross-thread delivery;
//!    the contract is single-threaded and the host serializes access.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for the plugin system
//! - **id**: Strongly-typed identifier types
//! - **settings**: The open settings value model and key/value map
//! - **types**: Plugin metadata and change events
//! - **instance**: The live plugin instance state machine
//! - **traits**: The descriptor (factory) interface

pub mod error;
pub mod id;
pub mod instance;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export key types and traits for convenience
pub use error::{Error, PluginError, Result};
pub use id::{PluginId, SubscriptionId};
pub use instance::PluginInstance;
pub use settings::{Settings, SettingsValue, SETTING_ENABLED, SETTING_VISIBLE};
pub use traits::PluginDescriptor;
pub use types::{PluginEvent, PluginMetadata};
