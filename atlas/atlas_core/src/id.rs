//! Strongly-typed identifiers for the Atlas plugin system.
//!
//! Identifiers are thin wrappers around a UUID with a phantom type
//! parameter, so an identifier for one entity type cannot be passed where
//! another is expected even though both share the same representation.
//!
//! # Examples
//!
//! ```
//! use atlas_core::id::{PluginId, SubscriptionId};
//! use std::str::FromStr;
//!
//! let plugin_id = PluginId::new();
//! let subscription_id = SubscriptionId::new();
//!
//! // Parse a known identifier back from its string form.
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let parsed = PluginId::from_str(id_str).unwrap();
//! assert_eq!(parsed.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// The phantom parameter `T` is a marker type that specializes the
/// identifier for one entity kind; identifiers of different kinds are
/// distinct types and do not compare or assign across kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier (UUID v4).
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Create an identifier from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Create a nil (all zeros) identifier, usable as a sentinel.
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Check if this is the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid == Uuid::nil()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            uuid: Uuid::parse_str(s)?,
            _marker: std::marker::PhantomData,
        })
    }
}

/// Marker type for plugin instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginMarker;
/// Identifier for a live plugin instance.
pub type PluginId = Id<PluginMarker>;

/// Marker type for event subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionMarker;
/// Handle for a registered event callback.
pub type SubscriptionId = Id<SubscriptionMarker>;
