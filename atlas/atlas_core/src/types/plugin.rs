//! Plugin metadata and change events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable identity of a plugin type.
///
/// Metadata is carried by the descriptor and copied into every instance it
/// produces. It holds no per-instance state; `name_id` is the unique key
/// the registry and the settings persistence layer use to refer to the
/// plugin type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique machine-readable key (e.g. `"grid-overlay"`).
    pub name_id: String,

    /// Human-readable name.
    pub name: String,

    /// Version string.
    pub version: String,

    /// Description of the plugin.
    pub description: String,

    /// Author information.
    pub authors: Vec<String>,
}

impl PluginMetadata {
    /// Create new plugin metadata with no authors listed.
    pub fn new(
        name_id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name_id: name_id.into(),
            name: name.into(),
            version: version.into(),
            description: description.into(),
            authors: Vec::new(),
        }
    }

    /// Attach author information.
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }
}

/// A change notification emitted by a plugin instance.
///
/// Events are dispatched synchronously to registered callbacks, after the
/// mutation they describe is observable on the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginEvent {
    /// The `enabled` flag changed to the carried value.
    EnabledChanged(bool),

    /// The `visible` flag changed to the carried value.
    VisibleChanged(bool),

    /// The settings map was replaced or reset.
    SettingsChanged,

    /// One-time setup completed.
    Initialized,
}

impl fmt::Display for PluginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnabledChanged(v) => write!(f, "enabled changed to {}", v),
            Self::VisibleChanged(v) => write!(f, "visible changed to {}", v),
            Self::SettingsChanged => write!(f, "settings changed"),
            Self::Initialized => write!(f, "initialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_constructor() {
        let metadata = PluginMetadata::new(
            "grid-overlay",
            "Coordinate Grid",
            "1.2.0",
            "Draws a configurable coordinate grid",
        )
        .with_authors(vec!["Atlas Project".to_string()]);

        assert_eq!(metadata.name_id, "grid-overlay");
        assert_eq!(metadata.name, "Coordinate Grid");
        assert_eq!(metadata.version, "1.2.0");
        assert_eq!(metadata.authors, vec!["Atlas Project".to_string()]);
    }

    #[test]
    fn test_metadata_serde() {
        let metadata = PluginMetadata::new("compass", "Compass", "0.9.1", "Compass rose overlay");
        let serialized = serde_json::to_string(&metadata).unwrap();
        let deserialized: PluginMetadata = serde_json::from_str(&serialized).unwrap();
        assert_eq!(metadata, deserialized);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            PluginEvent::EnabledChanged(false).to_string(),
            "enabled changed to false"
        );
        assert_eq!(PluginEvent::SettingsChanged.to_string(), "settings changed");
        assert_eq!(PluginEvent::Initialized.to_string(), "initialized");
    }
}
