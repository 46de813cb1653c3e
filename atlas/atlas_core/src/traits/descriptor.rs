//! The plugin descriptor (factory) interface.

use crate::instance::PluginInstance;
use crate::settings::Settings;
use crate::types::PluginMetadata;

/// Immutable factory and identity for a plugin type.
///
/// A descriptor is registered once and produces any number of live
/// instances; it holds no mutable per-instance state. The provided
/// `new_instance` assembles an instance from the descriptor's defaults;
/// implementations override it when they need to attach an initializer
/// hook or richer construction.
///
/// # Examples
///
/// ```
/// use atlas_core::traits::PluginDescriptor;
/// use atlas_core::types::PluginMetadata;
/// use atlas_core::settings::Settings;
///
/// struct CompassDescriptor;
///
/// impl PluginDescriptor for CompassDescriptor {
///     fn name_id(&self) -> &str {
///         "compass"
///     }
///
///     fn metadata(&self) -> PluginMetadata {
///         PluginMetadata::new("compass", "Compass", "1.0.0", "Compass rose overlay")
///     }
///
///     fn default_settings(&self) -> Settings {
///         let mut defaults = Settings::new();
///         defaults.insert("corner", "top-right");
///         defaults
///     }
/// }
///
/// let instance = CompassDescriptor.new_instance();
/// assert!(instance.enabled());
/// assert_eq!(instance.settings().get_str("corner"), Some("top-right"));
/// ```
pub trait PluginDescriptor: Send + Sync {
    /// Unique machine-readable key of the plugin type.
    fn name_id(&self) -> &str;

    /// Identity copied into every instance.
    fn metadata(&self) -> PluginMetadata;

    /// Whether new instances start enabled.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Whether new instances start visible.
    fn visible_by_default(&self) -> bool {
        true
    }

    /// Factory defaults for the configuration keys. Must not contain the
    /// mirrored `enabled`/`visible` keys; those are seeded from the two
    /// methods above.
    fn default_settings(&self) -> Settings {
        Settings::new()
    }

    /// Produce a fresh live instance.
    fn new_instance(&self) -> PluginInstance {
        PluginInstance::new(
            self.metadata(),
            self.default_settings(),
            self.enabled_by_default(),
            self.visible_by_default(),
        )
    }
}
