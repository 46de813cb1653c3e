//! Plugin Descriptor Registry
//!
//! Holds the sequence of plugin descriptors available to the host. The
//! registry is populated once at startup and consulted whenever the host
//! needs to enumerate plugin types or produce a fresh instance.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::info;

use atlas_core::instance::PluginInstance;
use atlas_core::traits::PluginDescriptor;

/// Errors that can occur in registry operations
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("Plugin type {0} not found")]
    NotFound(String),

    #[error("Plugin type {0} already registered")]
    AlreadyRegistered(String),
}

/// The descriptor registry manages the plugin types known to the host.
///
/// Descriptors are keyed by `name_id`; registration order is preserved so
/// enumeration is stable across runs.
pub struct DescriptorRegistry {
    /// Map of name_id to descriptor
    descriptors: RwLock<HashMap<String, Arc<dyn PluginDescriptor>>>,

    /// name_ids in registration order
    order: RwLock<Vec<String>>,
}

impl DescriptorRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Register a descriptor.
    ///
    /// Fails if a descriptor with the same `name_id` is already present.
    pub fn register(&self, descriptor: Arc<dyn PluginDescriptor>) -> Result<()> {
        let name_id = descriptor.name_id().to_string();

        let mut descriptors = self.descriptors.write();
        if descriptors.contains_key(&name_id) {
            return Err(RegistryError::AlreadyRegistered(name_id).into());
        }

        descriptors.insert(name_id.clone(), descriptor);
        self.order.write().push(name_id.clone());

        info!(plugin = %name_id, "registered plugin type");

        Ok(())
    }

    /// Unregister a descriptor by `name_id`.
    pub fn unregister(&self, name_id: &str) -> Result<()> {
        let removed = self.descriptors.write().remove(name_id);
        if removed.is_none() {
            return Err(RegistryError::NotFound(name_id.to_string()).into());
        }

        self.order.write().retain(|id| id != name_id);

        info!(plugin = %name_id, "unregistered plugin type");

        Ok(())
    }

    /// Check whether a plugin type is registered.
    pub fn contains(&self, name_id: &str) -> bool {
        self.descriptors.read().contains_key(name_id)
    }

    /// Get a descriptor by `name_id`.
    pub fn get(&self, name_id: &str) -> Option<Arc<dyn PluginDescriptor>> {
        self.descriptors.read().get(name_id).cloned()
    }

    /// All registered `name_id`s, in registration order.
    pub fn name_ids(&self) -> Vec<String> {
        self.order.read().clone()
    }

    /// All registered descriptors, in registration order.
    pub fn descriptors(&self) -> Vec<Arc<dyn PluginDescriptor>> {
        let descriptors = self.descriptors.read();
        self.order
            .read()
            .iter()
            .filter_map(|name_id| descriptors.get(name_id).cloned())
            .collect()
    }

    /// Produce a fresh instance of the given plugin type.
    pub fn instantiate(&self, name_id: &str) -> Result<PluginInstance> {
        let descriptor = self
            .get(name_id)
            .ok_or_else(|| RegistryError::NotFound(name_id.to_string()))?;

        Ok(descriptor.new_instance())
    }

    /// Number of registered plugin types.
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    /// Check if no plugin types are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::settings::Settings;
    use atlas_core::types::PluginMetadata;

    struct GraticuleDescriptor;

    impl PluginDescriptor for GraticuleDescriptor {
        fn name_id(&self) -> &str {
            "graticule"
        }

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata::new("graticule", "Graticule", "1.0.0", "Latitude/longitude grid")
        }

        fn default_settings(&self) -> Settings {
            let mut defaults = Settings::new();
            defaults.insert("spacing-degrees", 10);
            defaults
        }
    }

    struct ScaleBarDescriptor;

    impl PluginDescriptor for ScaleBarDescriptor {
        fn name_id(&self) -> &str {
            "scale-bar"
        }

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata::new("scale-bar", "Scale Bar", "1.0.0", "Map scale indicator")
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = DescriptorRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(GraticuleDescriptor)).unwrap();
        registry.register(Arc::new(ScaleBarDescriptor)).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("graticule"));
        assert!(!registry.contains("compass"));
        assert_eq!(registry.get("scale-bar").unwrap().name_id(), "scale-bar");
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = DescriptorRegistry::new();
        registry.register(Arc::new(GraticuleDescriptor)).unwrap();

        let result = registry.register(Arc::new(GraticuleDescriptor));
        assert!(result.is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_enumeration_preserves_registration_order() {
        let registry = DescriptorRegistry::new();
        registry.register(Arc::new(ScaleBarDescriptor)).unwrap();
        registry.register(Arc::new(GraticuleDescriptor)).unwrap();

        assert_eq!(registry.name_ids(), vec!["scale-bar", "graticule"]);

        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name_id(), "scale-bar");
        assert_eq!(descriptors[1].name_id(), "graticule");
    }

    #[test]
    fn test_unregister() {
        let registry = DescriptorRegistry::new();
        registry.register(Arc::new(GraticuleDescriptor)).unwrap();

        registry.unregister("graticule").unwrap();
        assert!(registry.is_empty());
        assert!(registry.name_ids().is_empty());

        assert!(registry.unregister("graticule").is_err());
    }

    #[test]
    fn test_instantiate() {
        let registry = DescriptorRegistry::new();
        registry.register(Arc::new(GraticuleDescriptor)).unwrap();

        let instance = registry.instantiate("graticule").unwrap();
        assert_eq!(instance.name_id(), "graticule");
        assert_eq!(instance.settings().get_integer("spacing-degrees"), Some(10));

        assert!(registry.instantiate("compass").is_err());
    }
}
