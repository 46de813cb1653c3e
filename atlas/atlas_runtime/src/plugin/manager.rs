//! Plugin Manager for the Atlas Runtime
//!
//! Owns the live plugin instances on behalf of the host. The render/update
//! loop asks the manager which plugins are active each cycle; the settings
//! dialog drives flags, configuration replacement, and default restoration
//! through it.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{debug, info};

use atlas_core::id::PluginId;
use atlas_core::instance::PluginInstance;
use atlas_core::settings::Settings;
use atlas_core::types::PluginMetadata;

use super::registry::DescriptorRegistry;

/// Errors that can occur in plugin manager operations
#[derive(thiserror::Error, Debug)]
pub enum ManagerError {
    #[error("Plugin instance {0} not found")]
    NotFound(PluginId),
}

/// The plugin manager owns live instances and mediates host access.
pub struct PluginManager {
    /// Registry of available plugin types
    registry: Arc<DescriptorRegistry>,

    /// Map of instance IDs to live instances
    instances: RwLock<HashMap<PluginId, PluginInstance>>,
}

impl PluginManager {
    /// Create a new plugin manager over a registry.
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            registry,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Get the registry this manager draws plugin types from.
    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    /// Instantiate a plugin type from the registry and take ownership of
    /// the instance.
    pub fn spawn(&self, name_id: &str) -> Result<PluginId> {
        let instance = self.registry.instantiate(name_id)?;
        let id = instance.id();

        self.instances.write().insert(id, instance);

        info!(plugin = %name_id, instance = %id, "spawned plugin instance");

        Ok(id)
    }

    /// Instantiate every registered plugin type once, in registration
    /// order.
    pub fn spawn_all(&self) -> Result<Vec<PluginId>> {
        let mut ids = Vec::new();
        for name_id in self.registry.name_ids() {
            ids.push(self.spawn(&name_id)?);
        }
        Ok(ids)
    }

    /// Run one-time setup for an instance. Failure is silent per the
    /// instance contract; observe it through `is_initialized`.
    pub fn initialize(&self, id: &PluginId) -> Result<()> {
        self.with_instance_mut(id, |instance| instance.initialize())
    }

    /// Run one-time setup for every owned instance.
    pub fn initialize_all(&self) {
        let mut instances = self.instances.write();
        for instance in instances.values_mut() {
            instance.initialize();
        }
        debug!(count = instances.len(), "initialized plugin instances");
    }

    /// Set the `enabled` flag of an instance.
    pub fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<()> {
        self.with_instance_mut(id, |instance| instance.set_enabled(enabled))
    }

    /// Set the `visible` flag of an instance.
    pub fn set_visible(&self, id: &PluginId, visible: bool) -> Result<()> {
        self.with_instance_mut(id, |instance| instance.set_visible(visible))
    }

    /// Replace an instance's configuration.
    pub fn apply_settings(&self, id: &PluginId, settings: Settings) -> Result<()> {
        self.with_instance_mut(id, |instance| instance.set_settings(settings))
    }

    /// Restore an instance's configuration to factory defaults, leaving
    /// the `enabled`/`visible` flags untouched.
    pub fn restore_default_settings(&self, id: &PluginId) -> Result<()> {
        self.with_instance_mut(id, |instance| instance.restore_default_settings())
    }

    /// Whether an instance participates in render/update cycles.
    pub fn is_enabled(&self, id: &PluginId) -> Result<bool> {
        self.with_instance(id, |instance| instance.enabled())
    }

    /// Whether an instance's output is drawn.
    pub fn is_visible(&self, id: &PluginId) -> Result<bool> {
        self.with_instance(id, |instance| instance.visible())
    }

    /// Whether an instance has completed one-time setup.
    pub fn is_initialized(&self, id: &PluginId) -> Result<bool> {
        self.with_instance(id, |instance| instance.is_initialized())
    }

    /// A copy of an instance's current settings.
    pub fn settings(&self, id: &PluginId) -> Result<Settings> {
        self.with_instance(id, |instance| instance.settings().clone())
    }

    /// A copy of an instance's plugin type metadata.
    pub fn metadata(&self, id: &PluginId) -> Result<PluginMetadata> {
        self.with_instance(id, |instance| instance.metadata().clone())
    }

    /// IDs of all owned instances.
    pub fn plugin_ids(&self) -> Vec<PluginId> {
        self.instances.read().keys().copied().collect()
    }

    /// IDs of the instances that are both enabled and visible. This is
    /// the set the render/update loop walks each cycle.
    pub fn active(&self) -> Vec<PluginId> {
        self.instances
            .read()
            .iter()
            .filter(|(_, instance)| instance.enabled() && instance.visible())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of owned instances.
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    /// Check if the manager owns no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Drop an instance.
    pub fn remove(&self, id: &PluginId) -> Result<()> {
        let removed = self.instances.write().remove(id);
        if removed.is_none() {
            return Err(ManagerError::NotFound(*id).into());
        }

        info!(instance = %id, "removed plugin instance");

        Ok(())
    }

    fn with_instance<T>(
        &self,
        id: &PluginId,
        f: impl FnOnce(&PluginInstance) -> T,
    ) -> Result<T> {
        let instances = self.instances.read();
        let instance = instances.get(id).ok_or(ManagerError::NotFound(*id))?;
        Ok(f(instance))
    }

    fn with_instance_mut<T>(
        &self,
        id: &PluginId,
        f: impl FnOnce(&mut PluginInstance) -> T,
    ) -> Result<T> {
        let mut instances = self.instances.write();
        let instance = instances.get_mut(id).ok_or(ManagerError::NotFound(*id))?;
        Ok(f(instance))
    }
}
