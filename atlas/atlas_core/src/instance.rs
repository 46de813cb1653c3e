//! The live plugin instance state machine.
//!
//! A [`PluginInstance`] is produced by a descriptor and owned exclusively
//! by its creator (in practice the host's plugin manager). It carries the
//! two session flags, the one-way initialization state, and the open
//! settings map, and it keeps the mirroring invariant between flags and
//! map across every public mutation:
//!
//! - `settings["enabled"]` equals `enabled()` and `settings["visible"]`
//!   equals `visible()` at all times.
//! - `initialize` runs one-time setup at most once; failure is silent and
//!   observable only through `is_initialized()`.
//! - `restore_default_settings` resets configuration keys but never the
//!   two flags: they are session state, and a settings-reset action must
//!   not hide or disable a plugin the user currently has shown.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, warn};

use crate::error::PluginError;
use crate::id::{PluginId, SubscriptionId};
use crate::settings::{Settings, SETTING_ENABLED, SETTING_VISIBLE};
use crate::types::{PluginEvent, PluginMetadata};

/// One-time setup hook run by [`PluginInstance::initialize`].
///
/// `FnMut` rather than `FnOnce`: a failed setup may be retried by a later
/// `initialize` call.
pub type InitHook = Box<dyn FnMut() -> Result<(), PluginError> + Send + Sync>;

/// Callback registered through [`PluginInstance::subscribe`].
pub type EventCallback = Box<dyn Fn(&PluginEvent) + Send + Sync>;

/// A live, configurable plugin.
pub struct PluginInstance {
    /// Unique instance ID.
    id: PluginId,

    /// Identity of the plugin type this instance was created from.
    metadata: PluginMetadata,

    /// Whether the plugin participates in render/update cycles.
    enabled: bool,

    /// Whether the plugin's output is drawn, independent of `enabled`.
    visible: bool,

    /// One-way flag, false until setup completes.
    initialized: bool,

    /// Current configuration, always containing the two mirrored keys.
    settings: Settings,

    /// Factory defaults from the descriptor, without the mirrored keys.
    defaults: Settings,

    /// Optional one-time setup hook.
    initializer: Option<InitHook>,

    /// Registered change callbacks.
    subscribers: Vec<(SubscriptionId, EventCallback)>,

    /// When the instance was created.
    created_at: DateTime<Utc>,

    /// When the instance last changed.
    updated_at: DateTime<Utc>,
}

impl PluginInstance {
    /// Create a new instance.
    ///
    /// `defaults` are the descriptor's factory defaults and should not
    /// contain the mirrored keys; if they do, the flag arguments win and
    /// the mirror is seeded from them.
    pub fn new(
        metadata: PluginMetadata,
        defaults: Settings,
        enabled: bool,
        visible: bool,
    ) -> Self {
        let mut settings = defaults.clone();
        settings.insert(SETTING_ENABLED, enabled);
        settings.insert(SETTING_VISIBLE, visible);

        let now = Utc::now();

        Self {
            id: PluginId::new(),
            metadata,
            enabled,
            visible,
            initialized: false,
            settings,
            defaults,
            initializer: None,
            subscribers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a one-time setup hook, consumed by [`initialize`].
    ///
    /// [`initialize`]: PluginInstance::initialize
    pub fn with_initializer(
        mut self,
        hook: impl FnMut() -> Result<(), PluginError> + Send + Sync + 'static,
    ) -> Self {
        self.initializer = Some(Box::new(hook));
        self
    }

    /// Get the instance ID.
    pub fn id(&self) -> PluginId {
        self.id
    }

    /// Get the plugin type metadata.
    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    /// Get the unique key of the plugin type.
    pub fn name_id(&self) -> &str {
        &self.metadata.name_id
    }

    /// Whether the plugin participates in render/update cycles.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the plugin's output is drawn.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether one-time setup has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get the current settings. Always contains the mirrored keys, equal
    /// to the live flags.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the descriptor-provided factory defaults.
    pub fn default_settings(&self) -> &Settings {
        &self.defaults
    }

    /// When the instance was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the instance last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Set the `enabled` flag and its mirrored settings key.
    ///
    /// A same-value call is a no-op: no event, no timestamp refresh.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        self.enabled = enabled;
        self.settings.insert(SETTING_ENABLED, enabled);
        self.touch();
        self.emit(&PluginEvent::EnabledChanged(enabled));
    }

    /// Set the `visible` flag and its mirrored settings key.
    ///
    /// A same-value call is a no-op: no event, no timestamp refresh.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }

        self.visible = visible;
        self.settings.insert(SETTING_VISIBLE, visible);
        self.touch();
        self.emit(&PluginEvent::VisibleChanged(visible));
    }

    /// Replace the stored configuration.
    ///
    /// The two flags are derived from the incoming map: a boolean under a
    /// mirrored key drives the flag, an absent key (or a non-boolean
    /// value) leaves the flag untouched. Both keys are then rewritten from
    /// the live flags, so the mirror holds whatever was passed in. All
    /// other keys are stored verbatim.
    pub fn set_settings(&mut self, settings: Settings) {
        let enabled = settings.get_bool(SETTING_ENABLED).unwrap_or(self.enabled);
        let visible = settings.get_bool(SETTING_VISIBLE).unwrap_or(self.visible);
        let enabled_changed = enabled != self.enabled;
        let visible_changed = visible != self.visible;

        self.settings = settings;
        self.enabled = enabled;
        self.visible = visible;
        self.settings.insert(SETTING_ENABLED, enabled);
        self.settings.insert(SETTING_VISIBLE, visible);
        self.touch();

        if enabled_changed {
            self.emit(&PluginEvent::EnabledChanged(enabled));
        }
        if visible_changed {
            self.emit(&PluginEvent::VisibleChanged(visible));
        }
        self.emit(&PluginEvent::SettingsChanged);
    }

    /// Restore every configuration key to the descriptor's factory
    /// defaults, except `enabled` and `visible`, which keep their
    /// pre-call values.
    pub fn restore_default_settings(&mut self) {
        let mut settings = self.defaults.clone();
        settings.insert(SETTING_ENABLED, self.enabled);
        settings.insert(SETTING_VISIBLE, self.visible);

        self.settings = settings;
        self.touch();
        self.emit(&PluginEvent::SettingsChanged);
    }

    /// Run one-time setup.
    ///
    /// A call after successful setup is a no-op with no observable effect.
    /// A hook failure is logged and swallowed; the instance stays
    /// uninitialized and a later call may retry.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        if let Some(hook) = self.initializer.as_mut() {
            if let Err(e) = hook() {
                warn!(plugin = %self.metadata.name_id, "initialization failed: {}", e);
                return;
            }
        }

        self.initialized = true;
        self.touch();
        debug!(plugin = %self.metadata.name_id, "initialized");
        self.emit(&PluginEvent::Initialized);
    }

    /// Register a change callback. Dispatch is synchronous, inside the
    /// mutating call, after the mutation is observable.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&PluginEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback. Returns `false` if the
    /// handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn emit(&self, event: &PluginEvent) {
        for (_, callback) in &self.subscribers {
            callback(event);
        }
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInstance")
            .field("id", &self.id)
            .field("name_id", &self.metadata.name_id)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("initialized", &self.initialized)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
