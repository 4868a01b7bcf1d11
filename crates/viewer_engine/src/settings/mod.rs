//! Viewer-wide tunable settings
//!
//! Each setting is a replaying [`Channel`]: publishing stores the value and
//! notifies subscribers in order, and a new subscriber receives the current
//! value before `subscribe` returns. The bus knows nothing about rendering;
//! [`bind_material`] is the bridge that lets a material follow it.

use crate::core::SettingsConfig;
use crate::events::{Channel, Subscription};
use crate::render::MaterialRef;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// Settings errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// No setting has this name
    #[error("unknown setting '{0}', expected one of: roughness, metalness")]
    UnknownSetting(String),
}

/// The settings carried by the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Surface roughness, 0 (mirror) to 1 (matte)
    Roughness,
    /// Surface metalness, 0 (dielectric) to 1 (metal)
    Metalness,
}

impl Setting {
    /// Every setting, in display order
    pub const ALL: [Setting; 2] = [Setting::Roughness, Setting::Metalness];

    /// Name used for lookup and display
    pub fn name(self) -> &'static str {
        match self {
            Self::Roughness => "roughness",
            Self::Metalness => "metalness",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = SettingsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))
    }
}

/// Broadcast bus for [`Setting`] values
#[derive(Debug, Clone)]
pub struct SettingsBus {
    roughness: Channel<f32>,
    metalness: Channel<f32>,
}

impl SettingsBus {
    /// Create a bus seeded with the configured initial values
    pub fn new(config: &SettingsConfig) -> Self {
        Self {
            roughness: Channel::new(Setting::Roughness.name(), config.roughness),
            metalness: Channel::new(Setting::Metalness.name(), config.metalness),
        }
    }

    /// Channel carrying `setting`
    pub fn channel(&self, setting: Setting) -> &Channel<f32> {
        match setting {
            Setting::Roughness => &self.roughness,
            Setting::Metalness => &self.metalness,
        }
    }

    /// Current value of `setting`
    pub fn current(&self, setting: Setting) -> f32 {
        self.channel(setting).current()
    }

    /// Store `value` and notify every subscriber of `setting` in order
    pub fn change(&self, setting: Setting, value: f32) {
        log::debug!("Setting {} changed to {}", setting, value);
        self.channel(setting).publish(value);
    }

    /// Change a setting addressed by name
    pub fn change_named(&self, name: &str, value: f32) -> Result<(), SettingsError> {
        self.change(name.parse()?, value);
        Ok(())
    }

    /// Change the roughness
    pub fn change_roughness(&self, value: f32) {
        self.change(Setting::Roughness, value);
    }

    /// Change the metalness
    pub fn change_metalness(&self, value: f32) {
        self.change(Setting::Metalness, value);
    }

    /// Attach `callback` to `setting`
    ///
    /// The current value is delivered to `callback` before this returns.
    pub fn subscribe(&self, setting: Setting, callback: impl FnMut(&f32) + 'static) -> Subscription {
        self.channel(setting).subscribe(callback)
    }

    /// Attach `callback` to a setting addressed by name
    pub fn subscribe_named(
        &self,
        name: &str,
        callback: impl FnMut(&f32) + 'static,
    ) -> Result<Subscription, SettingsError> {
        Ok(self.subscribe(name.parse()?, callback))
    }

    /// Detach a subscriber; idempotent
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        subscription.unsubscribe()
    }
}

impl Default for SettingsBus {
    fn default() -> Self {
        Self::new(&SettingsConfig::default())
    }
}

/// Make `material` follow the bus's roughness and metalness
///
/// The subscriptions hold the material weakly; once it is dropped they do
/// nothing. Unsubscribe the returned handles to stop following.
pub fn bind_material(bus: &SettingsBus, material: &MaterialRef) -> Vec<Subscription> {
    let roughness_target = Rc::downgrade(material);
    let metalness_target = Rc::downgrade(material);
    vec![
        bus.subscribe(Setting::Roughness, move |value| {
            if let Some(material) = roughness_target.upgrade() {
                material.borrow_mut().roughness = *value;
            }
        }),
        bus.subscribe(Setting::Metalness, move |value| {
            if let Some(material) = metalness_target.upgrade() {
                material.borrow_mut().metalness = *value;
            }
        }),
    ]
}
