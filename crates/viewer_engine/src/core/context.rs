//! Session-wide state shared by every demo

use super::config::ViewerConfig;
use crate::assets::AssetQueue;
use crate::scene::SceneRegistry;
use crate::settings::SettingsBus;

/// The scene registry, settings bus and asset queue of one viewer session
///
/// Created once at start-up and passed by reference to whatever needs it.
#[derive(Debug)]
pub struct ViewerContext {
    /// Objects owned by the active demo, under the shared root
    pub scene: SceneRegistry,
    /// Roughness/metalness broadcast channels
    pub settings: SettingsBus,
    /// Pending texture and model loads
    pub assets: AssetQueue,
}

impl ViewerContext {
    /// Build the context described by `config`
    pub fn new(config: &ViewerConfig) -> Self {
        log::debug!("Creating viewer context (assets from '{}')", config.assets.assets_dir);
        Self {
            scene: SceneRegistry::new(),
            settings: SettingsBus::new(&config.settings),
            assets: AssetQueue::new(&config.assets),
        }
    }

    /// Run queued asset jobs against the scene
    pub fn pump_assets(&mut self) -> usize {
        self.assets.poll(&mut self.scene)
    }
}

impl Default for ViewerContext {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeRef;
    use crate::settings::Setting;

    #[test]
    fn test_context_uses_configured_settings() {
        let mut config = ViewerConfig::default();
        config.settings.roughness = 0.6;
        let context = ViewerContext::new(&config);
        assert_eq!(context.settings.current(Setting::Roughness), 0.6);
        assert_eq!(context.scene.managed_count(), 0);
    }

    #[test]
    fn test_pump_assets_reaches_scene() {
        let mut context = ViewerContext::default();
        context.assets.enqueue("node", |scene: &mut SceneRegistry| scene.add(NodeRef::group("late")));
        assert_eq!(context.pump_assets(), 1);
        assert_eq!(context.scene.root().child_count(), 1);
    }
}
