//! Settings form bound to the broadcast bus

use std::cell::Cell;
use std::rc::Rc;
use viewer_engine::events::Subscription;
use viewer_engine::settings::{Setting, SettingsBus};

/// Mirrors the bus's current values and forwards user edits to it
///
/// A view created after the bus has already changed still starts from the
/// latest values, because subscribing replays them.
pub struct SettingsView {
    bus: SettingsBus,
    roughness: Rc<Cell<f32>>,
    metalness: Rc<Cell<f32>>,
    subscriptions: Vec<Subscription>,
}

impl SettingsView {
    pub fn new(bus: &SettingsBus) -> Self {
        let roughness = Rc::new(Cell::new(0.0));
        let metalness = Rc::new(Cell::new(0.0));

        let subscriptions = vec![
            Self::mirror(bus, Setting::Roughness, &roughness),
            Self::mirror(bus, Setting::Metalness, &metalness),
        ];

        Self {
            bus: bus.clone(),
            roughness,
            metalness,
            subscriptions,
        }
    }

    fn mirror(bus: &SettingsBus, setting: Setting, field: &Rc<Cell<f32>>) -> Subscription {
        let field = Rc::clone(field);
        bus.subscribe(setting, move |value| field.set(*value))
    }

    pub fn roughness(&self) -> f32 {
        self.roughness.get()
    }

    pub fn metalness(&self) -> f32 {
        self.metalness.get()
    }

    pub fn on_roughness_changed(&self, value: f32) {
        self.bus.change_roughness(value);
    }

    pub fn on_metalness_changed(&self, value: f32) {
        self.bus.change_metalness(value);
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Stop mirroring the bus; later edits elsewhere leave this view untouched
    pub fn destroy(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.bus.unsubscribe(&subscription);
        }
    }
}

impl Drop for SettingsView {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_engine::core::SettingsConfig;

    #[test]
    fn test_late_view_sees_latest_values() {
        let bus = SettingsBus::new(&SettingsConfig::default());
        bus.change_roughness(0.8);

        let view = SettingsView::new(&bus);
        assert_eq!(view.roughness(), 0.8);
        assert_eq!(view.metalness(), 0.1);
    }

    #[test]
    fn test_edits_reach_other_subscribers() {
        let bus = SettingsBus::new(&SettingsConfig::default());
        let view = SettingsView::new(&bus);
        let other = SettingsView::new(&bus);

        view.on_metalness_changed(0.9);
        assert_eq!(other.metalness(), 0.9);
        assert_eq!(bus.current(Setting::Metalness), 0.9);
    }

    #[test]
    fn test_destroyed_view_stops_mirroring() {
        let bus = SettingsBus::new(&SettingsConfig::default());
        let mut view = SettingsView::new(&bus);
        view.destroy();
        assert!(!view.is_active());

        bus.change_roughness(0.5);
        assert_eq!(view.roughness(), 0.1);
    }
}
