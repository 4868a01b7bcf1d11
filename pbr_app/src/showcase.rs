//! Demo switching
//!
//! Only one demo is live at a time. Switching destroys the previous demo's
//! panel and settings subscriptions first, then removes its objects from
//! the scene, so no control ever points at a detached object.

use crate::demos::{Demo, DemoStage};
use crate::error::AppError;
use viewer_engine::core::ViewerContext;
use viewer_engine::ui::ControlPanel;

#[derive(Debug, Default)]
pub struct Showcase {
    current: Option<Demo>,
    stage: DemoStage,
}

impl Showcase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Demo> {
        self.current
    }

    pub fn panel(&self) -> Option<&ControlPanel> {
        self.stage.panel.as_ref()
    }

    /// Tear down the current demo and build `demo`
    ///
    /// The caller may take the background root and camera override out of
    /// the returned stage; the panel and subscriptions stay here.
    pub fn show(&mut self, demo: Demo, context: &mut ViewerContext) -> Result<&mut DemoStage, AppError> {
        self.clean(context);
        log::info!("Showing demo '{}'", demo);
        self.stage = demo.build(context)?;
        self.current = Some(demo);
        Ok(&mut self.stage)
    }

    /// Remove everything the current demo created
    pub fn clean(&mut self, context: &mut ViewerContext) {
        if let Some(panel) = self.stage.panel.as_mut() {
            panel.destroy();
        }
        for subscription in self.stage.follow.drain(..) {
            context.settings.unsubscribe(&subscription);
        }
        self.stage = DemoStage::default();

        let removed = context.scene.clean();
        if let Some(demo) = self.current.take() {
            log::debug!("Cleaned demo '{}' ({} object(s) removed)", demo, removed);
        }
    }
}
