//! PBR material viewer
//!
//! Runs the material demos one after another on a headless surface. Each
//! demo is driven for a fixed number of frames while assets are pumped,
//! its controls are nudged and the surface is resized half-way through.
//!
//! Usage: `pbr_viewer [CONFIG|-] [DEMO|all]`

mod demos;
mod error;
mod settings_view;
mod showcase;

use demos::Demo;
use error::AppError;
use settings_view::SettingsView;
use showcase::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use viewer_engine::config::Config;
use viewer_engine::core::{ViewerConfig, ViewerContext};
use viewer_engine::foundation::logging;
use viewer_engine::properties::PropertyValue;
use viewer_engine::render::{
    DrawSurface, FixedTickScheduler, FrameLog, HeadlessBackend, HeadlessSurface, RenderLoopController,
    RenderPass, ResizeNotifier,
};
use viewer_engine::ui::ControlWidget;

const FRAMES_PER_DEMO: u32 = 90;
const NUDGED_COLOR: u32 = 0x336699;

struct ViewerApp {
    config: ViewerConfig,
    context: ViewerContext,
    surface: Rc<HeadlessSurface>,
    notifier: ResizeNotifier,
    frame_log: FrameLog,
    controller: Rc<RefCell<RenderLoopController>>,
    showcase: Showcase,
    settings_view: SettingsView,
    start_time: Instant,
}

impl ViewerApp {
    fn new(config: ViewerConfig) -> Self {
        log::info!("Creating viewer...");
        let context = ViewerContext::new(&config);
        let surface = Rc::new(HeadlessSurface::from_config(&config.surface));
        let frame_log = FrameLog::new();

        let controller = RenderLoopController::new(
            config.camera.clone(),
            context.scene.root().clone(),
            HeadlessBackend::with_log(frame_log.clone()),
            FixedTickScheduler::new(config.frame.target_fps),
        );
        let settings_view = SettingsView::new(&context.settings);
        log::info!(
            "Settings start at roughness {:.2}, metalness {:.2}",
            settings_view.roughness(),
            settings_view.metalness()
        );

        Self {
            config,
            context,
            surface,
            notifier: ResizeNotifier::new(),
            frame_log,
            controller: Rc::new(RefCell::new(controller)),
            showcase: Showcase::new(),
            settings_view,
            start_time: Instant::now(),
        }
    }

    fn run_demo(&mut self, demo: Demo, frames: u32) -> Result<(), AppError> {
        let stage = self.showcase.show(demo, &mut self.context)?;
        let camera = stage.camera.take().unwrap_or_else(|| self.config.camera.clone());
        let background = stage.background.take();

        {
            let mut controller = self.controller.borrow_mut();
            controller.unmount();
            controller.set_camera_config(camera);
            controller.set_background(background);
        }
        RenderLoopController::attach(&self.controller, self.surface.clone(), &self.notifier)?;

        for frame in 0..frames {
            self.context.pump_assets();

            if frame == frames / 2 {
                self.nudge_controls();
                if demo == Demo::NormalMapTexture {
                    self.settings_view.on_roughness_changed(0.6);
                    self.settings_view.on_metalness_changed(0.4);
                }
                self.toggle_surface_size();
            }

            if let Some(report) = self.controller.borrow_mut().step()? {
                log::trace!(
                    "Frame {}: {} draw(s), {} background draw(s), aspect {:.3}",
                    report.index,
                    report.draw_count,
                    report.background_draw_count,
                    report.aspect
                );
            }
        }

        let controller = self.controller.borrow();
        log::info!(
            "Demo '{}' drew {} frame(s) at {:.1} fps",
            demo,
            controller.timer().frame_count(),
            controller.timer().average_fps()
        );
        Ok(())
    }

    /// Move every control of the current panel the way a user would
    fn nudge_controls(&self) {
        let Some(panel) = self.showcase.panel() else {
            return;
        };
        for control in panel.controls() {
            let value = match control.widget() {
                ControlWidget::Slider { min, max } => PropertyValue::Scalar((min + max) / 2.0),
                ControlWidget::Color => PropertyValue::Color(NUDGED_COLOR),
            };
            match control.set_value(value) {
                Ok(applied) => log::info!("Control '{}' set to {:?}", control.label(), applied),
                Err(e) => log::warn!("Control '{}' rejected input: {}", control.label(), e),
            }
        }
    }

    /// Alternate between the configured size and half its width
    fn toggle_surface_size(&self) {
        let configured = &self.config.surface;
        let current = self.surface.size();
        let (width, height) = if current.width == configured.width {
            ((configured.width / 2).max(1), configured.height)
        } else {
            (configured.width, configured.height)
        };

        self.surface.resize(width, height);
        self.notifier.notify(self.surface.size());

        if let Some(camera) = self.controller.borrow().camera() {
            log::info!("Surface resized to {}x{}, aspect now {:.3}", width, height, camera.aspect);
        }
    }

    fn shutdown(&mut self) {
        log::info!("Shutting down viewer...");
        self.showcase.clean(&mut self.context);
        self.controller.borrow_mut().unmount();
        self.settings_view.destroy();

        log::info!(
            "Recorded {} pass(es) ({} background), {} resize(s) in {:.2}s",
            self.frame_log.len(),
            self.frame_log.passes(RenderPass::Background).len(),
            self.frame_log.resizes().len(),
            self.start_time.elapsed().as_secs_f32()
        );
    }
}

fn load_config(path: Option<&str>) -> Result<ViewerConfig, AppError> {
    let config = match path {
        Some(path) if path != "-" => ViewerConfig::load_from_file(path)?,
        _ => ViewerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn select_demos(name: Option<&str>) -> Result<Vec<Demo>, AppError> {
    match name {
        None | Some("all") => Ok(Demo::ALL.to_vec()),
        Some(name) => Ok(vec![name.parse()?]),
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 2 {
        return Err(AppError::Usage("pbr_viewer [CONFIG|-] [DEMO|all]".to_string()));
    }

    let config = load_config(args.first().map(String::as_str))?;
    logging::init(&config.logging);
    let demos = select_demos(args.get(1).map(String::as_str))?;

    log::info!("Starting PBR viewer with {} demo(s)", demos.len());
    let mut app = ViewerApp::new(config);
    for demo in demos {
        app.run_demo(demo, FRAMES_PER_DEMO)?;
    }
    app.shutdown();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        logging::init_with_level("error");
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> ViewerConfig {
        let mut config = ViewerConfig::default();
        config.frame.target_fps = 1000;
        config.surface.width = 800;
        config.surface.height = 600;
        config
    }

    #[test]
    fn test_select_demos() {
        assert_eq!(select_demos(None).expect("all").len(), Demo::ALL.len());
        assert_eq!(select_demos(Some("skybox")).expect("one"), vec![Demo::Skybox]);
        assert!(select_demos(Some("sponza")).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(matches!(
            load_config(Some("/nonexistent/viewer.toml")),
            Err(AppError::Config(_))
        ));
        assert!(load_config(Some("-")).is_ok());
    }

    #[test]
    fn test_demo_run_follows_resize() {
        let mut app = ViewerApp::new(quiet_config());
        app.run_demo(Demo::Colour, 4).expect("colour demo runs");

        let camera_aspect = app.controller.borrow().camera().map(|camera| camera.aspect);
        assert_eq!(camera_aspect, Some(400.0 / 600.0));
        assert!(app.frame_log.len() >= 4);

        app.shutdown();
        assert!(!app.controller.borrow().is_mounted());
        assert_eq!(app.notifier.listener_count(), 0);
        assert_eq!(app.context.scene.root().child_count(), 0);
    }

    #[test]
    fn test_skybox_draws_background_first() {
        let mut app = ViewerApp::new(quiet_config());
        app.run_demo(Demo::Skybox, 2).expect("skybox runs");

        let records = app.frame_log.records();
        assert_eq!(records.first().map(|record| record.pass), Some(RenderPass::Background));
        assert!(!app.frame_log.passes(RenderPass::Background).is_empty());
    }
}
