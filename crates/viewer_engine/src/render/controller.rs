//! Render loop controller
//!
//! Owns the camera and the binding to a draw surface between `mount` and
//! `unmount`, and draws the shared scene root once per scheduled frame.
//!
//! ```text
//!   Unmounted --mount--> Mounted --unmount--> Unmounted
//!                          |  ^
//!               frame tick |  | request next frame
//!                          v  |
//!                         draw
//! ```
//!
//! The camera aspect always matches the surface size that was last
//! reconciled. Reconciliation happens on every resize event and, when the
//! host resized the surface without telling anyone, at the start of the next
//! frame.

use crate::core::CameraConfig;
use crate::foundation::time::Timer;
use crate::scene::NodeRef;
use super::backend::RenderBackend;
use super::camera::Camera;
use super::frame::{RenderFrame, RenderPass};
use super::scheduler::{FrameRequest, FrameScheduler};
use super::surface::{DrawSurface, ResizeNotifier, ResizeSubscription, SurfaceSize};
use super::RenderError;
use std::cell::RefCell;
use std::rc::Rc;

/// What one drawn frame looked like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at zero for the first frame ever drawn
    pub index: u64,
    /// Aspect ratio the frame was projected with
    pub aspect: f32,
    /// Surface size the frame was drawn at
    pub size: SurfaceSize,
    /// Meshes drawn in the main pass
    pub draw_count: usize,
    /// Meshes drawn in the background pass
    pub background_draw_count: usize,
}

struct Mounted {
    surface: Rc<dyn DrawSurface>,
    camera: Camera,
    reconciled: SurfaceSize,
    pending: Option<FrameRequest>,
    resize_listener: Option<ResizeSubscription>,
}

/// Continuous render loop bound to one surface at a time
pub struct RenderLoopController {
    camera_config: CameraConfig,
    root: NodeRef,
    background: Option<NodeRef>,
    backend: Box<dyn RenderBackend>,
    scheduler: Box<dyn FrameScheduler>,
    mounted: Option<Mounted>,
    timer: Timer,
    frames_drawn: u64,
}

impl RenderLoopController {
    /// Create an unmounted controller drawing `root`
    pub fn new(
        camera_config: CameraConfig,
        root: NodeRef,
        backend: impl RenderBackend + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Self {
        Self {
            camera_config,
            root,
            background: None,
            backend: Box::new(backend),
            scheduler: Box::new(scheduler),
            mounted: None,
            timer: Timer::new(),
            frames_drawn: 0,
        }
    }

    /// Draw `background` before the main root on every frame
    pub fn with_background(mut self, background: NodeRef) -> Self {
        self.background = Some(background);
        self
    }

    /// Replace or remove the background root
    pub fn set_background(&mut self, background: Option<NodeRef>) {
        self.background = background;
    }

    /// Camera settings used by the next `mount`
    pub fn set_camera_config(&mut self, camera_config: CameraConfig) {
        self.camera_config = camera_config;
    }

    /// Whether a surface is bound
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Camera of the mounted surface
    pub fn camera(&self) -> Option<&Camera> {
        self.mounted.as_ref().map(|m| &m.camera)
    }

    /// Mutable camera of the mounted surface, for orbit-style controls
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.mounted.as_mut().map(|m| &mut m.camera)
    }

    /// Whether a frame callback is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Frames drawn since creation
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Frame timing statistics
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Bind to `surface`, build the camera and request the first frame
    pub fn mount(&mut self, surface: Rc<dyn DrawSurface>) -> Result<(), RenderError> {
        if self.mounted.is_some() {
            return Err(RenderError::AlreadyMounted);
        }

        let size = surface.size();
        let camera = Camera::from_config(&self.camera_config, size);
        self.backend.resize(size)?;
        let pending = self.scheduler.request_frame();
        self.timer.reset();

        log::info!(
            "Render loop mounted on {}x{} surface (aspect {:.3})",
            size.width,
            size.height,
            camera.aspect
        );

        self.mounted = Some(Mounted {
            surface,
            camera,
            reconciled: size,
            pending: Some(pending),
            resize_listener: None,
        });
        Ok(())
    }

    /// Mount a shared controller and follow `notifier`'s resize events
    ///
    /// The listener only holds a weak reference to the controller and is
    /// released by `unmount` or when the controller is dropped.
    pub fn attach(
        controller: &Rc<RefCell<Self>>,
        surface: Rc<dyn DrawSurface>,
        notifier: &ResizeNotifier,
    ) -> Result<(), RenderError> {
        controller.borrow_mut().mount(surface)?;

        let weak = Rc::downgrade(controller);
        let listener = notifier.subscribe(move |size: &SurfaceSize| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = shared.try_borrow_mut() else {
                log::warn!(
                    "Resize to {}x{} arrived while the render loop was busy; no synchronous redraw for this \
                     event, the next frame reconciles the size",
                    size.width,
                    size.height
                );
                return;
            };
            match controller.on_resize() {
                Ok(report) => log::trace!("Redrew frame {} after resize", report.index),
                Err(RenderError::NotMounted) => log::debug!("Ignoring resize of an unmounted render loop"),
                Err(e) => log::error!("Redraw after resize failed: {}", e),
            }
        });

        if let Some(mounted) = controller.borrow_mut().mounted.as_mut() {
            mounted.resize_listener = Some(listener);
        }
        Ok(())
    }

    /// Reconcile camera and backend with the surface, then draw immediately
    pub fn on_resize(&mut self) -> Result<FrameReport, RenderError> {
        let mounted = self.mounted.as_mut().ok_or(RenderError::NotMounted)?;
        let size = mounted.surface.size();
        Self::reconcile(mounted, self.backend.as_mut(), size)?;
        self.draw()
    }

    /// Run the pending frame callback, if the scheduler delivers one
    ///
    /// Returns `Ok(None)` while unmounted or when no frame is due.
    pub fn step(&mut self) -> Result<Option<FrameReport>, RenderError> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(None);
        };
        let Some(tick) = self.scheduler.next_frame() else {
            return Ok(None);
        };
        log::trace!("Frame tick {:?} at {:?}", tick.request, tick.elapsed);

        // Keep the loop alive even if this frame fails to draw
        mounted.pending = Some(self.scheduler.request_frame());

        let size = mounted.surface.size();
        if size != mounted.reconciled {
            log::debug!(
                "Surface changed to {}x{} without a resize event",
                size.width,
                size.height
            );
            Self::reconcile(mounted, self.backend.as_mut(), size)?;
        }

        self.draw().map(Some)
    }

    /// Cancel the pending frame, release the resize listener and drop the
    /// surface binding. A no-op when not mounted.
    pub fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        if let Some(request) = mounted.pending {
            self.scheduler.cancel(request);
        }
        drop(mounted);
        log::info!("Render loop unmounted after {} frame(s)", self.frames_drawn);
    }

    fn reconcile(mounted: &mut Mounted, backend: &mut dyn RenderBackend, size: SurfaceSize) -> Result<(), RenderError> {
        mounted.camera.set_aspect_ratio(size.aspect_ratio());
        backend.resize(size)?;
        mounted.reconciled = size;
        Ok(())
    }

    fn draw(&mut self) -> Result<FrameReport, RenderError> {
        let mounted = self.mounted.as_ref().ok_or(RenderError::NotMounted)?;
        let index = self.frames_drawn;
        let size = mounted.reconciled;

        let mut background_draw_count = 0;
        if let Some(background) = &self.background {
            let camera = mounted.camera.orientation_only();
            let frame = RenderFrame::collect(RenderPass::Background, index, &camera, size, background);
            self.backend.render(&frame)?;
            background_draw_count = frame.draw_count();
        }

        let frame = RenderFrame::collect(RenderPass::Main, index, &mounted.camera, size, &self.root);
        self.backend.render(&frame)?;

        self.frames_drawn += 1;
        self.timer.update();

        Ok(FrameReport {
            index,
            aspect: mounted.camera.aspect,
            size,
            draw_count: frame.draw_count(),
            background_draw_count,
        })
    }
}

impl Drop for RenderLoopController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameLog, Geometry, HeadlessBackend, HeadlessSurface, ManualScheduler, Material};
    use crate::scene::SceneRegistry;
    use approx::assert_relative_eq;

    fn controller_for(root: NodeRef) -> (RenderLoopController, FrameLog) {
        let log = FrameLog::new();
        let controller = RenderLoopController::new(
            CameraConfig::default(),
            root,
            HeadlessBackend::with_log(log.clone()),
            ManualScheduler::new(),
        );
        (controller, log)
    }

    fn ball() -> NodeRef {
        NodeRef::mesh("ball", Rc::new(Geometry::sphere(100.0, 32, 16)), Material::basic().into_ref())
    }

    #[test]
    fn test_mount_uses_surface_aspect() {
        let (mut controller, log) = controller_for(NodeRef::group("root"));
        controller
            .mount(Rc::new(HeadlessSurface::new(800, 600)))
            .expect("first mount");
        assert!(controller.has_pending_frame());

        let report = controller.step().expect("draw").expect("frame was due");
        assert_relative_eq!(report.aspect, 800.0 / 600.0);
        assert_eq!(report.index, 0);
        assert_eq!(log.resizes(), vec![SurfaceSize::new(800, 600)]);
        assert!(controller.has_pending_frame());
    }

    #[test]
    fn test_zero_height_surface_keeps_rendering() {
        let (mut controller, log) = controller_for(NodeRef::group("root"));
        controller
            .mount(Rc::new(HeadlessSurface::new(800, 0)))
            .expect("mount degenerate surface");

        for _ in 0..3 {
            let report = controller.step().expect("draw").expect("frame was due");
            assert_eq!(report.aspect, 0.0);
        }
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_resize_applies_to_next_frame() {
        let surface = Rc::new(HeadlessSurface::new(800, 600));
        let notifier = ResizeNotifier::new();
        let (controller, log) = controller_for(NodeRef::group("root"));
        let controller = Rc::new(RefCell::new(controller));
        RenderLoopController::attach(&controller, surface.clone(), &notifier).expect("attach");

        surface.resize(1024, 512);
        notifier.notify(surface.size());

        // The resize handler draws synchronously
        let redraw = log.last().expect("resize redraw");
        assert_relative_eq!(redraw.aspect, 2.0);
        assert_eq!(redraw.size, SurfaceSize::new(1024, 512));

        let report = controller.borrow_mut().step().expect("draw").expect("frame was due");
        assert_relative_eq!(report.aspect, 2.0);
    }

    #[test]
    fn test_resize_while_busy_is_reconciled_on_next_frame() {
        let surface = Rc::new(HeadlessSurface::new(800, 600));
        let notifier = ResizeNotifier::new();
        let (controller, log) = controller_for(NodeRef::group("root"));
        let controller = Rc::new(RefCell::new(controller));
        RenderLoopController::attach(&controller, surface.clone(), &notifier).expect("attach");

        {
            let _busy = controller.borrow_mut();
            surface.resize(600, 600);
            notifier.notify(surface.size());
        }
        assert!(log.is_empty());
        assert_eq!(notifier.listener_count(), 1);

        let report = controller.borrow_mut().step().expect("draw").expect("frame was due");
        assert_relative_eq!(report.aspect, 1.0);
        assert_eq!(log.resizes().last(), Some(&SurfaceSize::new(600, 600)));
    }

    #[test]
    fn test_silent_surface_change_is_reconciled_before_drawing() {
        let surface = Rc::new(HeadlessSurface::new(800, 600));
        let (mut controller, log) = controller_for(NodeRef::group("root"));
        controller.mount(surface.clone()).expect("mount");

        surface.resize(300, 300);
        let report = controller.step().expect("draw").expect("frame was due");

        assert_relative_eq!(report.aspect, 1.0);
        assert_eq!(log.resizes().last(), Some(&SurfaceSize::new(300, 300)));
    }

    #[test]
    fn test_no_frames_after_unmount() {
        let (mut controller, log) = controller_for(NodeRef::group("root"));
        controller
            .mount(Rc::new(HeadlessSurface::new(640, 480)))
            .expect("mount");
        controller.step().expect("draw");

        controller.unmount();
        assert!(!controller.is_mounted());
        assert!(!controller.has_pending_frame());
        assert_eq!(controller.step().expect("unmounted step"), None);
        assert_eq!(log.len(), 1);

        controller.unmount();
        assert_eq!(controller.on_resize(), Err(RenderError::NotMounted));
    }

    #[test]
    fn test_unmount_releases_resize_listener() {
        let surface = Rc::new(HeadlessSurface::new(640, 480));
        let notifier = ResizeNotifier::new();
        let (controller, log) = controller_for(NodeRef::group("root"));
        let controller = Rc::new(RefCell::new(controller));
        RenderLoopController::attach(&controller, surface.clone(), &notifier).expect("attach");
        assert_eq!(notifier.listener_count(), 1);

        controller.borrow_mut().unmount();
        assert_eq!(notifier.listener_count(), 0);

        notifier.notify(SurfaceSize::new(10, 10));
        assert!(log.is_empty());
    }

    #[test]
    fn test_dropping_controller_releases_resize_listener() {
        let notifier = ResizeNotifier::new();
        let (controller, _log) = controller_for(NodeRef::group("root"));
        let controller = Rc::new(RefCell::new(controller));
        RenderLoopController::attach(&controller, Rc::new(HeadlessSurface::new(1, 1)), &notifier)
            .expect("attach");

        drop(controller);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_mounting_twice_is_rejected() {
        let (mut controller, _log) = controller_for(NodeRef::group("root"));
        let surface = Rc::new(HeadlessSurface::new(10, 10));
        controller.mount(surface.clone()).expect("first mount");
        assert_eq!(controller.mount(surface), Err(RenderError::AlreadyMounted));
    }

    #[test]
    fn test_registry_changes_show_on_next_frame() {
        let mut registry = SceneRegistry::new();
        let (mut controller, _log) = controller_for(registry.root().clone());
        controller.mount(Rc::new(HeadlessSurface::new(10, 10))).expect("mount");

        assert_eq!(controller.step().expect("draw").map(|r| r.draw_count), Some(0));
        registry.add(ball());
        registry.add(ball());
        assert_eq!(controller.step().expect("draw").map(|r| r.draw_count), Some(2));
        registry.clean();
        assert_eq!(controller.step().expect("draw").map(|r| r.draw_count), Some(0));
    }

    #[test]
    fn test_background_pass_precedes_main_pass() {
        let background = NodeRef::group("sky");
        background.add_child(ball());
        let (controller, log) = controller_for(NodeRef::group("root"));
        let mut controller = controller.with_background(background);
        controller.mount(Rc::new(HeadlessSurface::new(10, 10))).expect("mount");

        let report = controller.step().expect("draw").expect("frame was due");
        assert_eq!(report.background_draw_count, 1);
        let passes: Vec<RenderPass> = log.records().iter().map(|r| r.pass).collect();
        assert_eq!(passes, vec![RenderPass::Background, RenderPass::Main]);
    }
}
