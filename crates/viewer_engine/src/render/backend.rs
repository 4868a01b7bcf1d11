//! Backend abstraction for turning frames into pixels
//!
//! The viewer core only needs two calls from a backend: follow the surface
//! size and draw a [`RenderFrame`]. [`HeadlessBackend`] implements both by
//! recording what it was asked to do, which is what tests and the headless
//! demo driver inspect.

use super::frame::{RenderFrame, RenderPass};
use super::surface::SurfaceSize;
use super::RenderError;
use std::cell::RefCell;
use std::rc::Rc;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Main rendering backend trait
pub trait RenderBackend {
    /// Match the backbuffer to the surface size
    fn resize(&mut self, size: SurfaceSize) -> BackendResult<()>;

    /// Draw one pass
    fn render(&mut self, frame: &RenderFrame) -> BackendResult<()>;
}

/// Summary of one rendered pass
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Frame number
    pub index: u64,
    /// Pass kind
    pub pass: RenderPass,
    /// Aspect ratio of the projection used
    pub aspect: f32,
    /// Backbuffer size at draw time
    pub size: SurfaceSize,
    /// Number of meshes drawn
    pub draw_count: usize,
    /// Number of lights supplied
    pub light_count: usize,
    /// Triangles across every draw
    pub triangle_count: usize,
}

#[derive(Debug, Default)]
struct FrameLogState {
    records: Vec<FrameRecord>,
    resizes: Vec<SurfaceSize>,
}

/// Shared log of what a [`HeadlessBackend`] did
///
/// Clones share the same log, so a test can keep one while the backend is
/// owned by the render loop.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    state: Rc<RefCell<FrameLogState>>,
}

impl FrameLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Every rendered pass in order
    pub fn records(&self) -> Vec<FrameRecord> {
        self.state.borrow().records.clone()
    }

    /// Most recent pass
    pub fn last(&self) -> Option<FrameRecord> {
        self.state.borrow().records.last().cloned()
    }

    /// Passes of one kind, in order
    pub fn passes(&self, pass: RenderPass) -> Vec<FrameRecord> {
        self.state
            .borrow()
            .records
            .iter()
            .filter(|record| record.pass == pass)
            .cloned()
            .collect()
    }

    /// Number of rendered passes
    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    /// Whether nothing has been rendered
    pub fn is_empty(&self) -> bool {
        self.state.borrow().records.is_empty()
    }

    /// Every backbuffer resize in order
    pub fn resizes(&self) -> Vec<SurfaceSize> {
        self.state.borrow().resizes.clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.records.clear();
        state.resizes.clear();
    }

    fn push_record(&self, record: FrameRecord) {
        self.state.borrow_mut().records.push(record);
    }

    fn push_resize(&self, size: SurfaceSize) {
        self.state.borrow_mut().resizes.push(size);
    }
}

/// Backend that records frames instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: FrameLog,
    size: SurfaceSize,
}

impl HeadlessBackend {
    /// Create a backend with its own log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend writing into an existing log
    pub fn with_log(log: FrameLog) -> Self {
        Self {
            log,
            size: SurfaceSize::default(),
        }
    }

    /// Handle to the log
    pub fn log(&self) -> FrameLog {
        self.log.clone()
    }

    /// Current backbuffer size
    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, size: SurfaceSize) -> BackendResult<()> {
        log::trace!("Headless backbuffer resized to {}x{}", size.width, size.height);
        self.size = size;
        self.log.push_resize(size);
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> BackendResult<()> {
        self.log.push_record(FrameRecord {
            index: frame.index,
            pass: frame.pass,
            aspect: frame.aspect,
            size: self.size,
            draw_count: frame.draw_count(),
            light_count: frame.lights.len(),
            triangle_count: frame.triangle_count(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Camera;
    use crate::scene::NodeRef;

    #[test]
    fn test_headless_backend_records_passes() {
        let log = FrameLog::new();
        let mut backend = HeadlessBackend::with_log(log.clone());
        backend.resize(SurfaceSize::new(320, 240)).expect("headless resize");

        let root = NodeRef::group("root");
        let camera = Camera::default();
        for (index, pass) in [RenderPass::Background, RenderPass::Main].into_iter().enumerate() {
            let frame = RenderFrame::collect(pass, index as u64, &camera, SurfaceSize::new(320, 240), &root);
            backend.render(&frame).expect("headless render");
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.passes(RenderPass::Main).len(), 1);
        assert_eq!(log.last().map(|r| r.size), Some(SurfaceSize::new(320, 240)));
        assert_eq!(log.resizes(), vec![SurfaceSize::new(320, 240)]);

        log.clear();
        assert!(log.is_empty());
    }
}
