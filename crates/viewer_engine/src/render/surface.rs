//! Draw surfaces and resize notification

use crate::core::SurfaceConfig;
use crate::events::{Channel, Subscription};
use std::cell::Cell;

/// Width and height of a drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, exactly `0.0` when the height is zero
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Whether nothing can be drawn into this size
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<&SurfaceConfig> for SurfaceSize {
    fn from(config: &SurfaceConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

/// Anything the render loop can draw into
///
/// The surface is the source of truth for the aspect ratio; the controller
/// reads it on every frame and on every resize event.
pub trait DrawSurface {
    /// Current drawable size
    fn size(&self) -> SurfaceSize;
}

/// In-memory surface whose size the host sets directly
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: Cell<SurfaceSize>,
}

impl HeadlessSurface {
    /// Create a surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Cell::new(SurfaceSize::new(width, height)),
        }
    }

    /// Create a surface sized from configuration
    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Change the size
    ///
    /// This only changes what [`DrawSurface::size`] reports; hosts that
    /// want the render loop to react immediately also fire their
    /// [`ResizeNotifier`].
    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(SurfaceSize::new(width, height));
    }
}

impl DrawSurface for HeadlessSurface {
    fn size(&self) -> SurfaceSize {
        self.size.get()
    }
}

/// Host-side source of resize events
///
/// Listeners run synchronously in subscription order. Events are not
/// replayed to late listeners.
#[derive(Debug)]
pub struct ResizeNotifier {
    channel: Channel<SurfaceSize>,
}

impl ResizeNotifier {
    /// Create a notifier with no listeners
    pub fn new() -> Self {
        Self {
            channel: Channel::without_replay("resize", SurfaceSize::default()),
        }
    }

    /// Deliver a resize event to every listener
    pub fn notify(&self, size: SurfaceSize) {
        log::debug!("Resize event {}x{}", size.width, size.height);
        self.channel.publish(size);
    }

    /// Attach a listener until the returned guard is dropped
    pub fn subscribe(&self, listener: impl FnMut(&SurfaceSize) + 'static) -> ResizeSubscription {
        ResizeSubscription {
            inner: self.channel.subscribe(listener),
        }
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.channel.subscriber_count()
    }
}

impl Default for ResizeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard keeping a resize listener attached
#[derive(Debug)]
#[must_use = "dropping the guard detaches the listener"]
pub struct ResizeSubscription {
    inner: Subscription,
}

impl ResizeSubscription {
    /// Whether the listener is still attached
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if self.inner.unsubscribe() {
            log::trace!("Resize listener released");
        }
    }
}
