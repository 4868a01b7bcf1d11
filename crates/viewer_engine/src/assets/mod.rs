//! Asset management system
//!
//! Loads are queued, not run: a loader returns immediately (textures hand
//! back a pending handle) and the work happens when the host calls
//! [`AssetQueue::poll`] between frames. Completion callbacks get the
//! [`SceneRegistry`] so they can insert what they loaded. Every load is a
//! single attempt; failures are reported to the callback and never retried.

pub mod gltf_loader;
pub mod model_loader;
pub mod texture_loader;

pub use gltf_loader::read_gltf;
pub use model_loader::{read_model, read_obj};
pub use texture_loader::read_image;

use crate::core::AssetConfig;
use crate::scene::SceneRegistry;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// No file at the resolved path
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    /// Reading the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a decodable image
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// The file is not a loadable model
    #[error("model load error: {0}")]
    Model(#[from] tobj::LoadError),

    /// The file is not a loadable glTF document
    #[error("glTF load error: {0}")]
    Gltf(#[from] gltf::Error),

    /// The file decoded but contained nothing usable
    #[error("asset contains no usable data: {0}")]
    Empty(PathBuf),
}

type Job = Box<dyn FnOnce(&mut SceneRegistry)>;

/// Queue of pending single-attempt asset loads
pub struct AssetQueue {
    assets_dir: PathBuf,
    jobs: VecDeque<(String, Job)>,
}

impl AssetQueue {
    /// Create a queue resolving paths against the configured directory
    pub fn new(config: &AssetConfig) -> Self {
        Self::with_dir(&config.assets_dir)
    }

    /// Create a queue resolving paths against `assets_dir`
    pub fn with_dir(assets_dir: impl AsRef<Path>) -> Self {
        Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
            jobs: VecDeque::new(),
        }
    }

    /// Base directory for relative paths
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Resolve `path` against the assets directory; absolute paths pass through
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir.join(path)
        }
    }

    /// Queue a job to run on the next `poll`
    pub fn enqueue(&mut self, label: impl Into<String>, job: impl FnOnce(&mut SceneRegistry) + 'static) {
        let label = label.into();
        log::trace!("Queued asset job '{}'", label);
        self.jobs.push_back((label, Box::new(job)));
    }

    /// Number of queued jobs
    pub fn pending(&self) -> usize {
        self.jobs.len()
    }

    /// Run every job queued before this call, in order
    ///
    /// Jobs queued by a running job wait for the next `poll`. Returns the
    /// number of jobs run.
    pub fn poll(&mut self, registry: &mut SceneRegistry) -> usize {
        let batch: Vec<(String, Job)> = self.jobs.drain(..).collect();
        let count = batch.len();
        for (label, job) in batch {
            log::debug!("Running asset job '{}'", label);
            job(registry);
        }
        count
    }
}

impl fmt::Debug for AssetQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetQueue")
            .field("assets_dir", &self.assets_dir)
            .field("pending", &self.jobs.len())
            .finish()
    }
}
