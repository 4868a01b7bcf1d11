//! Texture loading through the `image` crate

use super::{AssetError, AssetQueue};
use crate::render::{Texture, TextureImage, TextureRef};
use crate::scene::SceneRegistry;
use std::path::Path;
use std::rc::Rc;

/// Decode an image file into RGBA8 pixels
pub fn read_image(path: &Path) -> Result<TextureImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    log::debug!("Loading image from: {:?}", path);
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }

    log::info!("Loaded image {}x{} from {:?}", width, height, path);
    Ok(TextureImage {
        data: rgba.into_raw(),
        width,
        height,
    })
}

impl AssetQueue {
    /// Queue a 2D texture load and return its pending handle
    ///
    /// Failures are logged and leave the texture in the failed state.
    pub fn load_texture(&mut self, path: &str) -> TextureRef {
        self.load_texture_with(path, |result, _registry| {
            if let Err(e) = result {
                log::warn!("Texture load failed: {}", e);
            }
        })
    }

    /// Queue a 2D texture load and report its outcome to `on_load`
    pub fn load_texture_with(
        &mut self,
        path: &str,
        on_load: impl FnOnce(Result<TextureRef, AssetError>, &mut SceneRegistry) + 'static,
    ) -> TextureRef {
        let texture = Texture::pending(path).into_ref();
        let resolved = self.resolve(path);
        let handle = Rc::clone(&texture);

        self.enqueue(format!("texture {}", path), move |registry: &mut SceneRegistry| {
            let result = read_image(&resolved).map(|image| {
                handle.borrow_mut().fulfill(vec![image]);
                Rc::clone(&handle)
            });
            if let Err(e) = &result {
                handle.borrow_mut().fail(e.to_string());
            }
            on_load(result, registry);
        });

        texture
    }

    /// Queue a cube texture load from six faces (+x, -x, +y, -y, +z, -z)
    ///
    /// One missing or broken face fails the whole cube.
    pub fn load_cube_texture(&mut self, paths: [&str; 6]) -> TextureRef {
        let texture = Texture::pending_cube(paths[0]).into_ref();
        let resolved: Vec<_> = paths.iter().map(|path| self.resolve(path)).collect();
        let handle = Rc::clone(&texture);

        self.enqueue(format!("cube texture {}", paths[0]), move |_registry: &mut SceneRegistry| {
            let faces: Result<Vec<TextureImage>, AssetError> =
                resolved.iter().map(|path| read_image(path)).collect();
            match faces {
                Ok(faces) => {
                    handle.borrow_mut().fulfill(faces);
                }
                Err(e) => {
                    log::warn!("Cube texture load failed: {}", e);
                    handle.borrow_mut().fail(e.to_string());
                }
            }
        });

        texture
    }
}
