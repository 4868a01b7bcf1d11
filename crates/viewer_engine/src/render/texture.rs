//! Textures and their loading state
//!
//! A texture handle exists before its pixels do: loaders hand out a pending
//! [`TextureRef`] immediately and fill it when the load job runs. Materials
//! keep the handle, so a texture that finishes loading later is picked up by
//! the next frame without touching the scene.

use std::cell::RefCell;
use std::rc::Rc;

/// Decoded RGBA8 pixel data
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl TextureImage {
    /// Create a single-color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.iter().copied().cycle().take(pixel_count * 4).collect();
        Self { data, width, height }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// How a texture is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Plain 2D texture
    Flat,
    /// Six-face cube map (+x, -x, +y, -y, +z, -z)
    Cube,
}

impl TextureKind {
    /// Number of images a complete texture of this kind holds
    pub fn layer_count(self) -> usize {
        match self {
            Self::Flat => 1,
            Self::Cube => 6,
        }
    }
}

/// Load state of a texture
#[derive(Debug, Clone, PartialEq)]
pub enum TextureState {
    /// Load has been queued but has not run yet
    Pending,
    /// Pixels are available, one image per layer
    Ready(Vec<TextureImage>),
    /// Load failed; the texture stays empty
    Failed(String),
}

/// A texture referenced by materials
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    source: String,
    kind: TextureKind,
    state: TextureState,
}

/// Shared texture handle
pub type TextureRef = Rc<RefCell<Texture>>;

impl Texture {
    /// Create a pending 2D texture for `source`
    pub fn pending(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: TextureKind::Flat,
            state: TextureState::Pending,
        }
    }

    /// Create a pending cube texture for `source`
    pub fn pending_cube(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: TextureKind::Cube,
            state: TextureState::Pending,
        }
    }

    /// Create a ready 2D texture from an image
    pub fn from_image(source: impl Into<String>, image: TextureImage) -> Self {
        Self {
            source: source.into(),
            kind: TextureKind::Flat,
            state: TextureState::Ready(vec![image]),
        }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> TextureRef {
        Rc::new(RefCell::new(self))
    }

    /// Where the pixels come from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Texture kind
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Current load state
    pub fn state(&self) -> &TextureState {
        &self.state
    }

    /// Whether pixels are available
    pub fn is_ready(&self) -> bool {
        matches!(self.state, TextureState::Ready(_))
    }

    /// Whether the load has not completed yet
    pub fn is_pending(&self) -> bool {
        matches!(self.state, TextureState::Pending)
    }

    /// Images of a ready texture, empty otherwise
    pub fn images(&self) -> &[TextureImage] {
        match &self.state {
            TextureState::Ready(images) => images,
            _ => &[],
        }
    }

    /// Dimensions of the first layer of a ready texture
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.images().first().map(|image| (image.width, image.height))
    }

    /// Store loaded pixels
    ///
    /// Returns `false` and leaves the texture untouched when the number of
    /// images does not match the texture kind.
    pub fn fulfill(&mut self, images: Vec<TextureImage>) -> bool {
        if images.len() != self.kind.layer_count() {
            log::warn!(
                "Texture '{}' expected {} image(s), got {}",
                self.source,
                self.kind.layer_count(),
                images.len()
            );
            return false;
        }
        self.state = TextureState::Ready(images);
        true
    }

    /// Mark the load as failed
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = TextureState::Failed(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let image = TextureImage::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(image.size_bytes(), 4 * 4 * 4);
        assert_eq!(&image.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&image.data[60..64], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_pending_texture_fills_in_place() {
        let texture = Texture::pending("rock.jpg").into_ref();
        let material_handle = Rc::clone(&texture);
        assert!(texture.borrow().is_pending());
        assert_eq!(texture.borrow().dimensions(), None);

        assert!(texture.borrow_mut().fulfill(vec![TextureImage::solid_color(2, 1, [0; 4])]));
        assert!(material_handle.borrow().is_ready());
        assert_eq!(material_handle.borrow().dimensions(), Some((2, 1)));
    }

    #[test]
    fn test_cube_texture_requires_six_faces() {
        let mut cube = Texture::pending_cube("Bridge2");
        assert!(!cube.fulfill(vec![TextureImage::solid_color(1, 1, [0; 4])]));
        assert!(cube.is_pending());

        let faces = (0..6).map(|_| TextureImage::solid_color(1, 1, [0; 4])).collect();
        assert!(cube.fulfill(faces));
        assert_eq!(cube.images().len(), 6);
    }

    #[test]
    fn test_failed_texture_has_no_images() {
        let mut texture = Texture::pending("missing.png");
        texture.fail("not found");
        assert_eq!(texture.state(), &TextureState::Failed("not found".to_string()));
        assert!(texture.images().is_empty());
    }
}
