//! Drawable primitives and textures

use crate::ecs::Component;
use crate::foundation::math::Vec4;
use crate::render::{MeshKind, TextureHandle};

/// A component that draws a built-in mesh
pub trait Renderable: Component {
    /// Mesh drawn for this component
    const MESH: MeshKind;

    /// Base RGBA color
    fn color(&self) -> Vec4;
}

/// Unit quad in the XY plane
#[derive(Debug, Clone, PartialEq)]
pub struct QuadComponent {
    /// RGBA color
    pub color: Vec4,
}

impl Default for QuadComponent {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl QuadComponent {
    /// Quad with the given color
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Component for QuadComponent {}

impl Renderable for QuadComponent {
    const MESH: MeshKind = MeshKind::Quad;

    fn color(&self) -> Vec4 {
        self.color
    }
}

/// Unit cube centered on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CubeComponent {
    /// RGBA color
    pub color: Vec4,
}

impl Default for CubeComponent {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl CubeComponent {
    /// Cube with the given color
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Component for CubeComponent {}

impl Renderable for CubeComponent {
    const MESH: MeshKind = MeshKind::Cube;

    fn color(&self) -> Vec4 {
        self.color
    }
}

/// Image applied to the entity's mesh
///
/// Only the path is persisted. The GPU handle is resolved lazily the first
/// time the entity is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureComponent {
    /// Image path, relative to the working directory
    pub path: String,
    handle: Option<TextureHandle>,
    load_attempted: bool,
}

impl TextureComponent {
    /// Texture that will be loaded from `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handle: None,
            load_attempted: false,
        }
    }

    /// Resolved handle, if the texture has been loaded
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Resolve the handle once using `load`; failures are not retried
    pub fn resolve(
        &mut self,
        load: impl FnOnce(&str) -> Option<TextureHandle>,
    ) -> Option<TextureHandle> {
        if !self.load_attempted {
            self.load_attempted = true;
            self.handle = load(&self.path);
            if self.handle.is_none() {
                log::warn!("Failed to load texture '{}'", self.path);
            }
        }
        self.handle
    }
}

impl Component for TextureComponent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_resolves_once() {
        let mut texture = TextureComponent::new("logo.png");
        let mut calls = 0;
        for _ in 0..3 {
            texture.resolve(|_| {
                calls += 1;
                Some(TextureHandle(7))
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(texture.handle(), Some(TextureHandle(7)));
    }

    #[test]
    fn test_failed_texture_is_not_retried() {
        let mut texture = TextureComponent::new("missing.png");
        assert_eq!(texture.resolve(|_| None), None);
        assert_eq!(texture.resolve(|_| Some(TextureHandle(1))), None);
    }
}
