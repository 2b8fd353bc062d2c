//! # Rendering System
//!
//! Walks every renderable entity and submits one draw per mesh component.
//! Quads are submitted before cubes; within a kind, entities go in view order.

use crate::ecs::components::{
    CubeComponent, QuadComponent, Renderable, TextureComponent, TransformComponent,
};
use crate::ecs::Registry;
use crate::foundation::math::Vec4;
use crate::render::{DrawCommand, RenderBackend};

/// Tint used when a texture is bound
const TEXTURED_TINT: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Collects renderables and submits them to a backend
#[derive(Debug, Default)]
pub struct RenderingSystem {
    last_draw_count: usize,
}

impl RenderingSystem {
    /// Create a rendering system
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit every renderable entity; returns the number of draws
    ///
    /// Texture handles are resolved on first use and cached on the component.
    pub fn submit(&mut self, registry: &mut Registry, renderer: &mut dyn RenderBackend) -> usize {
        let draws = submit_kind::<QuadComponent>(registry, renderer)
            + submit_kind::<CubeComponent>(registry, renderer);
        self.last_draw_count = draws;
        draws
    }

    /// Draw count from the last submission
    pub fn last_draw_count(&self) -> usize {
        self.last_draw_count
    }
}

fn submit_kind<R: Renderable>(registry: &mut Registry, renderer: &mut dyn RenderBackend) -> usize {
    let entities = registry.view::<(R, TransformComponent)>();

    for &entity in &entities {
        let texture = registry
            .get_mut::<TextureComponent>(entity)
            .and_then(|texture| texture.resolve(|path| renderer.load_texture(path)));

        let mesh = registry.get::<R>(entity);
        let transform = registry.get::<TransformComponent>(entity);
        let (Some(mesh), Some(transform)) = (mesh, transform) else {
            continue;
        };

        renderer.draw(&DrawCommand {
            entity,
            mesh: R::MESH,
            model: transform.to_matrix(),
            color: if texture.is_some() { TEXTURED_TINT } else { mesh.color() },
            texture,
        });
    }

    entities.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CameraMatrices, MeshKind, RecordingRenderer, TextureHandle};

    fn record(registry: &mut Registry) -> (RecordingRenderer, usize) {
        let mut renderer = RecordingRenderer::new();
        let mut system = RenderingSystem::new();
        renderer.begin_frame(&CameraMatrices::identity());
        let draws = system.submit(registry, &mut renderer);
        renderer.end_frame();
        (renderer, draws)
    }

    #[test]
    fn test_entities_without_transform_are_skipped() {
        let mut registry = Registry::new();
        let floating = registry.create();
        registry.emplace(floating, CubeComponent::default()).unwrap();

        let (renderer, draws) = record(&mut registry);
        assert_eq!(draws, 0);
        assert!(renderer.last_frame().unwrap().draws.is_empty());
    }

    #[test]
    fn test_quads_then_cubes() {
        let mut registry = Registry::new();
        let cube = registry.create();
        registry.emplace(cube, TransformComponent::default()).unwrap();
        registry.emplace(cube, CubeComponent::default()).unwrap();
        let quad = registry.create();
        registry.emplace(quad, TransformComponent::default()).unwrap();
        registry.emplace(quad, QuadComponent::default()).unwrap();

        let (renderer, draws) = record(&mut registry);
        assert_eq!(draws, 2);
        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.draws[0].mesh, MeshKind::Quad);
        assert_eq!(frame.draws[0].entity, quad);
        assert_eq!(frame.draws[1].mesh, MeshKind::Cube);
    }

    #[test]
    fn test_textured_mesh_draws_white_with_handle() {
        let mut registry = Registry::new();
        let logo = registry.create();
        registry.emplace(logo, TransformComponent::default()).unwrap();
        registry.emplace(logo, QuadComponent::new(Vec4::new(1.0, 0.0, 0.0, 1.0))).unwrap();
        registry.emplace(logo, TextureComponent::new("logo.png")).unwrap();

        let (renderer, _) = record(&mut registry);
        let draw = &renderer.last_frame().unwrap().draws[0];
        assert_eq!(draw.color, TEXTURED_TINT);
        assert_eq!(draw.texture, Some(TextureHandle(1)));
        let handle = registry.get::<TextureComponent>(logo).unwrap().handle();
        assert_eq!(handle, Some(TextureHandle(1)));
    }

    #[test]
    fn test_untextured_mesh_keeps_its_color() {
        let mut registry = Registry::new();
        let cube = registry.create();
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        registry.emplace(cube, TransformComponent::default()).unwrap();
        registry.emplace(cube, CubeComponent::new(red)).unwrap();

        let (renderer, _) = record(&mut registry);
        let draw = &renderer.last_frame().unwrap().draws[0];
        assert_eq!(draw.color, red);
        assert_eq!(draw.texture, None);
    }
}
