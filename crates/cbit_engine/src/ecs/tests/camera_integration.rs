//! Camera resolution through a full world

#[cfg(test)]
mod tests {
    use crate::ecs::components::{CameraComponent, TransformComponent};
    use crate::ecs::World;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::{RecordingRenderer, Viewport};
    use approx::assert_relative_eq;

    #[test]
    fn test_player_camera_orbits_to_negative_x() {
        let mut world = World::new();
        let player = {
            let mut object = world.create_game_object("Player");
            object
                .add_component(TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)))
                .unwrap();
            object
                .add_component(
                    CameraComponent::default()
                        .with_perspective(45.0, 0.1, 100.0)
                        .with_orbit(Vec3::zeros(), 5.0, 0.0, 0.0)
                        .with_primary(true),
                )
                .unwrap();
            object.entity()
        };

        world.resolve_camera();

        let transform = world.registry().get::<TransformComponent>(player).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(-5.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(transform.rotation, Vec3::new(0.0, 90.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_render_without_camera_uses_identity() {
        let mut world = World::new();
        world.create_game_object("Lonely");

        let mut renderer = RecordingRenderer::new();
        world.render(&mut renderer, Viewport::new(640, 480));

        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.camera.view, Mat4::identity());
        assert_eq!(frame.camera.projection, Mat4::identity());
    }

    #[test]
    fn test_projection_tracks_viewport_aspect() {
        let mut world = World::new();
        {
            let mut object = world.create_game_object("Camera");
            object.add_component(TransformComponent::default()).unwrap();
            object.add_component(CameraComponent::default()).unwrap();
        }

        let mut renderer = RecordingRenderer::new();
        world.render(&mut renderer, Viewport::new(800, 400));
        let wide = renderer.last_frame().unwrap().camera.projection;
        world.render(&mut renderer, Viewport::new(400, 400));
        let square = renderer.last_frame().unwrap().camera.projection;

        // m[0][0] = f / aspect
        assert_relative_eq!(wide[(0, 0)] * 2.0, square[(0, 0)], epsilon = 1e-5);
        assert_relative_eq!(wide[(1, 1)], square[(1, 1)], epsilon = 1e-5);
    }

    #[test]
    fn test_camera_transform_stays_in_sync_after_orbit_change() {
        let mut world = World::new();
        let camera = {
            let mut object = world.create_game_object("Camera");
            object.add_component(TransformComponent::default()).unwrap();
            object
                .add_component(CameraComponent::default().with_orbit(Vec3::zeros(), 2.0, 0.0, 0.0))
                .unwrap();
            object.entity()
        };
        world.resolve_camera();

        world
            .registry_mut()
            .get_mut::<CameraComponent>(camera)
            .unwrap()
            .distance = 8.0;
        let matrices = world.resolve_camera();

        assert_relative_eq!(matrices.position, Vec3::new(-8.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(world.camera_system().active_camera_position(), matrices.position);
    }
}
