//! World lifecycle tests

#[cfg(test)]
mod tests {
    use crate::ecs::components::{
        CubeComponent, IdComponent, PointLightComponent, TagComponent, TransformComponent,
    };
    use crate::ecs::{Registry, System, World};
    use crate::render::{RecordingRenderer, Viewport};

    struct Spinner;

    impl System for Spinner {
        fn update(&mut self, registry: &mut Registry, delta_time: f32) {
            for entity in registry.view::<(TransformComponent,)>() {
                if let Some(transform) = registry.get_mut::<TransformComponent>(entity) {
                    transform.rotation.y += 90.0 * delta_time;
                }
            }
        }
    }

    #[test]
    fn test_game_objects_get_tag_and_unique_id() {
        let mut world = World::new();
        let a = world.create_game_object("Enemy").entity();
        let b = world.create_game_object("Enemy").entity();

        let registry = world.registry();
        assert_eq!(registry.get::<TagComponent>(a).unwrap().tag, "Enemy");
        assert_ne!(
            registry.get::<IdComponent>(a).unwrap().uuid,
            registry.get::<IdComponent>(b).unwrap().uuid
        );
    }

    #[test]
    fn test_find_by_tag_returns_first_match() {
        let mut world = World::new();
        let first = world.create_game_object("Crate").entity();
        world.create_game_object("Crate");
        assert_eq!(world.find_by_tag("Crate"), Some(first));
        assert!(world.find_game_object("Missing").is_none());
    }

    #[test]
    fn test_destroyed_object_is_gone() {
        let mut world = World::new();
        let entity = world.create_game_object("Temp").entity();
        assert!(world.destroy_game_object(entity));
        assert!(world.game_object(entity).is_none());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_systems_run_on_update() {
        let mut world = World::new();
        let entity = {
            let mut object = world.create_game_object("Spinning");
            object.add_component(TransformComponent::default()).unwrap();
            object.entity()
        };
        world.add_system(Spinner);

        world.update(0.5);
        world.update(0.5);
        let rotation = world.registry().get::<TransformComponent>(entity).unwrap().rotation;
        assert!((rotation.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_render_submits_lights_and_draws() {
        let mut world = World::new();
        {
            let mut object = world.create_game_object("Box");
            object.add_component(TransformComponent::default()).unwrap();
            object.add_component(CubeComponent::default()).unwrap();
        }
        {
            let mut object = world.create_game_object("Lamp");
            object.add_component(PointLightComponent::default()).unwrap();
        }

        let mut renderer = RecordingRenderer::new();
        let draws = world.render(&mut renderer, Viewport::default());

        assert_eq!(draws, 1);
        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.draws.len(), 1);
        assert_eq!(frame.lights.point.len(), 1);
    }

    #[test]
    fn test_reset_drops_entities_and_systems() {
        let mut world = World::new();
        let entity = world.create_game_object("Old").entity();
        world.add_system(Spinner);

        world.reset();
        assert!(!world.is_valid(entity));
        assert_eq!(world.system_count(), 0);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_cleanup_keeps_systems() {
        let mut world = World::new();
        world.create_game_object("Old");
        world.add_system(Spinner);

        world.cleanup();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.system_count(), 1);
    }
}
