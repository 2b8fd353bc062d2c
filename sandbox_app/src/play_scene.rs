//! Interactive demo scene
//!
//! A lit, spinning crate on a textured floor. Arrow keys orbit the camera,
//! F3 toggles debug mode, Space plays a sound and Enter moves on to the
//! credits scene.

use cbit_engine::ecs::components::{
    CameraComponent, CubeComponent, LightFactory, QuadComponent, TextureComponent,
    TransformComponent,
};
use cbit_engine::ecs::{Registry, System};
use cbit_engine::foundation::math::{Vec3, Vec4};
use cbit_engine::input::{InputState, KeyCode};
use cbit_engine::scene::{Scene, SceneState};

/// Scene the play scene hands over to
pub const CREDITS_SCENE: &str = "credits";

const ORBIT_SPEED: f32 = 90.0;
const PITCH_LIMIT: f32 = 89.0;
const THEME_TRACK: &str = "audio/theme.ogg";
const JUMP_SOUND: &str = "audio/jump.wav";

/// Rotates every cube around the Y axis
struct SpinSystem {
    degrees_per_second: f32,
}

impl System for SpinSystem {
    fn name(&self) -> &str {
        "SpinSystem"
    }

    fn update(&mut self, registry: &mut Registry, delta_time: f32) {
        for entity in registry.view::<(TransformComponent, CubeComponent)>() {
            if let Some(transform) = registry.get_mut::<TransformComponent>(entity) {
                let turned = transform.rotation.y + self.degrees_per_second * delta_time;
                transform.rotation.y = turned % 360.0;
            }
        }
    }
}

/// The sandbox's playable scene
#[derive(Debug)]
pub struct PlayScene {
    state: SceneState,
}

impl PlayScene {
    /// Create the scene; entities are spawned on setup
    pub fn new(name: &str) -> Self {
        Self {
            state: SceneState::new(name),
        }
    }

    fn spawn_defaults(&mut self) {
        // Freshly created objects are alive, so attaching cannot fail
        let world = self.state.world_mut();
        {
            let mut camera = world.create_game_object("Main Camera");
            let _ = camera.add_component(TransformComponent::default());
            let _ = camera.add_component(CameraComponent::default().with_orbit(
                Vec3::new(0.0, 0.5, 0.0),
                8.0,
                -90.0,
                -25.0,
            ));
            let _ = camera.add_component(LightFactory::spot(
                Vec3::zeros(),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
                12.5,
                17.5,
            ));
        }
        {
            let mut sun = world.create_game_object("Sun");
            let _ = sun.add_component(LightFactory::directional(
                Vec3::new(-0.2, -1.0, -0.3),
                Vec3::new(1.0, 0.95, 0.9),
                Vec3::new(0.1, 0.1, 0.1),
            ));
        }
        {
            let mut lamp = world.create_game_object("Lamp");
            let _ = lamp.add_component(LightFactory::point(
                Vec3::new(2.0, 3.0, 2.0),
                Vec3::new(1.0, 0.6, 0.3),
            ));
        }
        {
            let mut crate_object = world.create_game_object("Crate");
            let _ = crate_object
                .add_component(TransformComponent::from_position(Vec3::new(0.0, 0.5, 0.0)));
            let _ = crate_object.add_component(CubeComponent::new(Vec4::new(0.8, 0.5, 0.2, 1.0)));
        }
        {
            let mut floor = world.create_game_object("Floor");
            let _ = floor.add_component(
                TransformComponent::default()
                    .with_rotation(Vec3::new(-90.0, 0.0, 0.0))
                    .with_scale(Vec3::new(10.0, 10.0, 1.0)),
            );
            let _ = floor.add_component(QuadComponent::new(Vec4::new(0.3, 0.3, 0.3, 1.0)));
            let _ = floor.add_component(TextureComponent::new("textures/floor.png"));
        }
    }

    fn orbit_camera(&mut self, delta_time: f32, input: &InputState) {
        let world = self.state.world_mut();
        let Some(camera_entity) = world.camera_system().active_camera() else {
            return;
        };
        let Some(camera) = world.registry_mut().get_mut::<CameraComponent>(camera_entity) else {
            return;
        };

        let step = ORBIT_SPEED * delta_time;
        if input.is_key_down(KeyCode::Left) {
            camera.yaw -= step;
        }
        if input.is_key_down(KeyCode::Right) {
            camera.yaw += step;
        }
        if input.is_key_down(KeyCode::Up) {
            camera.pitch = (camera.pitch + step).min(PITCH_LIMIT);
        }
        if input.is_key_down(KeyCode::Down) {
            camera.pitch = (camera.pitch - step).max(-PITCH_LIMIT);
        }
    }
}

impl Scene for PlayScene {
    fn state(&self) -> &SceneState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    fn setup(&mut self) {
        self.state.reset();
        if self.state.content().is_none() {
            self.spawn_defaults();
        }
        self.state.world_mut().add_system(SpinSystem { degrees_per_second: 45.0 });

        if let Err(err) = self.state.play_bgm(THEME_TRACK) {
            log::warn!("No background music: {}", err);
        }
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        if input.is_key_pressed(KeyCode::F3) {
            self.state.toggle_debug();
        }
        if input.is_key_pressed(KeyCode::Space) {
            if let Err(err) = self.state.play_sfx(JUMP_SOUND) {
                log::warn!("Could not play '{}': {}", JUMP_SOUND, err);
            }
        }
        self.orbit_camera(delta_time, input);
        self.state.update_world(delta_time, input);

        if input.is_key_pressed(KeyCode::Enter) {
            self.state.change_scene(CREDITS_SCENE);
        }
    }
}
