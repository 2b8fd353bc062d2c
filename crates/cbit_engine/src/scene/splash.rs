//! Splash scene shown before the first real scene
//!
//! Shows the engine logo for a fixed time, then requests a switch to the
//! scene recorded as its follow-up. Enter, Space or Escape skip the wait.

use crate::ecs::components::{CameraComponent, QuadComponent, TextureComponent, TransformComponent};
use crate::foundation::math::Vec3;
use crate::input::{InputState, KeyCode};

use super::{Scene, SceneState};

/// Logo image, relative to the working directory
pub const LOGO_PATH: &str = "resources/branding/logo.png";

const SKIP_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::Space, KeyCode::Escape];

/// Timed logo scene
#[derive(Debug)]
pub struct SplashScene {
    state: SceneState,
    elapsed: f32,
    duration: f32,
    handed_over: bool,
}

impl SplashScene {
    /// Splash that lasts `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            state: SceneState::new(super::SPLASH_SCENE_NAME),
            elapsed: 0.0,
            duration: duration.max(0.0),
            handed_over: false,
        }
    }

    /// Seconds shown so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total display time in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl Scene for SplashScene {
    fn state(&self) -> &SceneState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    fn setup(&mut self) {
        self.state.reset();
        self.elapsed = 0.0;
        self.handed_over = false;

        // Freshly created objects are alive, so attaching cannot fail
        let world = self.state.world_mut();
        {
            let mut camera = world.create_game_object("Splash Camera");
            let _ = camera.add_component(TransformComponent::default());
            let _ = camera.add_component(
                CameraComponent::default().with_orbit(Vec3::zeros(), 3.0, -90.0, 0.0),
            );
        }
        {
            let mut logo = world.create_game_object("Logo");
            let _ = logo.add_component(
                TransformComponent::default().with_scale(Vec3::new(2.0, 2.0, 1.0)),
            );
            let _ = logo.add_component(QuadComponent::default());
            let _ = logo.add_component(TextureComponent::new(LOGO_PATH));
        }
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        self.state.update_world(delta_time, input);
        self.elapsed += delta_time;

        if self.handed_over || self.state.next_scene().is_empty() {
            return;
        }

        let skipped = input.any_key_pressed(&SKIP_KEYS);
        if skipped || self.elapsed >= self.duration {
            let next = self.state.next_scene().to_string();
            let reason = if skipped { " (skipped)" } else { "" };
            log::info!("Splash finished{}, switching to '{}'", reason, next);
            self.state.change_scene(next);
            self.handed_over = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_switch_after_duration() {
        let mut splash = SplashScene::new(1.0);
        splash.setup();
        splash.set_next_scene("game");
        let input = InputState::new();

        splash.update(0.6, &input);
        assert_eq!(splash.take_switch_request(), None);
        splash.update(0.6, &input);
        assert_eq!(splash.take_switch_request().as_deref(), Some("game"));
    }

    #[test]
    fn test_skip_key_ends_splash_early() {
        let mut splash = SplashScene::new(10.0);
        splash.setup();
        splash.set_next_scene("game");

        let mut input = InputState::new();
        input.handle_key_input(KeyCode::Space, true);
        splash.update(0.01, &input);
        assert_eq!(splash.take_switch_request().as_deref(), Some("game"));
    }

    #[test]
    fn test_hand_over_happens_once() {
        let mut splash = SplashScene::new(0.0);
        splash.setup();
        splash.set_next_scene("missing");
        let input = InputState::new();

        splash.update(0.1, &input);
        assert!(splash.take_switch_request().is_some());
        splash.update(0.1, &input);
        assert!(splash.take_switch_request().is_none());
    }

    #[test]
    fn test_setup_spawns_camera_and_logo() {
        let mut splash = SplashScene::new(1.0);
        splash.setup();
        let world = splash.world();
        assert_eq!(world.entity_count(), 2);
        assert!(world.find_by_tag("Logo").is_some());
    }
}
