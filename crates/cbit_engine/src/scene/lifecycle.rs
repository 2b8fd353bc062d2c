//! Scene trait and shared scene state
//!
//! Concrete scenes embed a [`SceneState`] and implement [`Scene`]. Every
//! lifecycle method has a default that delegates to the state, so a scene
//! only overrides what it customizes and calls the matching `SceneState`
//! method to keep the base behavior.

use crate::audio::{AudioError, MusicHandle, SharedAudio};
use crate::ecs::World;
use crate::input::{InputState, MouseButton};
use crate::render::{RenderBackend, Viewport};

use super::SceneDocument;

/// State every scene carries
pub struct SceneState {
    name: String,
    world: World,
    is_change_scene: bool,
    next_scene: String,
    debug: bool,
    audio: Option<SharedAudio>,
    bgm: Option<MusicHandle>,
    content: Option<SceneDocument>,
}

impl SceneState {
    /// Fresh state with an empty world
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: World::new(),
            is_change_scene: false,
            next_scene: String::new(),
            debug: false,
            audio: None,
            bgm: None,
            content: None,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The scene's world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The scene's world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Base setup: clear the world, forget the old camera, stop music
    ///
    /// Scenes loaded from a file are rebuilt from that file's content, so
    /// reactivating a loaded scene restores it instead of emptying it.
    pub fn reset(&mut self) {
        self.world.reset();
        self.stop_bgm();

        if let Some(content) = &self.content {
            if let Err(err) = content.spawn_into(&mut self.world) {
                log::error!("Failed to rebuild scene '{}': {}", self.name, err);
            }
        }
        log::debug!("Scene '{}' set up with {} entities", self.name, self.world.entity_count());
    }

    /// Base update: debug click logging, then the world's systems
    pub fn update_world(&mut self, delta_time: f32, input: &InputState) {
        if self.debug && input.is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = input.mouse_position();
            log::debug!("[{}] click at ({:.0}, {:.0})", self.name, x, y);
        }
        self.world.update(delta_time);
    }

    /// Base render: draw the world
    pub fn render_world(&mut self, renderer: &mut dyn RenderBackend, viewport: Viewport) -> usize {
        self.world.render(renderer, viewport)
    }

    /// Request a switch to `name`; takes effect at the next manager render
    pub fn change_scene(&mut self, name: impl Into<String>) {
        self.next_scene = name.into();
        self.is_change_scene = true;
    }

    /// Whether a switch is pending
    pub fn switch_requested(&self) -> bool {
        self.is_change_scene
    }

    /// Consume a pending switch request
    pub fn take_switch_request(&mut self) -> Option<String> {
        if self.is_change_scene {
            self.is_change_scene = false;
            Some(self.next_scene.clone())
        } else {
            None
        }
    }

    /// Record the follow-up scene without requesting the switch yet
    pub fn set_next_scene(&mut self, name: impl Into<String>) {
        self.next_scene = name.into();
    }

    /// Follow-up scene name
    pub fn next_scene(&self) -> &str {
        &self.next_scene
    }

    /// Flip debug mode
    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        log::info!("Scene '{}' debug mode {}", self.name, if self.debug { "on" } else { "off" });
    }

    /// Whether debug mode is on
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Attach (or detach) the shared audio device
    pub fn set_audio(&mut self, audio: Option<SharedAudio>) {
        self.audio = audio;
    }

    /// Shared audio device, if attached
    pub fn audio(&self) -> Option<&SharedAudio> {
        self.audio.as_ref()
    }

    /// Start looping background music
    pub fn play_bgm(&mut self, track: &str) -> Result<MusicHandle, AudioError> {
        let audio = self.audio.as_ref().ok_or(AudioError::NoDevice)?;
        let handle = audio.borrow_mut().play_music(track)?;
        self.bgm = Some(handle);
        Ok(handle)
    }

    /// Stop background music, whoever started it
    pub fn stop_bgm(&mut self) {
        if let Some(audio) = &self.audio {
            audio.borrow_mut().stop_music();
        }
        self.bgm = None;
    }

    /// Music started by this scene, if still current
    pub fn bgm(&self) -> Option<MusicHandle> {
        self.bgm
    }

    /// Fire a one-shot sound effect
    pub fn play_sfx(&mut self, sound: &str) -> Result<(), AudioError> {
        let audio = self.audio.as_ref().ok_or(AudioError::NoDevice)?;
        audio.borrow_mut().play_sound(sound)
    }

    /// Content the scene was loaded from, if any
    pub fn content(&self) -> Option<&SceneDocument> {
        self.content.as_ref()
    }

    /// Replace the content `reset` rebuilds from
    pub fn set_content(&mut self, content: Option<SceneDocument>) {
        self.content = content;
    }
}

impl std::fmt::Debug for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneState")
            .field("name", &self.name)
            .field("world", &self.world)
            .field("is_change_scene", &self.is_change_scene)
            .field("next_scene", &self.next_scene)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// A scene's lifecycle
///
/// `setup` may run many times (every activation); `cleanup` releases the
/// world's entities and the scene can be set up again afterwards.
pub trait Scene {
    /// Shared state
    fn state(&self) -> &SceneState;

    /// Shared state, mutably
    fn state_mut(&mut self) -> &mut SceneState;

    /// Prepare the scene for (re)activation
    fn setup(&mut self) {
        self.state_mut().reset();
    }

    /// Advance the simulation; switch requests are only recorded here
    fn update(&mut self, delta_time: f32, input: &InputState) {
        self.state_mut().update_world(delta_time, input);
    }

    /// Issue draws for the current world state; returns the draw count
    fn render(&mut self, renderer: &mut dyn RenderBackend, viewport: Viewport) -> usize {
        self.state_mut().render_world(renderer, viewport)
    }

    /// Release the world's entities
    fn cleanup(&mut self) {
        self.state_mut().world_mut().cleanup();
    }

    /// Scene name
    fn name(&self) -> &str {
        self.state().name()
    }

    /// The scene's world
    fn world(&self) -> &World {
        self.state().world()
    }

    /// The scene's world, mutably
    fn world_mut(&mut self) -> &mut World {
        self.state_mut().world_mut()
    }

    /// Request a deferred switch to `name`
    fn change_scene(&mut self, name: &str) {
        self.state_mut().change_scene(name);
    }

    /// Consume a pending switch request
    fn take_switch_request(&mut self) -> Option<String> {
        self.state_mut().take_switch_request()
    }

    /// Record the follow-up scene
    fn set_next_scene(&mut self, name: &str) {
        self.state_mut().set_next_scene(name);
    }
}

/// Data-only scene, typically loaded from a scene file
#[derive(Debug)]
pub struct BasicScene {
    state: SceneState,
}

impl BasicScene {
    /// Empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: SceneState::new(name),
        }
    }
}

impl Scene for BasicScene {
    fn state(&self) -> &SceneState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }
}
