//! Frame driver
//!
//! Owns the scene manager, the input snapshot and the render backend, and
//! runs one `update → render → begin_frame` cycle per call to [`Engine::frame`].

use thiserror::Error;

use crate::audio::SharedAudio;
use crate::config::{ConfigError, EngineConfig};
use crate::input::{InputState, KeyCode, MouseButton};
use crate::project::{Project, ProjectError};
use crate::render::{RenderBackend, Viewport};
use crate::scene::{SceneError, SceneManager};

/// Host events fed into the engine between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// The window wants to close
    WindowCloseRequested,
    /// Framebuffer resized
    WindowResized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// Key changed state
    KeyInput {
        /// Key
        key: KeyCode,
        /// Whether it went down
        pressed: bool,
    },
    /// Mouse button changed state
    MouseButton {
        /// Button
        button: MouseButton,
        /// Whether it went down
        pressed: bool,
    },
    /// Cursor moved
    MouseMoved {
        /// Cursor x in pixels
        x: f64,
        /// Cursor y in pixels
        y: f64,
    },
    /// Wheel scrolled
    Scroll {
        /// Vertical scroll amount
        delta_y: f64,
    },
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Scene activation or persistence failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Project descriptor failure
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    /// Configuration failure
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Main engine struct
pub struct Engine<R: RenderBackend> {
    config: EngineConfig,
    scene_manager: SceneManager,
    input: InputState,
    renderer: R,
    viewport: Viewport,
    frame_count: u64,
    running: bool,
}

impl<R: RenderBackend> Engine<R> {
    /// Create an engine around a render backend
    pub fn new(config: EngineConfig, renderer: R) -> Self {
        log::info!("Initializing engine '{}'", config.window.title);
        let scene_manager = SceneManager::with_settings(&config.scenes);
        let viewport = Viewport::new(config.window.width, config.window.height);

        Self {
            config,
            scene_manager,
            input: InputState::new(),
            renderer,
            viewport,
            frame_count: 0,
            running: true,
        }
    }

    /// Share an audio device with every scene
    pub fn set_audio(&mut self, audio: SharedAudio) {
        self.scene_manager.set_audio(audio);
    }

    /// Activate the configured start scene
    pub fn start(&mut self) -> Result<(), EngineError> {
        let start_scene = self.config.scenes.start_scene.clone();
        self.scene_manager.set_active_scene(&start_scene)?;
        log::info!("Engine started with scene '{}'", start_scene);
        Ok(())
    }

    /// Load a project's scenes and activate its current scene
    pub fn open_project(&mut self, project: &Project) -> Result<(), EngineError> {
        self.scene_manager.load_project(project)?;
        log::info!("Opened project '{}'", project.name);
        Ok(())
    }

    /// Run one frame; returns the number of draws issued
    pub fn frame(&mut self, delta_time: f32) -> usize {
        self.scene_manager.update(delta_time, &self.input);
        let draws = self.scene_manager.render(&mut self.renderer, self.viewport);
        self.input.begin_frame();
        self.frame_count += 1;
        log::trace!("Frame {} issued {} draws", self.frame_count, draws);
        draws
    }

    /// Apply a host event
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::WindowCloseRequested => self.running = false,
            EngineEvent::WindowResized { width, height } => self.resize(width, height),
            EngineEvent::KeyInput { key, pressed } => self.input.handle_key_input(key, pressed),
            EngineEvent::MouseButton { button, pressed } => {
                self.input.handle_mouse_button(button, pressed);
            }
            EngineEvent::MouseMoved { x, y } => self.input.handle_mouse_move(x, y),
            EngineEvent::Scroll { delta_y } => self.input.handle_scroll(delta_y),
        }
    }

    /// Change the viewport used from the next frame on
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Stop the main loop and release the current scene
    pub fn shutdown(&mut self) {
        self.running = false;
        self.scene_manager.cleanup();
        log::info!("Engine shutdown after {} frames", self.frame_count);
    }

    /// Whether the host should keep calling [`Engine::frame`]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Input snapshot
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input snapshot, mutably
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Scene manager
    pub fn scene_manager(&self) -> &SceneManager {
        &self.scene_manager
    }

    /// Scene manager, mutably
    pub fn scene_manager_mut(&mut self) -> &mut SceneManager {
        &mut self.scene_manager
    }

    /// Render backend
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render backend, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
