//! Headless backend that records every frame
//!
//! Used by tests and the sandbox binary to observe exactly what a scene would
//! have drawn.

use std::collections::HashMap;

use super::{CameraMatrices, DrawCommand, LightEnvironment, RenderBackend, TextureHandle};

/// Everything submitted between `begin_frame` and `end_frame`
#[derive(Debug, Clone, Default)]
pub struct RecordedFrame {
    /// Camera the frame started with
    pub camera: CameraMatrices,
    /// Lights applied during the frame
    pub lights: LightEnvironment,
    /// Draws in submission order
    pub draws: Vec<DrawCommand>,
}

/// [`RenderBackend`] that keeps frames in memory instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
    current: Option<RecordedFrame>,
    textures: HashMap<String, TextureHandle>,
    texture_loads: usize,
    next_texture: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Most recently completed frame
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of `load_texture` calls that created a new texture
    pub fn texture_loads(&self) -> usize {
        self.texture_loads
    }

    /// Forget recorded frames, keeping loaded textures
    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.current = None;
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self, camera: &CameraMatrices) {
        if self.current.is_some() {
            log::warn!("begin_frame called twice without end_frame; dropping the open frame");
        }
        self.current = Some(RecordedFrame {
            camera: *camera,
            ..Default::default()
        });
    }

    fn apply_lights(&mut self, lights: &LightEnvironment) {
        if let Some(frame) = self.current.as_mut() {
            frame.lights = lights.clone();
        }
    }

    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        if path.is_empty() {
            return None;
        }
        if let Some(handle) = self.textures.get(path) {
            return Some(*handle);
        }

        self.next_texture += 1;
        self.texture_loads += 1;
        let handle = TextureHandle(self.next_texture);
        self.textures.insert(path.to_string(), handle);
        Some(handle)
    }

    fn draw(&mut self, command: &DrawCommand) {
        match self.current.as_mut() {
            Some(frame) => frame.draws.push(command.clone()),
            None => log::warn!("draw called outside of a frame"),
        }
    }

    fn end_frame(&mut self) {
        if let Some(frame) = self.current.take() {
            log::trace!("Recorded frame with {} draws", frame.draws.len());
            self.frames.push(frame);
        }
    }
}
