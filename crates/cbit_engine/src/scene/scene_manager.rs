//! # Scene Manager
//!
//! Owns every scene by name and tracks the current one by name, so removing
//! a scene can never leave a dangling current scene. Switch requests made
//! during `update` are honored at the start of the next `render`.

use std::collections::HashMap;
use std::path::Path;

use crate::audio::SharedAudio;
use crate::config::SceneSettings;
use crate::input::InputState;
use crate::render::{RenderBackend, Viewport};

use super::{BasicScene, Scene, SceneError, SceneSerializer, SplashScene};

/// Name the splash scene is registered under
pub const SPLASH_SCENE_NAME: &str = "splash";

/// Name → scene map plus the current-scene pointer
pub struct SceneManager {
    scenes: HashMap<String, Box<dyn Scene>>,
    current: Option<String>,
    show_splash: bool,
    splash_duration: f32,
    audio: Option<SharedAudio>,
}

impl SceneManager {
    /// Empty manager; the splash is off
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
            show_splash: false,
            splash_duration: SceneSettings::default().splash_duration,
            audio: None,
        }
    }

    /// Empty manager configured from engine settings
    pub fn with_settings(settings: &SceneSettings) -> Self {
        Self {
            show_splash: settings.show_splash,
            splash_duration: settings.splash_duration,
            ..Self::new()
        }
    }

    /// Share an audio device with every current and future scene
    pub fn set_audio(&mut self, audio: SharedAudio) {
        for scene in self.scenes.values_mut() {
            scene.state_mut().set_audio(Some(audio.clone()));
        }
        self.audio = Some(audio);
    }

    /// Route the next activation through the splash scene
    pub fn set_show_splash(&mut self, show: bool) {
        self.show_splash = show;
    }

    /// Whether the next activation goes through the splash scene
    pub fn show_splash(&self) -> bool {
        self.show_splash
    }

    /// Advance the current scene
    pub fn update(&mut self, delta_time: f32, input: &InputState) {
        if let Some(scene) = self.active_scene_mut() {
            scene.update(delta_time, input);
        }
    }

    /// Apply a pending switch, then render the current scene
    ///
    /// Returns the number of draws issued.
    pub fn render(&mut self, renderer: &mut dyn RenderBackend, viewport: Viewport) -> usize {
        let request = self.active_scene_mut().and_then(|scene| scene.take_switch_request());
        if let Some(next) = request {
            if let Err(err) = self.set_active_scene(&next) {
                log::error!("Scene switch to '{}' failed: {}", next, err);
            }
        }

        self.active_scene_mut().map_or(0, |scene| scene.render(renderer, viewport))
    }

    /// Release the current scene's entities
    pub fn cleanup(&mut self) {
        if let Some(scene) = self.active_scene_mut() {
            scene.cleanup();
        }
    }

    /// Register a scene, replacing any scene with the same name
    ///
    /// The scene is renamed to `name` and given the shared audio device.
    pub fn add_scene(&mut self, name: &str, mut scene: Box<dyn Scene>) {
        scene.state_mut().set_name(name);
        scene.state_mut().set_audio(self.audio.clone());
        if self.scenes.insert(name.to_string(), scene).is_some() {
            log::debug!("Replaced scene '{}'", name);
        }
    }

    /// Create, register and activate an empty scene
    ///
    /// Activation skips the splash.
    pub fn create_scene(&mut self, name: &str) -> Result<(), SceneError> {
        if self.scenes.contains_key(name) {
            log::error!("Scene with name {} already exists", name);
            return Err(SceneError::AlreadyExists(name.to_string()));
        }

        log::info!("Creating scene with name {}", name);
        self.add_scene(name, Box::new(BasicScene::new(name)));
        self.show_splash = false;
        self.set_active_scene(name)
    }

    /// Unregister a scene; if it was current, no scene is current afterwards
    pub fn remove_scene(&mut self, name: &str) -> Result<Box<dyn Scene>, SceneError> {
        let Some(scene) = self.scenes.remove(name) else {
            log::error!("Scene with name {} not found", name);
            return Err(SceneError::NotFound(name.to_string()));
        };

        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        log::info!("Scene with name {} removed", name);
        Ok(scene)
    }

    /// Make `name` the current scene and set it up
    ///
    /// An unknown name leaves the current scene unchanged. While the splash
    /// flag is set, the splash scene is activated instead with `name` as its
    /// follow-up, and the flag is cleared.
    pub fn set_active_scene(&mut self, name: &str) -> Result<(), SceneError> {
        if self.show_splash {
            self.show_splash = false;
            let mut splash = SplashScene::new(self.splash_duration);
            splash.state_mut().set_audio(self.audio.clone());
            splash.setup();
            splash.set_next_scene(name);
            self.scenes.insert(SPLASH_SCENE_NAME.to_string(), Box::new(splash));
            self.current = Some(SPLASH_SCENE_NAME.to_string());
            log::info!("Showing splash before scene '{}'", name);
            return Ok(());
        }

        let Some(scene) = self.scenes.get_mut(name) else {
            log::error!("Scene with name {} not found", name);
            return Err(SceneError::NotFound(name.to_string()));
        };
        scene.setup();
        self.current = Some(name.to_string());
        log::info!("Active scene is now '{}'", name);
        Ok(())
    }

    /// Replace every scene with the ones listed in a project
    ///
    /// Scene names are the file stems. A file that fails to load still
    /// registers an empty scene under its name. Failures are collected and
    /// reported together once every file has been tried.
    pub fn load_scenes_from_project(
        &mut self,
        scene_files: &[String],
        current_scene: &str,
        base_path: &Path,
    ) -> Result<(), SceneError> {
        self.scenes.clear();
        self.current = None;
        let mut failures = Vec::new();

        for file in scene_files {
            let Some(name) = scene_name_from_file(file) else {
                failures.push((file.clone(), SceneError::InvalidFileName(file.clone())));
                continue;
            };

            let mut scene = BasicScene::new(&name);
            let path = base_path.join(file);
            let loaded = SceneSerializer::new(scene.state_mut()).load_from_file(path);
            if let Err(err) = loaded {
                log::error!("Failed to load scene '{}': {}", name, err);
                failures.push((name.clone(), err));
            }
            self.add_scene(&name, Box::new(scene));
        }

        let current = scene_name_from_file(current_scene).unwrap_or_default();
        if let Err(err) = self.set_active_scene(&current) {
            failures.push((current, err));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SceneError::Batch(failures))
        }
    }

    /// Save every registered scene to `<base_path>/<name>.json`
    ///
    /// The splash scene is engine-internal and never saved. Every scene is
    /// attempted; failures are reported together.
    pub fn save_scenes_to_project(&mut self, base_path: &Path) -> Result<(), SceneError> {
        let mut failures = Vec::new();

        for (name, scene) in &mut self.scenes {
            if name == SPLASH_SCENE_NAME {
                continue;
            }
            let path = base_path.join(format!("{name}.json"));
            if let Err(err) = SceneSerializer::new(scene.state_mut()).save_to_file(&path) {
                log::error!("Failed to save scene: {}: {}", name, err);
                failures.push((name.clone(), err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SceneError::Batch(failures))
        }
    }

    /// Whether no scenes are registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of registered scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Registered scene names, sorted
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Name of the current scene
    pub fn active_scene_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The current scene
    pub fn active_scene(&self) -> Option<&(dyn Scene + 'static)> {
        let name = self.current.as_deref()?;
        self.scenes.get(name).map(Box::as_ref)
    }

    /// The current scene, mutably
    pub fn active_scene_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        let name = self.current.as_deref()?;
        self.scenes.get_mut(name).map(Box::as_mut)
    }

    /// A registered scene by name
    pub fn scene(&self, name: &str) -> Option<&(dyn Scene + 'static)> {
        self.scenes.get(name).map(Box::as_ref)
    }

    /// A registered scene by name, mutably
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.get_mut(name).map(Box::as_mut)
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("scenes", &self.scene_names())
            .field("current", &self.current)
            .field("show_splash", &self.show_splash)
            .finish_non_exhaustive()
    }
}

/// Scene name for a scene file: its stem (`scenes/level_1.json` → `level_1`)
fn scene_name_from_file(file: &str) -> Option<String> {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_name_from_file() {
        assert_eq!(scene_name_from_file("scenes/level_1.json").as_deref(), Some("level_1"));
        assert_eq!(scene_name_from_file("menu").as_deref(), Some("menu"));
        assert_eq!(scene_name_from_file(""), None);
    }

    #[test]
    fn test_unknown_scene_leaves_current_unchanged() {
        let mut manager = SceneManager::new();
        manager.add_scene("menu", Box::new(BasicScene::new("menu")));
        manager.set_active_scene("menu").unwrap();

        assert!(matches!(manager.set_active_scene("does-not-exist"), Err(SceneError::NotFound(_))));
        assert_eq!(manager.active_scene_name(), Some("menu"));
    }

    #[test]
    fn test_create_scene_activates_and_rejects_duplicates() {
        let mut manager = SceneManager::with_settings(&SceneSettings::default());
        manager.create_scene("editor").unwrap();

        assert_eq!(manager.active_scene_name(), Some("editor"));
        assert!(!manager.show_splash());
        assert!(matches!(manager.create_scene("editor"), Err(SceneError::AlreadyExists(_))));
    }

    #[test]
    fn test_removing_current_scene_clears_current() {
        let mut manager = SceneManager::new();
        manager.create_scene("temp").unwrap();
        let removed = manager.remove_scene("temp").unwrap();

        assert_eq!(removed.name(), "temp");
        assert_eq!(manager.active_scene_name(), None);
        assert!(manager.is_empty());
        assert!(matches!(manager.remove_scene("temp"), Err(SceneError::NotFound(_))));
    }

    #[test]
    fn test_add_scene_renames_to_key() {
        let mut manager = SceneManager::new();
        manager.add_scene("level", Box::new(BasicScene::new("untitled")));
        assert_eq!(manager.scene("level").map(|scene| scene.name()), Some("level"));
    }
}
