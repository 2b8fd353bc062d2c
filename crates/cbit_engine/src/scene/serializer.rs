//! # Scene Serializer
//!
//! Converts one scene's world to and from its JSON document. Loads validate
//! the whole document before the world is touched, so a failed load leaves
//! the scene as it was. Saves build the full text in memory, write it to a
//! sibling temp file and rename it into place.

use std::fs;
use std::path::{Path, PathBuf};

use super::{SceneDocument, SceneError, SceneState};

/// Save/load front end bound to one scene
pub struct SceneSerializer<'a> {
    scene: &'a mut SceneState,
}

impl<'a> SceneSerializer<'a> {
    /// Bind to a scene
    pub fn new(scene: &'a mut SceneState) -> Self {
        Self { scene }
    }

    /// Snapshot the scene as a document
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument::capture(self.scene.name(), self.scene.world())
    }

    /// Serialize the scene to pretty JSON
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        self.to_document().to_json_string()
    }

    /// Write the scene to `path`
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SceneError::EmptyPath);
        }

        let json = self.to_json_string()?;
        let temp = temp_path_for(path);
        if let Err(source) = fs::write(&temp, json) {
            let _ = fs::remove_file(&temp);
            return Err(SceneError::io(&temp, source));
        }
        if let Err(source) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(SceneError::io(path, source));
        }

        log::info!("Saved scene '{}' to {}", self.scene.name(), path.display());
        Ok(())
    }

    /// Replace the scene's world with the entities in `json`
    ///
    /// Returns the number of entities loaded.
    pub fn load_from_str(&mut self, json: &str) -> Result<usize, SceneError> {
        let document = SceneDocument::parse(json)?;
        self.load_document(document)
    }

    /// Replace the scene's world with the contents of a scene file
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, SceneError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SceneError::EmptyPath);
        }

        let json = fs::read_to_string(path).map_err(|source| SceneError::io(path, source))?;
        let loaded = self.load_from_str(&json)?;
        log::info!(
            "Loaded {} entities into scene '{}' from {}",
            loaded,
            self.scene.name(),
            path.display()
        );
        Ok(loaded)
    }

    /// Replace the scene's world with an already parsed document
    ///
    /// The document also becomes the content the scene rebuilds on setup.
    pub fn load_document(&mut self, document: SceneDocument) -> Result<usize, SceneError> {
        let world = self.scene.world_mut();
        world.cleanup();
        let loaded = document.spawn_into(world)?;
        self.scene.set_content(Some(document));
        Ok(loaded)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CubeComponent, PointLightComponent, TransformComponent};
    use crate::foundation::math::{Vec3, Vec4};

    fn populated(name: &str) -> SceneState {
        let mut scene = SceneState::new(name);
        let mut object = scene.world_mut().create_game_object("Crate");
        object
            .add_component(TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        object.add_component(CubeComponent::new(Vec4::new(0.5, 0.25, 1.0, 1.0))).unwrap();
        scene
    }

    #[test]
    fn test_failed_load_keeps_existing_world() {
        let mut scene = populated("keep");
        let result = SceneSerializer::new(&mut scene).load_from_str(r#"{ "name": "broken" }"#);

        assert!(result.is_err());
        assert_eq!(scene.world().entity_count(), 1);
        assert!(scene.content().is_none());
    }

    #[test]
    fn test_load_replaces_world_and_records_content() {
        let mut source = populated("source");
        let json = SceneSerializer::new(&mut source).to_json_string().unwrap();

        let mut target = SceneState::new("target");
        target.world_mut().create_game_object("Stale");
        let loaded = SceneSerializer::new(&mut target).load_from_str(&json).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(target.world().entity_count(), 1);
        assert!(target.world().find_by_tag("Stale").is_none());
        assert_eq!(target.content().map(|doc| doc.entities.len()), Some(1));
    }

    #[test]
    fn test_empty_paths_are_rejected() {
        let mut scene = SceneState::new("empty");
        let mut serializer = SceneSerializer::new(&mut scene);
        assert!(matches!(serializer.save_to_file(""), Err(SceneError::EmptyPath)));
        assert!(matches!(serializer.load_from_file(""), Err(SceneError::EmptyPath)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = SceneState::new("missing");
        let result = SceneSerializer::new(&mut scene).load_from_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(SceneError::Io { .. })));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let mut scene = populated("level");
        SceneSerializer::new(&mut scene).save_to_file(&path).unwrap();

        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_non_finite_component_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lit.json");
        let mut scene = populated("lit");
        {
            let mut lamp = scene.world_mut().create_game_object("Lamp");
            lamp.add_component(PointLightComponent {
                quadratic: f32::INFINITY,
                ..Default::default()
            })
            .unwrap();
        }

        let result = SceneSerializer::new(&mut scene).save_to_file(&path);
        assert!(matches!(result, Err(SceneError::Malformed(_))));
        assert!(!path.exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_nan_transform_is_not_serialized() {
        let mut scene = populated("nan");
        let crate_entity = scene.world().find_by_tag("Crate").unwrap();
        scene
            .world_mut()
            .registry_mut()
            .get_mut::<TransformComponent>(crate_entity)
            .unwrap()
            .scale
            .y = f32::NAN;

        let result = SceneSerializer::new(&mut scene).to_json_string();
        assert!(matches!(
            result,
            Err(SceneError::Malformed(message)) if message.contains("transform.scale")
        ));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("occupied.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), "x").unwrap();

        let mut scene = populated("occupied");
        let result = SceneSerializer::new(&mut scene).save_to_file(&path);
        assert!(matches!(result, Err(SceneError::Io { .. })));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("level.json");
        let mut scene = populated("level");
        assert!(matches!(
            SceneSerializer::new(&mut scene).save_to_file(&path),
            Err(SceneError::Io { .. })
        ));
        assert!(!temp_path_for(&path).exists());
    }
}
