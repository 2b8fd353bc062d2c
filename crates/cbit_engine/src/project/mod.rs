//! Project descriptor
//!
//! A project is a folder holding `project.json` plus `scenes/`, `assets/`
//! and `scripts/` directories. The descriptor lists scene files relative to
//! the project folder and names the scene to open first.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{SceneDocument, SceneError, SceneManager};

/// File name of the descriptor inside a project folder
pub const PROJECT_FILE_NAME: &str = "project.json";

/// Scene every new project starts with, relative to the project folder
pub const DEFAULT_SCENE_FILE: &str = "scenes/default_scene.json";

const PROJECT_SUBDIRECTORIES: [&str; 3] = ["scenes", "assets", "scripts"];
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Project descriptor errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Descriptor is not valid JSON
    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),

    /// The default scene could not be written
    #[error("Failed to write default scene: {0}")]
    Scene(#[from] SceneError),
}

impl ProjectError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// On-disk project descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Display name
    pub name: String,
    /// Persistent identifier
    pub id: String,
    /// Author, free text
    pub author: String,
    /// Project version, free text
    pub version: String,
    /// Creation timestamp, `YYYY-MM-DD HH:MM:SS`
    pub created_date: String,
    /// Last save timestamp, `YYYY-MM-DD HH:MM:SS`
    pub modified_date: String,
    /// Always `"project"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Project folder; scene files are relative to it
    pub path: String,
    /// Scene file to open first
    pub current_scene: String,
    /// Every scene file in the project
    pub scene_files: Vec<String>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            author: String::new(),
            version: String::new(),
            created_date: String::new(),
            modified_date: String::new(),
            kind: "project".to_string(),
            path: String::new(),
            current_scene: String::new(),
            scene_files: Vec::new(),
        }
    }
}

impl Project {
    /// Create `<folder>/<name>` with the standard layout and save its descriptor
    pub fn create(folder: impl AsRef<Path>, name: &str) -> Result<Self, ProjectError> {
        let root = folder.as_ref().join(name);
        for subdirectory in PROJECT_SUBDIRECTORIES {
            let dir = root.join(subdirectory);
            fs::create_dir_all(&dir).map_err(|source| ProjectError::io(&dir, source))?;
        }

        let default_scene = root.join(DEFAULT_SCENE_FILE);
        let json = SceneDocument::new("default_scene").to_json_string()?;
        fs::write(&default_scene, json).map_err(|source| ProjectError::io(&default_scene, source))?;

        let now = timestamp();
        let mut project = Self {
            name: name.to_string(),
            id: uuid::Uuid::new_v4().to_string(),
            version: "1.0".to_string(),
            created_date: now.clone(),
            modified_date: now,
            path: root.to_string_lossy().into_owned(),
            current_scene: DEFAULT_SCENE_FILE.to_string(),
            scene_files: vec![DEFAULT_SCENE_FILE.to_string()],
            ..Self::default()
        };
        project.save(root.join(PROJECT_FILE_NAME))?;

        log::info!("Created project '{}' at {}", name, root.display());
        Ok(project)
    }

    /// Write the descriptor, refreshing `modified_date`
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        self.modified_date = timestamp();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ProjectError::io(path, source))?;
        log::debug!("Saved project '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Read a descriptor; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ProjectError::io(path, source))?;
        let project: Self = serde_json::from_str(&json)?;
        log::info!("Loaded project '{}' from {}", project.name, path.display());
        Ok(project)
    }

    /// Project folder
    pub fn base_path(&self) -> &Path {
        Path::new(&self.path)
    }
}

impl SceneManager {
    /// Replace every scene with the ones listed in `project`
    pub fn load_project(&mut self, project: &Project) -> Result<(), SceneError> {
        self.load_scenes_from_project(
            &project.scene_files,
            &project.current_scene,
            project.base_path(),
        )
    }
}

fn timestamp() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}
