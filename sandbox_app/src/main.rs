//! Headless sandbox
//!
//! Drives the engine for a scripted run: splash, the play scene with some
//! simulated input, then a hand-over to the credits scene. Afterwards every
//! scene is saved into a fresh project which is reopened to check that the
//! scenes come back.
//!
//! Usage: `sandbox [config.toml|config.ron]`

mod play_scene;

use std::path::PathBuf;

use cbit_engine::config::{Config, ConfigError, EngineConfig};
use cbit_engine::foundation::logging;
use cbit_engine::input::KeyCode;
use cbit_engine::project::{Project, ProjectError, PROJECT_FILE_NAME};
use cbit_engine::render::RecordingRenderer;
use cbit_engine::scene::{BasicScene, SceneError};
use cbit_engine::{Engine, EngineError, EngineEvent};
use thiserror::Error;

use play_scene::{PlayScene, CREDITS_SCENE};

const DEFAULT_CONFIG_PATH: &str = "sandbox.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAME_LIMIT: u64 = 600;

#[derive(Debug, Error)]
enum SandboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Input the script feeds in at a given frame
fn scripted_events(frame: u64) -> Vec<EngineEvent> {
    let key = |key, pressed| EngineEvent::KeyInput { key, pressed };
    match frame {
        // Skip the splash
        5 => vec![key(KeyCode::Escape, true)],
        6 => vec![key(KeyCode::Escape, false)],
        30 => vec![key(KeyCode::Left, true), key(KeyCode::F3, true)],
        31 => vec![key(KeyCode::F3, false)],
        90 => vec![key(KeyCode::Left, false), key(KeyCode::Up, true)],
        120 => vec![key(KeyCode::Up, false), key(KeyCode::Space, true)],
        121 => vec![key(KeyCode::Space, false)],
        180 => vec![EngineEvent::WindowResized { width: 1920, height: 1080 }],
        240 => vec![key(KeyCode::Enter, true)],
        241 => vec![key(KeyCode::Enter, false)],
        300 => vec![EngineEvent::WindowCloseRequested],
        _ => Vec::new(),
    }
}

fn run() -> Result<(), SandboxError> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = EngineConfig::load_or_default(&config_path)?;
    logging::init_with_level(config.logging.level_filter());

    let start_scene = config.scenes.start_scene.clone();
    let mut engine = Engine::new(config, RecordingRenderer::new());
    engine.set_audio(cbit_engine::audio::SilentAudio::shared());
    engine
        .scene_manager_mut()
        .add_scene(&start_scene, Box::new(PlayScene::new(&start_scene)));
    engine
        .scene_manager_mut()
        .add_scene(CREDITS_SCENE, Box::new(BasicScene::new(CREDITS_SCENE)));
    engine.start()?;

    let mut total_draws = 0;
    while engine.is_running() && engine.frame_count() < FRAME_LIMIT {
        for event in scripted_events(engine.frame_count()) {
            engine.handle_event(event);
        }
        total_draws += engine.frame(FRAME_TIME);
    }
    log::info!(
        "Ran {} frames, {} draws, ended in scene '{}'",
        engine.frame_count(),
        total_draws,
        engine.scene_manager().active_scene_name().unwrap_or("<none>")
    );

    let workspace = std::env::temp_dir().join(format!("cbit_sandbox_{}", std::process::id()));
    let mut project = Project::create(&workspace, "sandbox")?;
    let scenes_dir = project.base_path().join("scenes");
    engine.scene_manager_mut().save_scenes_to_project(&scenes_dir)?;

    project.scene_files = engine
        .scene_manager()
        .scene_names()
        .into_iter()
        .map(|name| format!("scenes/{name}.json"))
        .collect();
    project.current_scene = format!("scenes/{start_scene}.json");
    let project_file = project.base_path().join(PROJECT_FILE_NAME);
    project.save(&project_file)?;

    let reopened = Project::load(&project_file)?;
    engine.open_project(&reopened)?;
    log::info!(
        "Reopened project '{}' with scenes {:?}",
        reopened.name,
        engine.scene_manager().scene_names()
    );

    engine.shutdown();
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log::error!("Sandbox failed: {}", err);
        eprintln!("sandbox: {err}");
        std::process::exit(1);
    }
}
