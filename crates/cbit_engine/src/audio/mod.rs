//! Audio hooks
//!
//! Scenes only need background music: start a track, stop it, ask whether
//! something is playing. Devices implement [`AudioDevice`] and are shared by
//! every scene through a [`SharedAudio`] handle. [`SilentAudio`] tracks state
//! without producing sound and is the default for headless runs.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a playing music track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicHandle(pub u64);

/// Audio errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The track could not be found or decoded
    #[error("Audio track not found: {0}")]
    TrackNotFound(String),

    /// Backend failure
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// No audio device is attached
    #[error("No audio device attached")]
    NoDevice,
}

/// Music playback device
pub trait AudioDevice {
    /// Start `track` as background music, replacing whatever is playing
    fn play_music(&mut self, track: &str) -> Result<MusicHandle, AudioError>;

    /// Stop background music; a no-op when nothing is playing
    fn stop_music(&mut self);

    /// Whether background music is playing
    fn is_music_playing(&self) -> bool;

    /// Fire a one-shot sound effect
    fn play_sound(&mut self, sound: &str) -> Result<(), AudioError>;
}

/// Audio device shared between scenes
///
/// Single-threaded like the rest of the scene layer.
pub type SharedAudio = Rc<RefCell<dyn AudioDevice>>;

/// Device that records playback requests without producing sound
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: Option<(MusicHandle, String)>,
    next_handle: u64,
    history: Vec<String>,
}

impl SilentAudio {
    /// Create a silent device
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a new silent device in a [`SharedAudio`] handle
    pub fn shared() -> SharedAudio {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Track currently "playing"
    pub fn current_track(&self) -> Option<&str> {
        self.playing.as_ref().map(|(_, track)| track.as_str())
    }

    /// Every track ever started, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl AudioDevice for SilentAudio {
    fn play_music(&mut self, track: &str) -> Result<MusicHandle, AudioError> {
        if track.is_empty() {
            return Err(AudioError::TrackNotFound(track.to_string()));
        }
        self.next_handle += 1;
        let handle = MusicHandle(self.next_handle);
        log::debug!("Playing music '{}' as {:?}", track, handle);
        self.playing = Some((handle, track.to_string()));
        self.history.push(track.to_string());
        Ok(handle)
    }

    fn stop_music(&mut self) {
        if let Some((handle, track)) = self.playing.take() {
            log::debug!("Stopped music '{}' ({:?})", track, handle);
        }
    }

    fn is_music_playing(&self) -> bool {
        self.playing.is_some()
    }

    fn play_sound(&mut self, sound: &str) -> Result<(), AudioError> {
        if sound.is_empty() {
            return Err(AudioError::TrackNotFound(sound.to_string()));
        }
        log::trace!("Sound effect '{}'", sound);
        Ok(())
    }
}
