//! Note player trait and error types.

/// Error type for audio operations.
#[derive(Debug)]
pub enum AudioError {
    /// Failed to initialize audio device
    DeviceInit(String),
    /// Failed to create audio stream
    StreamCreate(String),
    /// Playback error
    Playback(String),
    /// No audio device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::DeviceInit(msg) => write!(f, "Device init error: {}", msg),
            AudioError::StreamCreate(msg) => write!(f, "Stream create error: {}", msg),
            AudioError::Playback(msg) => write!(f, "Playback error: {}", msg),
            AudioError::NoDevice => write!(f, "No audio device available"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A fire-and-forget pitch player: the trainer's audio collaborator.
///
/// Playback failures are never fatal to a session; callers log and
/// continue silent.
pub trait NotePlayer {
    /// Acquire the playback device and start the output stream.
    /// Idempotent: only the first successful call has effect.
    fn initialize(&mut self) -> Result<(), AudioError>;

    /// Trigger a pitch by MIDI note number. Silently ignored before
    /// `initialize` succeeds or after `dispose`.
    fn play(&mut self, midi_note: u8);

    /// Release playback resources. Safe to call from a teardown path
    /// and safe to call more than once.
    fn dispose(&mut self);
}

impl NotePlayer for Box<dyn NotePlayer> {
    fn initialize(&mut self) -> Result<(), AudioError> {
        (**self).initialize()
    }

    fn play(&mut self, midi_note: u8) {
        (**self).play(midi_note)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// A player that plays nothing, for tests and audio-disabled levels.
/// Records the pitches it was asked to play.
#[derive(Default)]
pub struct NullPlayer {
    pub played: Vec<u8>,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotePlayer for NullPlayer {
    fn initialize(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, midi_note: u8) {
        self.played.push(midi_note);
    }

    fn dispose(&mut self) {}
}
