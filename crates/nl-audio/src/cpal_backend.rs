//! CPAL-based note player.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapProd, HeapRb};

use crate::synth::Voice;
use crate::traits::{AudioError, NotePlayer};

/// Commands crossing from the trainer thread into the audio callback.
enum Command {
    NoteOn(u8),
}

/// Capacity of the command ring. Far more than a learner can trigger
/// between callback runs; overflow drops the note rather than block.
const COMMAND_QUEUE_LEN: usize = 64;

/// Note player on the default CPAL output device.
///
/// Construction is cheap and silent; `initialize` acquires the device
/// and starts the stream. The realtime callback owns the synth voice
/// and drains note-on commands from a lock-free ring.
pub struct CpalPlayer {
    producer: Option<HeapProd<Command>>,
    stream: Option<Stream>,
}

impl CpalPlayer {
    pub fn new() -> Self {
        Self { producer: None, stream: None }
    }
}

impl Default for CpalPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl NotePlayer for CpalPlayer {
    fn initialize(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        let mut config: StreamConfig = config.into();
        // The callback writes the same mono sample to every channel;
        // force stereo so the layout is known.
        config.channels = 2;
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0;

        let rb = HeapRb::<Command>::new(COMMAND_QUEUE_LEN);
        let (producer, mut consumer) = rb.split();
        let mut voice = Voice::new(sample_rate);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Some(command) = consumer.try_pop() {
                        match command {
                            Command::NoteOn(midi_note) => voice.trigger(midi_note),
                        }
                    }
                    for frame in data.chunks_mut(channels) {
                        let sample = voice.next_sample();
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                    }
                },
                |err| log::warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        self.producer = Some(producer);
        self.stream = Some(stream);
        Ok(())
    }

    fn play(&mut self, midi_note: u8) {
        if let Some(producer) = self.producer.as_mut() {
            // Non-blocking push; a full ring drops the note.
            let _ = producer.try_push(Command::NoteOn(midi_note));
        }
    }

    fn dispose(&mut self) {
        self.producer = None;
        self.stream = None;
    }
}
