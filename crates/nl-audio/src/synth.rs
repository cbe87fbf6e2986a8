//! A single plucked-tone voice for note playback.

use std::f32::consts::TAU;

/// Amplitude below which the voice stops producing samples.
const SILENCE_FLOOR: f32 = 0.0005;

/// Initial amplitude of a triggered note.
const TRIGGER_AMP: f32 = 0.6;

/// Seconds for the envelope to fall to roughly 1/1000 of its peak.
const DECAY_SECONDS: f32 = 1.2;

/// Frequency in Hz of a MIDI note number (A4 = 69 = 440 Hz, 12-TET).
pub fn midi_to_hz(midi_note: u8) -> f32 {
    440.0 * ((midi_note as f32 - 69.0) / 12.0).exp2()
}

/// A sine voice with an exponential decay envelope. Monophonic:
/// retriggering replaces the current note, which is exactly the
/// trainer's one-note-at-a-time behavior.
pub struct Voice {
    phase: f32,
    phase_inc: f32,
    amp: f32,
    decay: f32,
    sample_rate: u32,
}

impl Voice {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            amp: 0.0,
            decay: 1.0,
            sample_rate,
        }
    }

    /// Start a note, replacing whatever is sounding.
    pub fn trigger(&mut self, midi_note: u8) {
        self.phase = 0.0;
        self.phase_inc = midi_to_hz(midi_note) / self.sample_rate as f32;
        self.amp = TRIGGER_AMP;
        // amp * decay^(rate * DECAY_SECONDS) == amp / 1000
        let samples = self.sample_rate as f32 * DECAY_SECONDS;
        self.decay = (-(1000f32.ln()) / samples).exp();
    }

    /// True while the voice still produces audible output.
    pub fn is_sounding(&self) -> bool {
        self.amp > SILENCE_FLOOR
    }

    /// Render the next mono sample.
    pub fn next_sample(&mut self) -> f32 {
        if !self.is_sounding() {
            return 0.0;
        }
        let sample = (self.phase * TAU).sin() * self.amp;
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.amp *= self.decay;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_440_hz() {
        assert!((midi_to_hz(69) - 440.0).abs() < 1e-3);
    }

    #[test]
    fn octave_doubles_frequency() {
        assert!((midi_to_hz(81) - 880.0).abs() < 1e-2);
        assert!((midi_to_hz(57) - 220.0).abs() < 1e-2);
    }

    #[test]
    fn untriggered_voice_is_silent() {
        let mut voice = Voice::new(44_100);
        assert!(!voice.is_sounding());
        assert_eq!(voice.next_sample(), 0.0);
    }

    #[test]
    fn triggered_voice_sounds_then_decays_out() {
        let mut voice = Voice::new(44_100);
        voice.trigger(60);
        assert!(voice.is_sounding());

        let mut peak = 0f32;
        for _ in 0..44_100 {
            peak = peak.max(voice.next_sample().abs());
        }
        assert!(peak > 0.1, "peak {}", peak);

        // Well past the decay window the voice has gone quiet.
        for _ in 0..(3 * 44_100) {
            voice.next_sample();
        }
        assert!(!voice.is_sounding());
    }

    #[test]
    fn retrigger_replaces_the_current_note() {
        let mut voice = Voice::new(44_100);
        voice.trigger(60);
        for _ in 0..10_000 {
            voice.next_sample();
        }
        let faded = voice.amp;
        voice.trigger(72);
        assert!(voice.amp > faded);
    }

    #[test]
    fn samples_stay_within_unit_range() {
        let mut voice = Voice::new(44_100);
        voice.trigger(108);
        for _ in 0..10_000 {
            let s = voice.next_sample();
            assert!((-1.0..=1.0).contains(&s));
        }
    }
}
