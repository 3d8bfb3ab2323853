//! Synthesized notification chime.
//!
//! The chime is a "happy" double beep: two overlapping sine tones, each with
//! a short linear attack to a fixed peak and a linear release to silence at
//! the tone's end. Samples are generated on the fly, so no audio data ships
//! with the binary.

use std::f32::consts::TAU;
use std::time::Duration;

use rodio::Source;

/// Sample rate of the generated chime.
pub const CHIME_SAMPLE_RATE: u32 = 44_100;

/// Peak gain of each tone.
const PEAK_GAIN: f32 = 0.2;

/// Attack time from silence to peak, in seconds.
const ATTACK_SECS: f32 = 0.05;

/// One sine tone within the chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f32,
    /// Offset from the start of the chime, in seconds
    pub start: f32,
    /// Tone length, in seconds
    pub duration: f32,
}

impl Tone {
    /// Envelope gain at chime time `t` (seconds).
    pub fn gain_at(&self, t: f32) -> f32 {
        let local = t - self.start;
        if local < 0.0 || local >= self.duration {
            return 0.0;
        }
        if local < ATTACK_SECS {
            PEAK_GAIN * local / ATTACK_SECS
        } else {
            PEAK_GAIN * (self.duration - local) / (self.duration - ATTACK_SECS)
        }
    }

    /// Sample value at chime time `t` (seconds).
    pub fn sample_at(&self, t: f32) -> f32 {
        let gain = self.gain_at(t);
        if gain == 0.0 {
            return 0.0;
        }
        gain * (TAU * self.frequency * (t - self.start)).sin()
    }

    /// Time at which the tone falls silent.
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// A5 then C6, overlapping by a tenth of a second.
pub const DOUBLE_BEEP: [Tone; 2] = [
    Tone {
        frequency: 880.0,
        start: 0.0,
        duration: 0.3,
    },
    Tone {
        frequency: 1046.5,
        start: 0.2,
        duration: 0.4,
    },
];

/// Mixed sample of all `tones` at time `t`.
pub fn chime_sample(tones: &[Tone], t: f32) -> f32 {
    tones.iter().map(|tone| tone.sample_at(t)).sum()
}

/// Length of the chime in seconds.
pub fn chime_length(tones: &[Tone]) -> f32 {
    tones.iter().map(Tone::end).fold(0.0, f32::max)
}

/// Mono rodio source that renders a set of tones.
#[derive(Debug, Clone)]
pub struct ChimeSource {
    tones: Vec<Tone>,
    index: u32,
    total_samples: u32,
}

impl ChimeSource {
    /// Creates a source for the given tones.
    pub fn new(tones: &[Tone]) -> Self {
        let total_samples = (chime_length(tones) * CHIME_SAMPLE_RATE as f32).round() as u32;
        Self {
            tones: tones.to_vec(),
            index: 0,
            total_samples,
        }
    }

    /// Creates the default double beep.
    pub fn double_beep() -> Self {
        Self::new(&DOUBLE_BEEP)
    }

    /// Total number of samples this source yields.
    pub fn total_samples(&self) -> u32 {
        self.total_samples
    }
}

impl Iterator for ChimeSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.total_samples {
            return None;
        }
        let t = self.index as f32 / CHIME_SAMPLE_RATE as f32;
        self.index += 1;
        Some(chime_sample(&self.tones, t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_samples.saturating_sub(self.index) as usize;
        (left, Some(left))
    }
}

impl Source for ChimeSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.index) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        CHIME_SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(chime_length(&self.tones)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_envelope_shape() {
        let tone = DOUBLE_BEEP[0];
        assert_eq!(tone.gain_at(0.0), 0.0);
        assert!((tone.gain_at(0.025) - 0.1).abs() < EPSILON);
        assert!((tone.gain_at(0.05) - PEAK_GAIN).abs() < EPSILON);
        assert!(tone.gain_at(0.2) < PEAK_GAIN);
        assert_eq!(tone.gain_at(0.3), 0.0);
        assert_eq!(tone.gain_at(-0.1), 0.0);
    }

    #[test]
    fn test_second_tone_is_delayed() {
        let tone = DOUBLE_BEEP[1];
        assert_eq!(tone.gain_at(0.1), 0.0);
        assert!(tone.gain_at(0.25) > 0.0);
        assert!((tone.end() - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_chime_length() {
        assert!((chime_length(&DOUBLE_BEEP) - 0.6).abs() < EPSILON);
        assert_eq!(chime_length(&[]), 0.0);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let source = ChimeSource::double_beep();
        let max = source.map(f32::abs).fold(0.0, f32::max);
        assert!(max > 0.0);
        assert!(max <= 2.0 * PEAK_GAIN + EPSILON);
    }

    #[test]
    fn test_source_metadata() {
        let source = ChimeSource::double_beep();
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), CHIME_SAMPLE_RATE);
        assert_eq!(source.total_samples(), 26_460);
        assert_eq!(source.clone().count(), 26_460);
    }

    #[test]
    fn test_source_is_silent_at_start() {
        let mut source = ChimeSource::double_beep();
        assert_eq!(source.next(), Some(0.0));
    }
}
