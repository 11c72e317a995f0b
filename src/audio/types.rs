use std::path::PathBuf;

/// Decoded audio data as interleaved f32 samples
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples, -1.0 to 1.0
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels
    pub channels: u16,

    /// Duration in seconds, derived from the sample count
    pub duration: f64,

    /// Path the audio was decoded from, if any
    pub file_path: Option<PathBuf>,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let duration = samples.len() as f64 / (sample_rate as u64 * channels as u64) as f64;
        Self {
            samples,
            sample_rate,
            channels,
            duration,
            file_path: None,
        }
    }

    /// Create silent mono audio of the given duration
    pub fn silent(duration: f64, sample_rate: u32) -> Self {
        let sample_count = (duration * sample_rate as f64).round() as usize;
        Self::new(vec![0.0; sample_count], sample_rate, 1)
    }

    /// Downmix to mono by averaging channels
    pub fn mono(&self) -> Vec<f32> {
        if self.channels <= 1 {
            return self.samples.clone();
        }

        let channels = self.channels as usize;
        self.samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    /// Downmix to mono and linearly resample to the target rate
    pub fn resampled_mono(&self, target_rate: u32) -> Vec<f32> {
        let mono = self.mono();
        if self.sample_rate == target_rate || mono.is_empty() {
            return mono;
        }

        let ratio = self.sample_rate as f64 / target_rate as f64;
        let out_len = (mono.len() as f64 / ratio).round() as usize;

        (0..out_len)
            .map(|i| {
                let src = i as f64 * ratio;
                let idx = src as usize;
                let frac = (src - idx as f64) as f32;
                let a = mono[idx.min(mono.len() - 1)];
                let b = mono[(idx + 1).min(mono.len() - 1)];
                a + (b - a) * frac
            })
            .collect()
    }

    /// Truncate or zero-extend to exactly the given duration
    pub fn clipped_to(&self, duration: f64) -> AudioData {
        let target =
            (duration * self.sample_rate as f64).round() as usize * self.channels as usize;
        let mut samples = self.samples.clone();
        samples.resize(target, 0.0);

        let mut clipped = AudioData::new(samples, self.sample_rate, self.channels);
        clipped.file_path = self.file_path.clone();
        clipped
    }
}
