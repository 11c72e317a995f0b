use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AudioError, Result};

/// Name of the generated silent fallback asset under the asset root
const SILENT_AUDIO_FILE: &str = "silence.wav";

/// Sample rate used when generating the silent fallback asset
const SILENT_AUDIO_SAMPLE_RATE: u32 = 44100;

/// Resolves story assets by naming convention inside one asset root.
///
/// The pipeline stages that generate TTS audio and images write their output
/// using these exact file names, so the convention must stay bit-exact:
///
/// - scene image:      `scene_{NN}_description.png`
/// - narration audio:  `scene_{NN}_narration.mp3`
/// - actor portrait:   `scene_{NN}_{actor}_portrait.png`
/// - dialogue audio:   `scene_{NN}_{actor}.mp3`
///
/// where `{NN}` is the scene number zero-padded to two digits and `{actor}`
/// is the actor name lowercased with spaces replaced by underscores.
///
/// The resolver is an explicit context object passed into each component, so
/// tests can point it at isolated temporary roots.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert an actor name to its file-name form
    pub fn actor_slug(name: &str) -> String {
        name.replace(' ', "_").to_lowercase()
    }

    /// Path of the scene description image
    pub fn scene_image(&self, scene_number: u32) -> PathBuf {
        self.root
            .join(format!("scene_{:02}_description.png", scene_number))
    }

    /// Path of the scene narration audio
    pub fn narration_audio(&self, scene_number: u32) -> PathBuf {
        self.root
            .join(format!("scene_{:02}_narration.mp3", scene_number))
    }

    /// Path of an actor's portrait image for a given scene
    pub fn actor_portrait(&self, scene_number: u32, actor_name: &str) -> PathBuf {
        self.root.join(format!(
            "scene_{:02}_{}_portrait.png",
            scene_number,
            Self::actor_slug(actor_name)
        ))
    }

    /// Path of an actor's dialogue audio for a given scene
    pub fn actor_dialogue(&self, scene_number: u32, actor_name: &str) -> PathBuf {
        self.root.join(format!(
            "scene_{:02}_{}.mp3",
            scene_number,
            Self::actor_slug(actor_name)
        ))
    }

    /// Path of the silent fallback audio asset
    pub fn silent_audio(&self) -> PathBuf {
        self.root.join(SILENT_AUDIO_FILE)
    }

    /// Create the silent fallback asset if it does not exist yet.
    ///
    /// Returns the path of the (possibly pre-existing) file. The file is a
    /// mono WAV of exactly `duration` seconds of silence.
    pub fn ensure_silent_audio(&self, duration: f64) -> Result<PathBuf> {
        let path = self.silent_audio();
        if path.exists() {
            return Ok(path);
        }

        info!("Creating silent fallback audio at {:?}", path);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SILENT_AUDIO_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec).map_err(|_| {
            AudioError::WriteFailed {
                path: path.display().to_string(),
            }
        })?;

        let sample_count = (duration * SILENT_AUDIO_SAMPLE_RATE as f64).round() as usize;
        for _ in 0..sample_count {
            writer.write_sample(0i16).map_err(|_| AudioError::WriteFailed {
                path: path.display().to_string(),
            })?;
        }

        writer.finalize().map_err(|_| AudioError::WriteFailed {
            path: path.display().to_string(),
        })?;

        Ok(path)
    }
}
