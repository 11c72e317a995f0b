use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::assets::AssetResolver;
use crate::audio::loader::AudioLoader;
use crate::audio::types::AudioData;
use crate::error::Result;

/// Why an audio asset was replaced by the silent fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The file does not exist
    Missing,
    /// The file exists but could not be decoded
    Undecodable,
}

/// A resolved audio asset: either decoded from disk or the silent fallback
#[derive(Debug, Clone)]
pub struct ResolvedAudio {
    pub audio: AudioData,
    pub fallback: Option<FallbackReason>,
}

impl ResolvedAudio {
    pub fn duration(&self) -> f64 {
        self.audio.duration
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Determines each clip's duration from its audio asset.
///
/// The resolver never fails: a missing or undecodable file yields silent
/// audio of exactly the fallback duration, with the reason recorded so the
/// caller can report which parts of the video are degraded. The policy is
/// identical for narration and dialogue audio.
pub struct DurationResolver {
    silent_path: PathBuf,
    fallback_duration: f64,
}

impl DurationResolver {
    /// Create a resolver, generating the on-disk silent asset if absent
    pub fn new(assets: &AssetResolver, fallback_duration: f64) -> Result<Self> {
        let silent_path = assets.ensure_silent_audio(fallback_duration)?;
        Ok(Self {
            silent_path,
            fallback_duration,
        })
    }

    /// The fixed duration substituted when audio is unavailable
    pub fn fallback_duration(&self) -> f64 {
        self.fallback_duration
    }

    /// Resolve an expected audio path to playable audio and its duration.
    ///
    /// A `.wav` sibling is accepted when the expected `.mp3` is absent, since
    /// locally generated assets (the silent fallback included) are WAV.
    pub fn resolve(&self, path: &Path) -> ResolvedAudio {
        let candidate = if path.exists() {
            path.to_path_buf()
        } else {
            let sibling = path.with_extension("wav");
            if sibling.exists() {
                sibling
            } else {
                warn!("Audio asset not found: {:?}, using silent fallback", path);
                return self.fallback(FallbackReason::Missing);
            }
        };

        match AudioLoader::load(&candidate) {
            Ok(audio) => {
                debug!("Resolved {:?}: {:.2}s", candidate, audio.duration);
                ResolvedAudio {
                    audio,
                    fallback: None,
                }
            }
            Err(e) => {
                warn!(
                    "Audio asset unreadable: {:?} ({}), using silent fallback",
                    candidate, e
                );
                self.fallback(FallbackReason::Undecodable)
            }
        }
    }

    /// Build the silent fallback, truncated or extended to the fixed duration
    fn fallback(&self, reason: FallbackReason) -> ResolvedAudio {
        let audio = match AudioLoader::load(&self.silent_path) {
            Ok(audio) => audio.clipped_to(self.fallback_duration),
            // The on-disk asset can disappear between runs; synthesize instead
            Err(_) => AudioData::silent(self.fallback_duration, 44100),
        };

        ResolvedAudio {
            audio,
            fallback: Some(reason),
        }
    }
}
