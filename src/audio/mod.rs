//! # Audio Module
//!
//! Decodes narration and dialogue audio assets and resolves each clip's
//! duration from them, with a silent fallback of fixed duration when an
//! asset is missing or unreadable.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use story_compositor::assets::AssetResolver;
//! use story_compositor::audio::DurationResolver;
//!
//! # fn main() -> anyhow::Result<()> {
//! let assets = AssetResolver::new("organized_assets");
//! let durations = DurationResolver::new(&assets, 5.0)?;
//!
//! let resolved = durations.resolve(&assets.narration_audio(1));
//! println!("Scene 1 runs {:.2}s", resolved.duration());
//! # Ok(())
//! # }
//! ```

pub mod duration;
pub mod loader;
pub mod types;

pub use duration::{DurationResolver, FallbackReason, ResolvedAudio};
pub use loader::AudioLoader;
pub use types::AudioData;
