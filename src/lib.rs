//! # Story-Compositor
//!
//! Stitch generated story assets into a narrated video.
//!
//! Given a story document (title, actors, scenes with narration and
//! dialogue) and a directory of pre-generated assets (scene images, actor
//! portraits, TTS audio), this library sequences everything into one timed
//! video: each image is shown for exactly as long as its audio runs, with an
//! optional procedural camera-shake effect, and missing assets degrade the
//! output instead of aborting it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use story_compositor::{composition::CompositionEngine, config::Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut config = Config::default();
//! config.shake.enabled = true;
//!
//! let engine = CompositionEngine::new(config);
//! let video = engine
//!     .compose("story.json", "organized_assets", "final_output")
//!     .await?;
//! println!("Rendered {:.1}s video at {:?}", video.duration, video.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`story`] - Story document model, loading, and validation
//! - [`assets`] - Asset resolution by naming convention
//! - [`audio`] - Audio decoding and duration resolution with silent fallback
//! - [`effects`] - Procedural camera-shake state and frame transform
//! - [`video`] - Frame/clip types and the FFmpeg-backed compositor
//! - [`composition`] - Scene assembly and the pipeline engine
//! - [`config`] - Configuration management

pub mod assets;
pub mod audio;
pub mod composition;
pub mod config;
pub mod effects;
pub mod error;
pub mod story;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    assets::AssetResolver,
    composition::CompositionEngine,
    config::Config,
    error::{CompositorError, Result},
    story::Story,
};
