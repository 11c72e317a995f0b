//! # Video Module
//!
//! Frame and clip types plus the FFmpeg-backed compositor that concatenates
//! clip sequences into the final rendered video.

pub mod compositor;
pub mod types;

pub use compositor::{EncodedVideo, VideoCompositor};
pub use types::{Clip, Frame, VideoParams};
