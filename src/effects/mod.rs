//! # Camera Effects Module
//!
//! Procedural camera-shake simulation applied to static image clips to imply
//! movement: a decaying random-walk offset (`ShakeState`) drives a per-frame
//! zoom + translate + crop warp (`ShakeTransform`).
//!
//! Each clip owns a fresh `ShakeTransform`; shake state is never shared
//! between clips.

pub mod shake;

pub use shake::{ShakeState, ShakeTransform, DECAY_FACTOR, ZOOM_FACTOR};
