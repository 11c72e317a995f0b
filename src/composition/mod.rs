//! # Composition Module
//!
//! The scene assembler builds each scene's ordered clip sequence; the
//! composition engine runs the whole stitching pipeline from story document
//! to rendered video.

pub mod assembler;
pub mod engine;

pub use assembler::SceneAssembler;
pub use engine::CompositionEngine;
