//! # Story Document Module
//!
//! Data model and loader for the story JSON document that drives the
//! pipeline: title, actors, and ordered scenes with narration and dialogue.

pub mod loader;
pub mod types;

pub use loader::StoryLoader;
pub use types::{Actor, Scene, SceneActor, Story, VoiceType};
