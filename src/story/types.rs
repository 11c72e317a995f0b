use serde::{Deserialize, Serialize};

/// A complete story document, loaded once per pipeline run.
///
/// Field names mirror the JSON keys produced by the story generator, so the
/// document round-trips without renaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub story_title: String,
    pub author: String,
    pub genre: String,
    pub style: String,
    pub actors: Vec<Actor>,
    pub scenes: Vec<Scene>,
}

impl Story {
    /// Look up an actor by name.
    ///
    /// Resolution is always by exact name match, consistent with how portrait
    /// file names are resolved.
    pub fn actor_by_name(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name == name)
    }
}

/// A named character with a visual description and a voice category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub description: String,
    pub voice_type: VoiceType,
}

/// Voice category for TTS synthesis (external to this crate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceType {
    Male,
    Female,
}

/// One narrated unit of the story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Positive integer defining the scene's identity in asset file names.
    /// Scenes are processed in listed order, not sorted by this number.
    pub scene_number: u32,
    pub description: String,
    pub narration: String,
    pub actors_in_scene: Vec<SceneActor>,
}

/// An actor's dialogue turn within a scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneActor {
    pub name: String,
    pub dialogue: String,
}
