use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StoryError};
use crate::story::types::Story;

/// Story document loader and validator
pub struct StoryLoader;

impl StoryLoader {
    /// Load a story document from a JSON file and validate it.
    ///
    /// Validation runs before any assembly so that data errors (like a
    /// dialogue referencing an actor missing from the actor list) surface
    /// here instead of deep inside rendering.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Story> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|_| StoryError::ReadFailed {
            path: path.display().to_string(),
        })?;

        let story: Story =
            serde_json::from_str(&content).map_err(|e| StoryError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Self::validate(&story)?;

        debug!(
            "Loaded story '{}': {} actors, {} scenes",
            story.story_title,
            story.actors.len(),
            story.scenes.len()
        );

        Ok(story)
    }

    /// Validate cross-references and scene numbering
    pub fn validate(story: &Story) -> Result<()> {
        let mut seen = HashSet::new();
        for actor in &story.actors {
            if !seen.insert(actor.name.as_str()) {
                return Err(StoryError::DuplicateActor {
                    name: actor.name.clone(),
                }
                .into());
            }
        }

        for scene in &story.scenes {
            if scene.scene_number == 0 {
                return Err(StoryError::InvalidSceneNumber {
                    scene: scene.scene_number,
                }
                .into());
            }

            for actor in &scene.actors_in_scene {
                if story.actor_by_name(&actor.name).is_none() {
                    return Err(StoryError::UnknownActor {
                        scene: scene.scene_number,
                        name: actor.name.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;
    use crate::story::types::{Actor, Scene, SceneActor, VoiceType};
    use std::io::Write;
    use tempfile::tempdir;

    fn base_story() -> Story {
        Story {
            story_title: "Test".to_string(),
            author: "Author".to_string(),
            genre: "Drama".to_string(),
            style: "Plain".to_string(),
            actors: vec![Actor {
                name: "Ann".to_string(),
                description: "a traveller".to_string(),
                voice_type: VoiceType::Female,
            }],
            scenes: vec![Scene {
                scene_number: 1,
                description: "a road".to_string(),
                narration: "Ann walks.".to_string(),
                actors_in_scene: vec![SceneActor {
                    name: "Ann".to_string(),
                    dialogue: "Hello.".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_valid_story_passes() {
        assert!(StoryLoader::validate(&base_story()).is_ok());
    }

    #[test]
    fn test_unknown_actor_reference_rejected() {
        let mut story = base_story();
        story.scenes[0].actors_in_scene.push(SceneActor {
            name: "Ghost".to_string(),
            dialogue: "Boo.".to_string(),
        });

        let result = StoryLoader::validate(&story);
        match result {
            Err(CompositorError::Story(StoryError::UnknownActor { scene, name })) => {
                assert_eq!(scene, 1);
                assert_eq!(name, "Ghost");
            }
            other => panic!("Expected UnknownActor error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_actor_rejected() {
        let mut story = base_story();
        story.actors.push(story.actors[0].clone());
        assert!(StoryLoader::validate(&story).is_err());
    }

    #[test]
    fn test_zero_scene_number_rejected() {
        let mut story = base_story();
        story.scenes[0].scene_number = 0;
        assert!(StoryLoader::validate(&story).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("story.json");

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(&base_story()).unwrap().as_bytes())
            .unwrap();

        let story = StoryLoader::load(&path).unwrap();
        assert_eq!(story.scenes.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = StoryLoader::load("/nonexistent/story.json");
        assert!(matches!(
            result,
            Err(CompositorError::Story(StoryError::ReadFailed { .. }))
        ));
    }
}
