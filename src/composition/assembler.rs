use tracing::{debug, warn};

use crate::assets::AssetResolver;
use crate::audio::DurationResolver;
use crate::story::Scene;
use crate::video::types::{Clip, Frame};

/// Builds one scene's ordered clip sequence.
///
/// Output order is always [scene clip, actor clips in the scene's listed
/// order]. Missing assets degrade the output instead of aborting: a missing
/// scene image skips the whole scene, a missing portrait skips only that
/// actor, and missing audio falls back to fixed-duration silence.
pub struct SceneAssembler<'a> {
    assets: &'a AssetResolver,
    durations: &'a DurationResolver,
    shake_enabled: bool,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(
        assets: &'a AssetResolver,
        durations: &'a DurationResolver,
        shake_enabled: bool,
    ) -> Self {
        Self {
            assets,
            durations,
            shake_enabled,
        }
    }

    /// Assemble the clip sequence for one scene.
    ///
    /// Returns an empty sequence when the scene's description image is
    /// missing; the scene then contributes nothing to the final video.
    pub fn assemble(&self, scene: &Scene) -> Vec<Clip> {
        let scene_label = format!("scene {:02}", scene.scene_number);

        let image_path = self.assets.scene_image(scene.scene_number);
        if !image_path.exists() {
            warn!("[{}] Scene image not found: {:?}, skipping scene", scene_label, image_path);
            return Vec::new();
        }

        let scene_image = match Frame::load(&image_path) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("[{}] Scene image unreadable ({}), skipping scene", scene_label, e);
                return Vec::new();
            }
        };

        let narration = self
            .durations
            .resolve(&self.assets.narration_audio(scene.scene_number));
        debug!(
            "[{}] narration: {:.2}s{}",
            scene_label,
            narration.duration(),
            if narration.is_fallback() { " (silent fallback)" } else { "" }
        );

        let mut clips = vec![Clip::new(
            scene_label.clone(),
            scene_image,
            narration.audio,
            self.shake_enabled,
        )];

        for actor in &scene.actors_in_scene {
            let actor_label = format!("{} / {}", scene_label, actor.name);

            let portrait_path = self.assets.actor_portrait(scene.scene_number, &actor.name);
            if !portrait_path.exists() {
                warn!(
                    "[{}] Actor portrait not found: {:?}, skipping actor",
                    actor_label, portrait_path
                );
                continue;
            }

            let portrait = match Frame::load(&portrait_path) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("[{}] Actor portrait unreadable ({}), skipping actor", actor_label, e);
                    continue;
                }
            };

            let dialogue = self
                .durations
                .resolve(&self.assets.actor_dialogue(scene.scene_number, &actor.name));
            debug!(
                "[{}] dialogue: {:.2}s{}",
                actor_label,
                dialogue.duration(),
                if dialogue.is_fallback() { " (silent fallback)" } else { "" }
            );

            clips.push(Clip::new(
                actor_label,
                portrait,
                dialogue.audio,
                self.shake_enabled,
            ));
        }

        clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::SceneActor;
    use crate::video::Frame;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_image(path: &Path) {
        Frame::new_filled(8, 8, [90, 90, 90]).save_png(path).unwrap();
    }

    fn write_wav(path: &Path, seconds: f64) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..(seconds * 8000.0).round() as usize {
            writer.write_sample(400i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn scene(number: u32, actors: Vec<&str>) -> Scene {
        Scene {
            scene_number: number,
            description: "a place".to_string(),
            narration: "something happens".to_string(),
            actors_in_scene: actors
                .into_iter()
                .map(|name| SceneActor {
                    name: name.to_string(),
                    dialogue: "words".to_string(),
                })
                .collect(),
        }
    }

    fn setup(dir: &Path) -> (AssetResolver, DurationResolver) {
        let assets = AssetResolver::new(dir);
        let durations = DurationResolver::new(&assets, 5.0).unwrap();
        (assets, durations)
    }

    #[test]
    fn test_missing_scene_image_contributes_zero_clips() {
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());
        let assembler = SceneAssembler::new(&assets, &durations, false);

        let clips = assembler.assemble(&scene(1, vec![]));
        assert!(clips.is_empty());
    }

    #[test]
    fn test_scene_with_narration_and_actor() {
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());

        write_image(&assets.scene_image(1));
        write_wav(&assets.narration_audio(1).with_extension("wav"), 3.2);
        write_image(&assets.actor_portrait(1, "Mara"));
        write_wav(&assets.actor_dialogue(1, "Mara").with_extension("wav"), 1.8);

        let assembler = SceneAssembler::new(&assets, &durations, false);
        let clips = assembler.assemble(&scene(1, vec!["Mara"]));

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].duration, 3.2);
        assert_eq!(clips[1].duration, 1.8);
        assert_eq!(clips[0].label, "scene 01");
        assert_eq!(clips[1].label, "scene 01 / Mara");
    }

    #[test]
    fn test_missing_portrait_skips_only_that_actor() {
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());

        write_image(&assets.scene_image(2));
        write_image(&assets.actor_portrait(2, "First"));
        write_image(&assets.actor_portrait(2, "Third"));
        // "Second" has no portrait

        let assembler = SceneAssembler::new(&assets, &durations, false);
        let clips = assembler.assemble(&scene(2, vec!["First", "Second", "Third"]));

        assert_eq!(clips.len(), 3);
        assert_eq!(clips[1].label, "scene 02 / First");
        assert_eq!(clips[2].label, "scene 02 / Third");
    }

    #[test]
    fn test_missing_narration_uses_fallback_duration() {
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());

        write_image(&assets.scene_image(3));

        let assembler = SceneAssembler::new(&assets, &durations, false);
        let clips = assembler.assemble(&scene(3, vec![]));

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].duration, 5.0);
        assert!(clips[0].audio.samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_assembly_is_deterministic_without_shake() {
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());

        write_image(&assets.scene_image(1));
        write_wav(&assets.narration_audio(1).with_extension("wav"), 2.5);
        write_image(&assets.actor_portrait(1, "Ann"));

        let assembler = SceneAssembler::new(&assets, &durations, false);
        let first = assembler.assemble(&scene(1, vec!["Ann"]));
        let second = assembler.assemble(&scene(1, vec!["Ann"]));

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.duration, b.duration);
            assert_eq!(a.label, b.label);
        }
    }

    #[test]
    fn test_two_scene_timeline_durations() {
        // Scene 1: narration 3.2s plus one actor with 1.8s dialogue.
        // Scene 2: image only, no narration audio -> 5.0s silent fallback.
        let dir = tempdir().unwrap();
        let (assets, durations) = setup(dir.path());

        write_image(&assets.scene_image(1));
        write_wav(&assets.narration_audio(1).with_extension("wav"), 3.2);
        write_image(&assets.actor_portrait(1, "Mara"));
        write_wav(&assets.actor_dialogue(1, "Mara").with_extension("wav"), 1.8);
        write_image(&assets.scene_image(2));

        let assembler = SceneAssembler::new(&assets, &durations, false);
        let scene1 = assembler.assemble(&scene(1, vec!["Mara"]));
        let scene2 = assembler.assemble(&scene(2, vec![]));

        assert_eq!(scene1.len(), 2);
        assert_eq!(scene2.len(), 1);

        let total: f64 = scene1.iter().chain(scene2.iter()).map(|c| c.duration).sum();
        assert!((total - 10.0).abs() < 1e-9);
    }
}
