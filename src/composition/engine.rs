use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    assets::AssetResolver,
    audio::DurationResolver,
    composition::assembler::SceneAssembler,
    config::Config,
    error::{CompositionError, Result},
    story::StoryLoader,
    video::{Clip, EncodedVideo, VideoCompositor},
};

/// Main engine that orchestrates story loading, scene assembly, and final
/// video rendering.
///
/// The pipeline runs in four steps:
/// 1. Story loading - parse and validate the story document
/// 2. Asset resolution - bind the asset root and silent fallback
/// 3. Scene assembly - build each scene's clip sequence, in story order
/// 4. Output generation - concatenate all clips and render one video
pub struct CompositionEngine {
    config: Config,
}

impl CompositionEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full stitching pipeline.
    ///
    /// Per-scene and per-actor problems degrade the output (logged as
    /// warnings); only a bad story document or a failed render abort the run.
    pub async fn compose<P: AsRef<Path>>(
        &self,
        story_path: P,
        assets_dir: P,
        output_dir: P,
    ) -> Result<EncodedVideo> {
        let story_path = story_path.as_ref();
        let assets_dir = assets_dir.as_ref();
        let output_dir = output_dir.as_ref();

        info!("Starting story composition");
        info!("   Story:  {:?}", story_path);
        info!("   Assets: {:?}", assets_dir);
        info!("   Output: {:?}", output_dir);
        info!("   Shake:  {}", self.config.shake.enabled);

        // Step 1: Story loading and validation
        info!("Step 1: Loading story document...");
        let story = StoryLoader::load(story_path)?;
        info!(
            "   Loaded '{}': {} scenes, {} actors",
            story.story_title,
            story.scenes.len(),
            story.actors.len()
        );

        // Step 2: Asset resolution context
        info!("Step 2: Resolving asset context...");
        let assets = AssetResolver::new(assets_dir);
        let durations = DurationResolver::new(&assets, self.config.audio.fallback_duration)?;

        // Step 3: Scene assembly, strictly in the story's listed order
        info!("Step 3: Assembling scenes...");
        let assembler = SceneAssembler::new(&assets, &durations, self.config.shake.enabled);

        let mut clips: Vec<Clip> = Vec::new();
        for scene in &story.scenes {
            let scene_clips = assembler.assemble(scene);
            if scene_clips.is_empty() {
                warn!("Scene {:02} produced no clips", scene.scene_number);
            }
            clips.extend(scene_clips);
        }

        if clips.is_empty() {
            return Err(CompositionError::NoClips {
                path: assets_dir.display().to_string(),
            }
            .into());
        }

        let total_duration: f64 = clips.iter().map(|c| c.duration).sum();
        info!(
            "   Assembled {} clips, {:.1}s total",
            clips.len(),
            total_duration
        );

        // Step 4: Output generation
        info!("Step 4: Rendering final video...");
        let mut compositor = VideoCompositor::new(
            self.config.video.clone(),
            self.config.shake.intensity,
            self.config.audio.sample_rate,
        );
        let encoded = compositor.render(&clips, output_dir).await?;
        compositor.cleanup()?;

        info!("Composition complete! Output saved to: {:?}", encoded.path);
        Ok(encoded)
    }

    /// Archive the story document, its assets, and the final video into a
    /// timestamped project folder for later reuse.
    pub fn archive_project<P: AsRef<Path>>(
        &self,
        story_path: P,
        assets_dir: P,
        video: &EncodedVideo,
        projects_dir: P,
    ) -> Result<PathBuf> {
        let story_path = story_path.as_ref();
        let assets_dir = assets_dir.as_ref();

        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let project_dir = projects_dir
            .as_ref()
            .join(format!("project_{}", timestamp));

        let archived_assets = project_dir.join("assets");
        let archived_video = project_dir.join("final_video");
        std::fs::create_dir_all(&archived_assets)?;
        std::fs::create_dir_all(&archived_video)?;

        if let Some(name) = story_path.file_name() {
            std::fs::copy(story_path, project_dir.join(name))?;
        }

        for entry in std::fs::read_dir(assets_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                std::fs::copy(entry.path(), archived_assets.join(entry.file_name()))?;
            }
        }

        if let Some(name) = video.path.file_name() {
            std::fs::copy(&video.path, archived_video.join(name))?;
        }

        info!("Project archived in {:?}", project_dir);
        Ok(project_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_story(path: &Path, json: &str) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
    }

    const MINIMAL_STORY: &str = r#"{
        "story_title": "T", "author": "A", "genre": "G", "style": "S",
        "actors": [],
        "scenes": [
            {"scene_number": 1, "description": "d", "narration": "n", "actors_in_scene": []}
        ]
    }"#;

    #[tokio::test]
    async fn test_compose_with_no_assets_yields_no_clips_error() {
        let dir = tempdir().unwrap();
        let story_path = dir.path().join("story.json");
        write_story(&story_path, MINIMAL_STORY);

        let assets_dir = dir.path().join("assets");
        std::fs::create_dir(&assets_dir).unwrap();
        let output_dir = dir.path().join("out");

        let engine = CompositionEngine::new(Config::default());
        let result = engine
            .compose(&story_path, &assets_dir, &output_dir)
            .await;

        assert!(matches!(
            result,
            Err(CompositorError::Composition(CompositionError::NoClips { .. }))
        ));
    }

    #[tokio::test]
    async fn test_compose_rejects_invalid_story() {
        let dir = tempdir().unwrap();
        let story_path = dir.path().join("story.json");
        write_story(
            &story_path,
            r#"{
                "story_title": "T", "author": "A", "genre": "G", "style": "S",
                "actors": [],
                "scenes": [
                    {"scene_number": 1, "description": "d", "narration": "n",
                     "actors_in_scene": [{"name": "Ghost", "dialogue": "x"}]}
                ]
            }"#,
        );

        let assets_dir = dir.path().join("assets");
        std::fs::create_dir(&assets_dir).unwrap();

        let engine = CompositionEngine::new(Config::default());
        let result = engine
            .compose(&story_path, &assets_dir, &dir.path().join("out"))
            .await;

        assert!(matches!(result, Err(CompositorError::Story(_))));
    }

    #[test]
    fn test_archive_project_copies_everything() {
        let dir = tempdir().unwrap();

        let story_path = dir.path().join("story.json");
        write_story(&story_path, MINIMAL_STORY);

        let assets_dir = dir.path().join("assets");
        std::fs::create_dir(&assets_dir).unwrap();
        std::fs::write(assets_dir.join("scene_01_description.png"), b"png").unwrap();

        let video_path = dir.path().join("final_story_video_test.mp4");
        std::fs::write(&video_path, b"mp4").unwrap();
        let video = EncodedVideo {
            path: video_path,
            duration: 1.0,
            frame_count: 24,
            file_size: 3,
        };

        let projects_dir = dir.path().join("saved_projects");
        let engine = CompositionEngine::new(Config::default());
        let project_dir = engine
            .archive_project(
                story_path.as_path(),
                assets_dir.as_path(),
                &video,
                projects_dir.as_path(),
            )
            .unwrap();

        assert!(project_dir.join("story.json").exists());
        assert!(project_dir.join("assets/scene_01_description.png").exists());
        assert!(project_dir
            .join("final_video/final_story_video_test.mp4")
            .exists());
    }
}
