use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rayon::prelude::*;
use tokio::task;
use tracing::{debug, info, warn};

use crate::effects::ShakeTransform;
use crate::error::{Result, VideoError};
use crate::video::types::{Clip, Frame, VideoParams};

/// Represents an encoded video output
#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub path: PathBuf,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
}

/// Concatenates clip sequences into one timeline and renders the final
/// video through external FFmpeg commands.
///
/// Clips are rendered strictly in the order given; the caller is responsible
/// for story ordering. Rendering a clip with shake enabled walks its frames
/// sequentially, since the shake state advances once per frame.
pub struct VideoCompositor {
    params: VideoParams,
    shake_intensity: f64,
    audio_sample_rate: u32,
    temp_dir: Option<PathBuf>,
}

impl VideoCompositor {
    pub fn new(params: VideoParams, shake_intensity: f64, audio_sample_rate: u32) -> Self {
        Self {
            params,
            shake_intensity,
            audio_sample_rate,
            temp_dir: None,
        }
    }

    pub fn check_ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Timestamped file name for the final video, unique per run
    pub fn output_filename() -> String {
        format!(
            "final_story_video_{}.mp4",
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        )
    }

    fn ensure_temp_dir(&mut self) -> Result<PathBuf> {
        if let Some(ref temp_dir) = self.temp_dir {
            return Ok(temp_dir.clone());
        }

        let temp_dir = PathBuf::from(format!("./temp_story_compositor_{}", std::process::id()));
        create_dir_all(&temp_dir)?;
        self.temp_dir = Some(temp_dir.clone());
        Ok(temp_dir)
    }

    /// Render all clips into one video file under `output_dir`.
    ///
    /// Encoding happens into a temporary path; the finished file is moved
    /// into place in one step so a failed run never leaves a half-written
    /// output behind.
    pub async fn render<P: AsRef<Path>>(
        &mut self,
        clips: &[Clip],
        output_dir: P,
    ) -> Result<EncodedVideo> {
        let output_dir = output_dir.as_ref();
        info!("Composing video from {} clips", clips.len());

        if !Self::check_ffmpeg_available() {
            return Err(VideoError::EncodingFailed {
                reason: "FFmpeg not found. Please install FFmpeg.".to_string(),
            }
            .into());
        }

        let temp_dir = self.ensure_temp_dir()?;
        create_dir_all(output_dir)?;

        let frame_count = self.save_clip_frames(clips, &temp_dir)?;
        let frame_list_path = self.create_frame_list(frame_count, &temp_dir)?;

        let audio_path = temp_dir.join("audio_track.wav");
        self.write_audio_track(clips, &audio_path)?;

        let video_only_path = temp_dir.join("video_only.mp4");
        self.encode_video_from_frames(&frame_list_path, &video_only_path)
            .await?;

        let staged_path = temp_dir.join("final.mp4");
        self.mux_video_and_audio(&video_only_path, &audio_path, &staged_path)
            .await?;

        let output_path = output_dir.join(Self::output_filename());
        Self::move_into_place(&staged_path, &output_path)?;

        let metadata = std::fs::metadata(&output_path)?;
        let encoded = EncodedVideo {
            path: output_path,
            duration: clips.iter().map(|c| c.duration).sum(),
            frame_count,
            file_size: metadata.len(),
        };

        info!(
            "Video composition complete: {:.1}s, {} frames, {:.1} MB",
            encoded.duration,
            encoded.frame_count,
            encoded.file_size as f64 / 1024.0 / 1024.0
        );

        Ok(encoded)
    }

    /// Render one clip's frame sequence at the target resolution.
    ///
    /// A fresh shake transform is created here when the clip asks for it, so
    /// no shake state survives past this call or leaks into another clip.
    fn render_clip_frames(&self, clip: &Clip) -> Vec<Frame> {
        let (width, height) = self.params.resolution;
        let base = clip.image.resized(width, height);
        let count = clip.frame_count(self.params.fps);

        if clip.shake {
            let mut transform =
                ShakeTransform::new(clip.duration, self.shake_intensity, self.params.fps);
            (0..count).map(|_| transform.apply(&base)).collect()
        } else {
            vec![base; count]
        }
    }

    /// Render and save every clip's frames as numbered PNGs, in clip order.
    /// Returns the total frame count.
    fn save_clip_frames(&self, clips: &[Clip], temp_dir: &Path) -> Result<usize> {
        let mut frame_counter = 0usize;

        for clip in clips {
            debug!(
                "Rendering clip '{}': {:.2}s, shake={}",
                clip.label, clip.duration, clip.shake
            );
            let frames = self.render_clip_frames(clip);

            // PNG encoding dominates here; the frames themselves were
            // rendered sequentially above
            frames
                .par_iter()
                .enumerate()
                .try_for_each(|(i, frame)| -> Result<()> {
                    let frame_path =
                        temp_dir.join(format!("frame_{:06}.png", frame_counter + i));
                    frame.save_png(&frame_path).map_err(|e| {
                        VideoError::EncodingFailed {
                            reason: format!("Failed to save frame: {}", e),
                        }
                    })?;
                    Ok(())
                })?;

            frame_counter += frames.len();
        }

        info!("Saved {} frames as images", frame_counter);
        Ok(frame_counter)
    }

    fn create_frame_list(&self, frame_count: usize, temp_dir: &Path) -> Result<PathBuf> {
        let list_path = temp_dir.join("frame_list.txt");
        let mut file = File::create(&list_path)?;

        let frame_duration = 1.0 / self.params.fps;

        for i in 0..frame_count {
            let frame_path = temp_dir.join(format!("frame_{:06}.png", i));
            let absolute_path = frame_path
                .canonicalize()
                .unwrap_or(frame_path);

            writeln!(file, "file '{}'", absolute_path.display())?;
            writeln!(file, "duration {:.6}", frame_duration)?;
        }

        Ok(list_path)
    }

    /// Concatenate every clip's audio into one mono WAV at the output rate.
    ///
    /// Each clip contributes exactly `round(duration * rate)` samples,
    /// truncating or zero-padding its decoded audio, so the audio timeline
    /// stays aligned with the frame timeline.
    fn write_audio_track(&self, clips: &[Clip], path: &Path) -> Result<()> {
        let rate = self.audio_sample_rate;
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer =
            hound::WavWriter::create(path, spec).map_err(|e| VideoError::EncodingFailed {
                reason: format!("Failed to create audio track: {}", e),
            })?;

        for clip in clips {
            let mut samples = clip.audio.resampled_mono(rate);
            let target = (clip.duration * rate as f64).round() as usize;
            samples.resize(target, 0.0);

            for sample in samples {
                let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(quantized)
                    .map_err(|e| VideoError::EncodingFailed {
                        reason: format!("Failed to write audio track: {}", e),
                    })?;
            }
        }

        writer.finalize().map_err(|e| VideoError::EncodingFailed {
            reason: format!("Failed to finalize audio track: {}", e),
        })?;

        Ok(())
    }

    async fn encode_video_from_frames(
        &self,
        frame_list_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args([
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            &frame_list_path.display().to_string(),
            "-c:v",
            &self.params.codec,
            "-r",
            &self.params.fps.to_string(),
            "-pix_fmt",
            "yuv420p",
            "-crf",
            &self.quality_to_crf(self.params.quality).to_string(),
            "-y",
            &output_path.display().to_string(),
        ]);

        Self::run_ffmpeg(cmd).await
    }

    async fn mux_video_and_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args([
            "-i",
            &video_path.display().to_string(),
            "-i",
            &audio_path.display().to_string(),
            "-c:v",
            "copy",
            "-c:a",
            "aac",
            "-shortest",
            "-y",
            &output_path.display().to_string(),
        ]);

        Self::run_ffmpeg(cmd).await
    }

    async fn run_ffmpeg(mut cmd: Command) -> Result<()> {
        let output = task::spawn_blocking(move || cmd.output())
            .await
            .map_err(|e| VideoError::EncodingFailed {
                reason: format!("Failed to spawn FFmpeg process: {}", e),
            })?
            .map_err(|e| VideoError::EncodingFailed {
                reason: format!("FFmpeg execution failed: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VideoError::EncodingFailed {
                reason: format!("FFmpeg failed: {}", stderr),
            }
            .into());
        }

        Ok(())
    }

    /// Rename into place; fall back to copy+remove when the temp dir and
    /// output dir are on different filesystems
    fn move_into_place(staged: &Path, output: &Path) -> Result<()> {
        if std::fs::rename(staged, output).is_err() {
            std::fs::copy(staged, output)?;
            std::fs::remove_file(staged)?;
        }
        Ok(())
    }

    fn quality_to_crf(&self, quality: u8) -> u8 {
        (51 - ((quality as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(temp_dir) = &self.temp_dir {
            if let Err(e) = std::fs::remove_dir_all(temp_dir) {
                warn!("Failed to remove temporary directory: {}", e);
            }
            self.temp_dir = None;
        }
        Ok(())
    }
}

impl Drop for VideoCompositor {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioData;
    use tempfile::tempdir;

    fn compositor() -> VideoCompositor {
        let params = VideoParams {
            fps: 24.0,
            resolution: (16, 16),
            codec: "libx264".to_string(),
            quality: 85,
        };
        VideoCompositor::new(params, 5.0, 8000)
    }

    fn clip(label: &str, seconds: f64, shake: bool) -> Clip {
        Clip::new(
            label.to_string(),
            Frame::new_filled(32, 32, [50, 60, 70]),
            AudioData::silent(seconds, 8000),
            shake,
        )
    }

    #[test]
    fn test_output_filename_shape() {
        let name = VideoCompositor::output_filename();
        assert!(name.starts_with("final_story_video_"));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn test_quality_to_crf_bounds() {
        let c = compositor();
        assert_eq!(c.quality_to_crf(100), 0);
        assert_eq!(c.quality_to_crf(0), 51);
        assert!(c.quality_to_crf(85) < c.quality_to_crf(50));
    }

    #[test]
    fn test_render_clip_frames_count_and_size() {
        let c = compositor();

        let frames = c.render_clip_frames(&clip("a", 2.0, false));
        assert_eq!(frames.len(), 48);
        assert_eq!((frames[0].width(), frames[0].height()), (16, 16));

        let shaken = c.render_clip_frames(&clip("b", 0.5, true));
        assert_eq!(shaken.len(), 12);
        assert_eq!((shaken[0].width(), shaken[0].height()), (16, 16));
    }

    #[test]
    fn test_audio_track_sample_count_matches_durations() {
        let c = compositor();
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.wav");

        let clips = vec![clip("a", 3.2, false), clip("b", 1.8, false), clip("c", 5.0, false)];
        c.write_audio_track(&clips, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let expected: usize = clips
            .iter()
            .map(|cl| (cl.duration * 8000.0).round() as usize)
            .sum();
        assert_eq!(reader.len() as usize, expected);
        // 3.2 + 1.8 + 5.0 seconds at 8 kHz mono
        assert_eq!(reader.len(), 80000);
    }

    #[test]
    fn test_save_clip_frames_sequences_all_clips() {
        let c = compositor();
        let dir = tempdir().unwrap();

        let clips = vec![clip("a", 0.25, false), clip("b", 0.25, true)];
        let total = c.save_clip_frames(&clips, dir.path()).unwrap();

        assert_eq!(total, 12); // 6 + 6 frames
        for i in 0..total {
            assert!(dir.path().join(format!("frame_{:06}.png", i)).exists());
        }
    }
}
