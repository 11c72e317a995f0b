use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::audio::AudioData;
use crate::error::{Result, VideoError};

/// Represents a single video frame
///
/// A thin wrapper around an RGB image buffer with the pixel helpers the
/// transform code uses.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
        Self { buffer }
    }

    /// Load a frame from an image file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|_| VideoError::ImageLoadFailed {
            path: path.display().to_string(),
        })?;
        Ok(Self {
            buffer: img.to_rgb8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let pixel = self.buffer.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Return a copy resized to the given dimensions
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if self.width() == width && self.height() == height {
            return self.clone();
        }
        let resized =
            image::imageops::resize(&self.buffer, width, height, image::imageops::FilterType::Lanczos3);
        Frame::new(resized)
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), image::ImageError> {
        self.buffer.save(path)
    }
}

/// One audio-visual unit of the final video: a still image stretched over
/// its audio track's duration.
///
/// The duration is always an output of the duration resolver, never an
/// independent input.
#[derive(Debug, Clone)]
pub struct Clip {
    /// Identifier used in logs and warnings ("scene 02", "scene 02 / mara")
    pub label: String,

    /// The still image shown for the clip's whole duration
    pub image: Frame,

    /// The clip's audio track
    pub audio: AudioData,

    /// Duration in seconds, equal to the audio duration
    pub duration: f64,

    /// Whether the camera-shake transform is applied when rendering
    pub shake: bool,
}

impl Clip {
    pub fn new(label: String, image: Frame, audio: AudioData, shake: bool) -> Self {
        let duration = audio.duration;
        Self {
            label,
            image,
            audio,
            duration,
            shake,
        }
    }

    /// Number of frames this clip contributes at the given frame rate
    pub fn frame_count(&self, fps: f64) -> usize {
        ((self.duration * fps).round() as usize).max(1)
    }
}

/// Video output parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoParams {
    /// Target frame rate for output
    pub fps: f64,

    /// Target resolution (width, height)
    pub resolution: (u32, u32),

    /// Video codec to use for output
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            fps: 24.0,
            resolution: (768, 768),
            codec: "libx264".to_string(),
            quality: 85,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_pixel_access() {
        let mut frame = Frame::new_filled(4, 4, [1, 2, 3]);
        assert_eq!(frame.get_pixel(0, 0), [1, 2, 3]);

        frame.set_pixel(2, 2, [9, 8, 7]);
        assert_eq!(frame.get_pixel(2, 2), [9, 8, 7]);
    }

    #[test]
    fn test_frame_resized() {
        let frame = Frame::new_filled(8, 8, [100, 100, 100]);
        let resized = frame.resized(4, 2);
        assert_eq!((resized.width(), resized.height()), (4, 2));
    }

    #[test]
    fn test_clip_duration_follows_audio() {
        let audio = AudioData::silent(3.5, 8000);
        let clip = Clip::new("test".to_string(), Frame::new_filled(2, 2, [0; 3]), audio, false);
        assert_eq!(clip.duration, 3.5);
        assert_eq!(clip.frame_count(24.0), 84);
    }

    #[test]
    fn test_clip_frame_count_is_at_least_one() {
        let audio = AudioData::silent(0.0, 8000);
        let clip = Clip::new("empty".to_string(), Frame::new_filled(2, 2, [0; 3]), audio, false);
        assert_eq!(clip.frame_count(24.0), 1);
    }
}
