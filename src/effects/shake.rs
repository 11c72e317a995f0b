use image::imageops::{self, FilterType};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::video::types::Frame;

/// Per-tick decay applied to the shake intensity
pub const DECAY_FACTOR: f64 = 0.995;

/// Oversize factor applied before translating, so the shifted frame never
/// exposes an empty edge for the intensity/decay parameters in use
pub const ZOOM_FACTOR: f64 = 1.15;

// Tolerance for the elapsed-vs-duration comparison, covering accumulated
// float error in tick sums like 48 * (1/24)
const ELAPSED_EPSILON: f64 = 1e-9;

/// Decaying random-walk offset used as a camera-shake signal.
///
/// A plain value type owned by exactly one clip's transform. The offset is
/// cumulative across ticks and is reset to (0,0) the moment the configured
/// duration elapses, regardless of the random path taken.
#[derive(Debug, Clone, Default)]
pub struct ShakeState {
    x: f64,
    y: f64,
    active: bool,
    duration: f64,
    intensity: f64,
    elapsed: f64,
}

impl ShakeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the generator for `duration` seconds at the given intensity
    pub fn start(&mut self, duration: f64, intensity: f64) {
        self.active = true;
        self.duration = duration;
        self.intensity = intensity;
        self.elapsed = 0.0;
    }

    /// Advance the generator by one tick of `dt` seconds.
    ///
    /// No-op while inactive. On the tick where the cumulative elapsed time
    /// first reaches the duration, the state deactivates and the offset is
    /// zeroed exactly (terminal reset, not a decay to zero).
    pub fn advance<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        if !self.active {
            return;
        }

        self.elapsed += dt;
        if self.elapsed + ELAPSED_EPSILON >= self.duration {
            *self = Self::default();
            return;
        }

        self.x += rng.gen_range(-0.5..=0.5) * self.intensity;
        self.y += rng.gen_range(-0.5..=0.5) * self.intensity;
        self.intensity *= DECAY_FACTOR;
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

/// Per-frame camera-shake warp for one clip.
///
/// Owns its `ShakeState` and RNG exclusively; constructing a new transform
/// per clip keeps shake state from ever being shared between clips.
pub struct ShakeTransform {
    state: ShakeState,
    rng: SmallRng,
    frame_interval: f64,
}

impl ShakeTransform {
    /// Create a transform for a clip of the given duration
    pub fn new(duration: f64, intensity: f64, fps: f64) -> Self {
        Self::with_rng(duration, intensity, fps, SmallRng::from_entropy())
    }

    /// Create a transform with an explicit RNG, for deterministic tests
    pub fn with_rng(duration: f64, intensity: f64, fps: f64, rng: SmallRng) -> Self {
        let mut state = ShakeState::new();
        state.start(duration, intensity);
        Self {
            state,
            rng,
            frame_interval: 1.0 / fps,
        }
    }

    pub fn offset(&self) -> (f64, f64) {
        self.state.offset()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Render one output frame: advance the shake state by one frame
    /// interval, zoom the source frame, translate it by the current offset,
    /// and crop back to the original dimensions.
    pub fn apply(&mut self, frame: &Frame) -> Frame {
        self.state.advance(self.frame_interval, &mut self.rng);

        let (width, height) = (frame.width(), frame.height());
        let zoomed_w = (width as f64 * ZOOM_FACTOR).round() as u32;
        let zoomed_h = (height as f64 * ZOOM_FACTOR).round() as u32;

        let zoomed = imageops::resize(frame.as_image(), zoomed_w, zoomed_h, FilterType::Triangle);

        // Crop window centered in the oversized frame, shifted by the shake
        // offset and clamped so it never leaves the zoomed bounds.
        let (shift_x, shift_y) = self.state.offset();
        let max_x = (zoomed_w - width) as f64;
        let max_y = (zoomed_h - height) as f64;
        let origin_x = (max_x / 2.0 - shift_x).clamp(0.0, max_x) as u32;
        let origin_y = (max_y / 2.0 - shift_y).clamp(0.0, max_y) as u32;

        let cropped = imageops::crop_imm(&zoomed, origin_x, origin_y, width, height).to_image();
        Frame::new(cropped)
    }
}
