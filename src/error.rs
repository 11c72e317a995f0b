use thiserror::Error;

/// Main error type for the Story-Compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Story document error: {0}")]
    Story(#[from] StoryError),

    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("Video processing error: {0}")]
    Video(#[from] VideoError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Story-document errors, surfaced before any assembly begins
#[derive(Error, Debug)]
pub enum StoryError {
    #[error("Failed to read story document: {path}")]
    ReadFailed { path: String },

    #[error("Failed to parse story document {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Scene {scene} references unknown actor: {name}")]
    UnknownActor { scene: u32, name: String },

    #[error("Duplicate actor name in actor list: {name}")]
    DuplicateActor { name: String },

    #[error("Invalid scene number: {scene} (must be positive)")]
    InvalidSceneNumber { scene: u32 },
}

/// Audio-specific errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to write audio file: {path}")]
    WriteFailed { path: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },
}

/// Video-specific errors
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Failed to load image file: {path}")]
    ImageLoadFailed { path: String },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Frame processing failed: {reason}")]
    FrameProcessingFailed { reason: String },

    #[error("Invalid video parameters: {details}")]
    InvalidParameters { details: String },
}

/// Composition-specific errors
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("No clips could be assembled from {path}")]
    NoClips { path: String },

    #[error("Output generation failed: {reason}")]
    OutputFailed { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

impl CompositorError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Story(StoryError::ReadFailed { path }) => {
                format!("Could not read story document '{}'. Please check the path.", path)
            }
            Self::Story(StoryError::UnknownActor { scene, name }) => {
                format!(
                    "Scene {} references actor '{}' which is not in the story's actor list.",
                    scene, name
                )
            }
            Self::Video(VideoError::EncodingFailed { reason }) => {
                format!("Video encoding failed: {}. Is FFmpeg installed and on PATH?", reason)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
