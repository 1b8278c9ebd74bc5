use thiserror::Error;

/// Errors produced by the whiteboard session and its collaborators
#[derive(Error, Debug)]
pub enum WhiteboardError {
    #[error("Failed to encode surface as PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Snapshot is {actual:?} but the surface is {expected:?}")]
    SizeMismatch {
        expected: [u32; 2],
        actual: [u32; 2],
    },

    #[error("Snapshot restore was dropped before it finished")]
    RestoreCancelled,

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Export file name {0:?} must be a plain file name")]
    InvalidFileName(String),

    #[error("Browser download failed: {0}")]
    Download(String),
}

/// Result type for whiteboard operations
pub type WhiteboardResult<T> = Result<T, WhiteboardError>;
