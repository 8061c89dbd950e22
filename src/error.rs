use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The PNG writer (or reader) rejected the pixel data.
    #[error("failed to encode image: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("malformed data URL: {0}")]
    DataUrl(String),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
