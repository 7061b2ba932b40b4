// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No 2D surface could be allocated for the requested size.
    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A base color string could not be parsed (or had a non-finite channel).
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Encoding or writing the texture to disk failed.
    #[error("Image write error: {0}")]
    ImageWrite(#[from] image::ImageError),
}
