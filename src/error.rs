use crate::header::HeaderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegError {
    #[error("Could not find file: {}", .0.display())]
    CarrierNotFound(PathBuf),

    #[error("Unable to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unable to write image {}: {source}", .path.display())]
    ImageEncode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unsupported pixel stride: {0} bytes per pixel")]
    UnsupportedPixelStride(usize),

    #[error("Pixel data does not match the reference image: expected {expected} bytes, got {actual}")]
    GeometryMismatch { expected: usize, actual: usize },

    #[error("The image holds no hidden message")]
    NoHiddenData,

    #[error("Not enough space in the image: need {needed} bytes, have room for {available}")]
    InsufficientCapacity { needed: usize, available: usize },

    #[error("Invalid header: {0}")]
    Header(#[source] HeaderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HeaderError> for StegError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::BadMagic => StegError::NoHiddenData,
            other => StegError::Header(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, StegError>;
