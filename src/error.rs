use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    ImageTooLarge(usize, usize),
    BufferAllocationFailed(usize),
    MissingHeaderToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMaxValue(String),
    TruncatedPixelData { expected: usize, actual: usize },
    PixelCountMismatch { expected: usize, actual: usize },
    PixelOutOfBounds { x: usize, y: usize, width: usize, height: usize },
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadPixelData(std::io::Error),
    FailedToWriteImage(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageTooLarge(width, height) => {
                write!(
                    f,
                    "Image of {}x{} pixels exceeds the addressable buffer size",
                    width, height
                )
            }
            Self::BufferAllocationFailed(length) => {
                write!(f, "Failed to allocate a pixel buffer of {} elements", length)
            }
            Self::MissingHeaderToken(token_name) => {
                write!(f, "Expected token '{}' not found in P6 stream", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMaxValue(value) => {
                write!(
                    f,
                    "Max value must be '255' in the P6 raw format, but was '{}'",
                    value
                )
            }
            Self::TruncatedPixelData { expected, actual } => {
                write!(
                    f,
                    "Pixel data ended after {} of the {} bytes promised by the header",
                    actual, expected
                )
            }
            Self::PixelCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Number of pixels does not match the image dimensions. Expected {}, but got {}.",
                    expected, actual
                )
            }
            Self::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel coordinate ({}, {}) lies outside the {}x{} image extents",
                    x, y, width, height
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadPixelData(error) => {
                write!(f, "Failed to read pixel data: {}", error)
            }
            Self::FailedToWriteImage(error) => {
                write!(f, "Failed to write image: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
