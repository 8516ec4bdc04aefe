//! Error type shared by every stage of the logo pipeline.

use thiserror::Error;

/// Failures that can stop a QR-with-logo encode.
///
/// None of these are retried. Any error means no usable image was produced.
#[derive(Error, Debug)]
pub enum QrLogoError {
    /// The caller passed something unusable, e.g. a zero-area logo.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The QR generator rejected the content/size/level combination.
    #[error("QR generation failed: {0}")]
    GenerationFailed(String),

    /// The generated QR bytes could not be read back as an image.
    #[error("failed to decode generated QR image: {0}")]
    DecodeFailed(#[source] image::ImageError),

    /// The composite could not be written as PNG.
    #[error("failed to encode PNG: {0}")]
    EncodeFailed(#[source] image::ImageError),
}

pub type Result<T> = std::result::Result<T, QrLogoError>;
