//! QR code generation.
//!
//! Symbol encoding (segment modes, Reed-Solomon blocks, masking) is done by the
//! [`qrcode`](::qrcode) crate. This module turns the resulting module grid into
//! a square grayscale raster of a requested pixel size and serialises it as PNG.
use std::fmt;
use std::str::FromStr;

use ::qrcode::{Color, EcLevel, QrCode};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageBuffer, ImageEncoder, Luma};
use log::debug;

use crate::error::{QrLogoError, Result};

/// Width of the light border drawn around the symbol, in modules.
pub const QUIET_ZONE: u32 = 4;

/// Largest RGBA canvas the pipeline will build, in bytes.
pub const MAX_CANVAS_BYTES: u64 = 512 * 1024 * 1024;

/// Largest accepted pixel size: a `MAX_SIZE` x `MAX_SIZE` RGBA canvas fits in
/// [`MAX_CANVAS_BYTES`].
pub const MAX_SIZE: u32 = 11_585;

/// Rejects sizes whose RGBA canvas would exceed [`MAX_CANVAS_BYTES`].
pub fn check_size(size: u32) -> Result<()> {
    let bytes = u64::from(size)
        .checked_mul(u64::from(size))
        .and_then(|pixels| pixels.checked_mul(4));
    match bytes {
        Some(bytes) if bytes <= MAX_CANVAS_BYTES => Ok(()),
        _ => Err(QrLogoError::InvalidArgument(format!(
            "size {size} is too large, the maximum is {MAX_SIZE}"
        ))),
    }
}

/// The error correction level of a QR code symbol.
///
/// Levels are ordered: each one recovers more damage than the last, at the
/// cost of data capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QrCodeEcc {
    /// About 7% of codewords can be restored.
    Low,
    /// About 15% of codewords can be restored.
    #[default]
    Medium,
    /// About 25% of codewords can be restored.
    Quartile,
    /// About 30% of codewords can be restored.
    High,
}

impl QrCodeEcc {
    /// Lowercase level name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            QrCodeEcc::Low => "low",
            QrCodeEcc::Medium => "medium",
            QrCodeEcc::Quartile => "quartile",
            QrCodeEcc::High => "high",
        }
    }
}

impl From<QrCodeEcc> for EcLevel {
    fn from(ecc: QrCodeEcc) -> Self {
        match ecc {
            QrCodeEcc::Low => EcLevel::L,
            QrCodeEcc::Medium => EcLevel::M,
            QrCodeEcc::Quartile => EcLevel::Q,
            QrCodeEcc::High => EcLevel::H,
        }
    }
}

impl fmt::Display for QrCodeEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrCodeEcc {
    type Err = QrLogoError;

    /// Accepts the full level name or its single-letter form, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(QrCodeEcc::Low),
            "medium" | "m" => Ok(QrCodeEcc::Medium),
            "quartile" | "q" => Ok(QrCodeEcc::Quartile),
            "high" | "h" => Ok(QrCodeEcc::High),
            other => Err(QrLogoError::InvalidArgument(format!(
                "unknown error correction level {other:?}"
            ))),
        }
    }
}

/// Generates a square grayscale QR code raster.
///
/// The symbol gets a quiet zone of [`QUIET_ZONE`] modules on every side and is
/// nearest-sampled onto a `size` x `size` canvas. When `size` is too small to
/// give each module at least one pixel, the canvas silently grows to exactly
/// one pixel per module.
///
/// Dark modules are black (`0`) and light modules white (`255`).
///
/// # Errors
///
/// Returns [`QrLogoError::GenerationFailed`] when `content` does not fit in any
/// QR version at the requested level, and [`QrLogoError::InvalidArgument`] when
/// `size` is above [`MAX_SIZE`].
///
/// # Example
///
/// ```
/// use qrlogo::qr::{generate_image_buffer, QrCodeEcc};
///
/// let img = generate_image_buffer("Hello, World!", QrCodeEcc::Low, 100).unwrap();
/// assert_eq!(img.dimensions(), (100, 100));
/// ```
pub fn generate_image_buffer(content: &str, ecc: QrCodeEcc, size: u32) -> Result<GrayImage> {
    check_size(size)?;
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::from(ecc))
        .map_err(|e| QrLogoError::GenerationFailed(e.to_string()))?;

    let modules = code.width() as u32;
    let real_size = modules + 2 * QUIET_ZONE;
    let size = size.max(real_size);
    let colors = code.to_colors();

    debug!(
        "generated QR symbol: {0}x{0} modules at level {1}, rendering {2}x{2} px",
        modules, ecc, size
    );

    let mut img: GrayImage = ImageBuffer::new(size, size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        // Integer form of floor(pixel * real_size / size).
        let mx = (u64::from(x) * u64::from(real_size) / u64::from(size)) as u32;
        let my = (u64::from(y) * u64::from(real_size) / u64::from(size)) as u32;
        *pixel = if is_dark(&colors, modules, mx, my) {
            Luma([0u8])
        } else {
            Luma([255u8])
        };
    }

    Ok(img)
}

/// Generates a QR code raster and returns it as PNG bytes.
///
/// See [`generate_image_buffer`] for the layout rules.
pub fn generate_png(content: &str, ecc: QrCodeEcc, size: u32) -> Result<Vec<u8>> {
    let img = generate_image_buffer(content, ecc, size)?;

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::L8)
        .map_err(|e| QrLogoError::GenerationFailed(format!("cannot write QR PNG: {e}")))?;

    Ok(buf)
}

// Module lookup in quiet-zone coordinates; anything in the border is light.
fn is_dark(colors: &[Color], modules: u32, mx: u32, my: u32) -> bool {
    let (Some(x), Some(y)) = (mx.checked_sub(QUIET_ZONE), my.checked_sub(QUIET_ZONE)) else {
        return false;
    };
    if x >= modules || y >= modules {
        return false;
    }
    colors[(y * modules + x) as usize] == Color::Dark
}
