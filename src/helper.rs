use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{
    imageops, DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, ImageFormat,
    ImageReader, Limits, RgbaImage,
};
use log::{debug, trace};

use crate::error::{QrLogoError, Result};
use crate::qr::{self, QrCodeEcc, MAX_CANVAS_BYTES, MAX_SIZE};

/// Pixel size of the QR code when the caller does not pick one.
pub const DEFAULT_SIZE: u32 = 256;

/// Error correction level when the caller does not pick one.
pub const DEFAULT_ECC: QrCodeEcc = QrCodeEcc::Medium;

/// How the logo offset inside the QR code is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// One offset, `qr_width / 2 - logo_width / 2`, used for both axes.
    ///
    /// Centered for square logos on square codes. A logo that is taller or
    /// shorter than it is wide ends up off-center vertically.
    #[default]
    SharedOffset,
    /// Horizontal offset from the widths, vertical offset from the heights.
    Centered,
}

impl Placement {
    /// Top-left corner of the logo inside a `qr` sized canvas.
    ///
    /// Either coordinate may be negative when the logo is larger than the code.
    pub fn offset(self, qr: (u32, u32), logo: (u32, u32)) -> (i64, i64) {
        let half = |outer: u32, inner: u32| i64::from(outer / 2) - i64::from(inner / 2);
        match self {
            Placement::SharedOffset => {
                let offset = half(qr.0, logo.0);
                (offset, offset)
            }
            Placement::Centered => (half(qr.0, logo.0), half(qr.1, logo.1)),
        }
    }
}

/// Settings for one encode call.
///
/// Built fresh per call from the defaults plus whatever the caller overrides;
/// nothing here is shared between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    pub size: u32,
    pub ecc: QrCodeEcc,
    pub placement: Placement,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            ecc: DEFAULT_ECC,
            placement: Placement::default(),
        }
    }
}

impl EncoderConfig {
    /// Overrides the pixel size. `0` keeps [`DEFAULT_SIZE`].
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = if size > 0 { size } else { DEFAULT_SIZE };
        self
    }

    pub fn with_ecc(mut self, ecc: QrCodeEcc) -> Self {
        self.ecc = ecc;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Encodes `content` as a QR code with `logo` in the middle and returns PNG bytes.
///
/// Uses [`DEFAULT_ECC`] and [`Placement::SharedOffset`]. A `size` of `0` means
/// [`DEFAULT_SIZE`].
///
/// # Errors
///
/// * [`QrLogoError::InvalidArgument`] if the logo has no pixels or `size` is above
///   [`MAX_SIZE`](crate::qr::MAX_SIZE).
/// * [`QrLogoError::GenerationFailed`] if the content does not fit.
/// * [`QrLogoError::DecodeFailed`] / [`QrLogoError::EncodeFailed`] on image codec failures.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use qrlogo::helper::encode;
///
/// let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 255])));
/// let png = encode("https://example.com", &logo, 300).unwrap();
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
pub fn encode(content: &str, logo: &DynamicImage, size: u32) -> Result<Vec<u8>> {
    encode_with(content, logo, &EncoderConfig::default().with_size(size))
}

/// Same as [`encode`], but returns the PNG as standard base64 text.
pub fn encode_to_base64(content: &str, logo: &DynamicImage, size: u32) -> Result<String> {
    encode(content, logo, size).map(|bytes| STANDARD.encode(bytes))
}

/// Encodes with explicit settings and returns PNG bytes.
pub fn encode_with(content: &str, logo: &DynamicImage, config: &EncoderConfig) -> Result<Vec<u8>> {
    let composite = compose(content, logo, config)?;
    to_png_bytes(&composite)
}

/// Encodes with explicit settings and returns the PNG as standard base64 text.
pub fn encode_to_base64_with(
    content: &str,
    logo: &DynamicImage,
    config: &EncoderConfig,
) -> Result<String> {
    encode_with(content, logo, config).map(|bytes| STANDARD.encode(bytes))
}

/// Wraps PNG bytes in a `data:` URL, ready for an `<img src>`.
pub fn to_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Builds the composite raster without encoding it.
///
/// The logo is checked before any QR work is done.
pub fn compose(content: &str, logo: &DynamicImage, config: &EncoderConfig) -> Result<RgbaImage> {
    if logo.width() == 0 || logo.height() == 0 {
        return Err(QrLogoError::InvalidArgument("logo cannot be empty".to_string()));
    }

    let size = if config.size > 0 { config.size } else { DEFAULT_SIZE };
    qr::check_size(size)?;
    let png = qr::generate_png(content, config.ecc, size)?;
    let qr_image = decode_png(&png)?;

    Ok(overlay_logo(&qr_image, logo, config.placement))
}

/// Limits matching [`qr::check_size`], so every accepted size also decodes.
fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_SIZE);
    limits.max_image_height = Some(MAX_SIZE);
    limits.max_alloc = Some(MAX_CANVAS_BYTES);
    limits
}

fn decode_png(png: &[u8]) -> Result<DynamicImage> {
    let mut reader = ImageReader::with_format(Cursor::new(png), ImageFormat::Png);
    reader.limits(decode_limits());
    reader.decode().map_err(QrLogoError::DecodeFailed)
}

/// Copies `qr` into a new RGBA canvas and stamps `logo` over it.
///
/// Logo pixels replace the canvas pixels as they are, alpha included; there is
/// no blending. Pixels that land outside the canvas are dropped.
pub fn overlay_logo(qr: &DynamicImage, logo: &DynamicImage, placement: Placement) -> RgbaImage {
    // The generator only emits black and white; widen it so the logo keeps its colors.
    let mut canvas = qr.to_rgba8();

    let (x, y) = placement.offset(qr.dimensions(), logo.dimensions());
    debug!(
        "placing {}x{} logo at ({}, {}) on {}x{} QR code",
        logo.width(),
        logo.height(),
        x,
        y,
        canvas.width(),
        canvas.height()
    );

    imageops::replace(&mut canvas, &logo.to_rgba8(), x, y);
    canvas
}

/// Writes an RGBA raster as PNG using the strongest compression.
pub fn to_png_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(QrLogoError::EncodeFailed)?;

    trace!("encoded {}x{} composite into {} PNG bytes", img.width(), img.height(), buf.len());
    Ok(buf)
}
