//! # qrlogo
//!
//! Generate QR codes with a logo stamped in the middle.
//!
//! `qrlogo` encodes text into a QR code, copies it onto a full-color canvas, overwrites the
//! center with the pixels of a logo image and returns the result as PNG bytes or as base64
//! text. QR symbol encoding is handled by the [`qrcode`](::qrcode) crate; image decoding and
//! PNG output by the [`image`] crate.
//!
//! ## Features
//!
//! - Four error correction levels: Low, Medium, Quartile, High. Pick a high level when the
//!   logo covers a large part of the code, since the covered modules must be recovered.
//! - Exact output size in pixels, with a 4-module quiet zone.
//! - Logo pixels are copied as they are (no blending, no scaling).
//! - PNG output with maximum compression, raw or base64.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrlogo = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Encode a URL with a logo and get base64 text back:
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//!
//! let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([0, 120, 255, 255])));
//! let b64 = qrlogo::encode_to_base64("https://example.com", &logo, 500).unwrap();
//! assert!(!b64.is_empty());
//! ```
//!
//! Tune the level and placement:
//!
//! ```rust
//! use image::DynamicImage;
//! use qrlogo::{EncoderConfig, Placement, QrCodeEcc};
//!
//! let logo = DynamicImage::new_rgba8(60, 30);
//! let config = EncoderConfig::default()
//!     .with_size(400)
//!     .with_ecc(QrCodeEcc::High)
//!     .with_placement(Placement::Centered);
//! let composite = qrlogo::compose("Hello, World!", &logo, &config).unwrap();
//! assert_eq!(composite.dimensions(), (400, 400));
//! ```
//!
//! ## Modules
//!
//! - [`qr`]: QR code rasters from text.
//! - [`helper`]: Logo composition and PNG/base64 output.
//! - [`error`]: The error type.
#![forbid(unsafe_code)]

pub mod error;
pub mod helper;
pub mod qr;

pub use error::{QrLogoError, Result};
pub use helper::{
    compose, encode, encode_to_base64, encode_to_base64_with, encode_with, overlay_logo,
    to_data_url, to_png_bytes, EncoderConfig, Placement, DEFAULT_ECC, DEFAULT_SIZE,
};
pub use qr::{QrCodeEcc, MAX_SIZE};
