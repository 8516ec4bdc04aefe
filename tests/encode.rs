use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, Luma, Pixel, Rgba, RgbaImage};

use qrlogo::qr::generate_image_buffer;
use qrlogo::{EncoderConfig, Placement, QrCodeEcc, QrLogoError};

const URL: &str = "https://example.com";

// Every pixel distinct, so misplaced copies show up.
fn gradient_logo(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 200, 255]));
    DynamicImage::ImageRgba8(img)
}

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn test_logo_is_centered_on_500px_code() {
    let logo = gradient_logo(50, 50);
    let out = decode(&qrlogo::encode(URL, &logo, 500).unwrap());
    let plain = generate_image_buffer(URL, QrCodeEcc::Medium, 500).unwrap();

    assert_eq!(out.dimensions(), (500, 500));

    for (x, y, pixel) in out.enumerate_pixels() {
        let inside = (225..275).contains(&x) && (225..275).contains(&y);
        let expected = if inside {
            logo.as_rgba8().unwrap().get_pixel(x - 225, y - 225).0
        } else {
            plain.get_pixel(x, y).to_rgba().0
        };
        assert_eq!(pixel.0, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn test_zero_size_uses_default() {
    let logo = gradient_logo(20, 20);
    let out = decode(&qrlogo::encode(URL, &logo, 0).unwrap());
    assert_eq!(out.dimensions(), (256, 256));
}

#[test]
fn test_positive_size_overrides_default() {
    let logo = gradient_logo(20, 20);
    let out = decode(&qrlogo::encode(URL, &logo, 321).unwrap());
    assert_eq!(out.dimensions(), (321, 321));
}

#[test]
fn test_empty_logo_is_invalid_argument() {
    let logo = DynamicImage::new_rgba8(0, 0);
    for size in [0, 1, 256, 1000] {
        let err = qrlogo::encode(URL, &logo, size).unwrap_err();
        assert!(matches!(err, QrLogoError::InvalidArgument(_)));
    }
    let err = qrlogo::encode_to_base64("", &logo, 256).unwrap_err();
    assert!(matches!(err, QrLogoError::InvalidArgument(_)));
}

#[test]
fn test_base64_matches_raw_bytes() {
    let logo = gradient_logo(30, 30);
    let raw = qrlogo::encode(URL, &logo, 300).unwrap();
    let b64 = qrlogo::encode_to_base64(URL, &logo, 300).unwrap();
    assert_eq!(STANDARD.decode(b64).unwrap(), raw);
}

#[test]
fn test_output_is_deterministic() {
    let logo = gradient_logo(40, 40);
    let config = EncoderConfig::default().with_size(400).with_ecc(QrCodeEcc::High);
    let first = qrlogo::encode_with(URL, &logo, &config).unwrap();
    let second = qrlogo::encode_with(URL, &logo, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_transparency_is_copied_not_blended() {
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 0])));
    let out = decode(&qrlogo::encode(URL, &logo, 100).unwrap());
    // 100 / 2 - 10 / 2 = 45
    assert_eq!(out.get_pixel(45, 45).0, [255, 0, 0, 0]);
    assert_eq!(out.get_pixel(54, 54).0, [255, 0, 0, 0]);
    assert_eq!(out.get_pixel(55, 55).0[3], 255);
}

#[test]
fn test_grayscale_logo_is_widened() {
    let logo = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(10, 10, Luma([77])));
    let out = decode(&qrlogo::encode(URL, &logo, 100).unwrap());
    assert_eq!(out.get_pixel(50, 50).0, [77, 77, 77, 255]);
}

#[test]
fn test_shared_offset_on_wide_logo() {
    let logo = gradient_logo(60, 20);
    let config = EncoderConfig::default().with_size(200);
    let out = qrlogo::compose(URL, &logo, &config).unwrap();

    // Offset 100 - 30 = 70 on both axes.
    assert_eq!(out.get_pixel(70, 70), logo.as_rgba8().unwrap().get_pixel(0, 0));
    assert_eq!(out.get_pixel(129, 89), logo.as_rgba8().unwrap().get_pixel(59, 19));
}

#[test]
fn test_centered_on_wide_logo() {
    let logo = gradient_logo(60, 20);
    let config = EncoderConfig::default()
        .with_size(200)
        .with_placement(Placement::Centered);
    let out = qrlogo::compose(URL, &logo, &config).unwrap();

    // Horizontal 100 - 30, vertical 100 - 10.
    assert_eq!(out.get_pixel(70, 90), logo.as_rgba8().unwrap().get_pixel(0, 0));
    assert_eq!(out.get_pixel(129, 109), logo.as_rgba8().unwrap().get_pixel(59, 19));
}

#[test]
fn test_logo_larger_than_code_is_clipped() {
    let logo = gradient_logo(50, 50);
    let out = decode(&qrlogo::encode("hi", &logo, 40).unwrap());

    // Offset 20 - 25 = -5: the whole canvas is logo.
    assert_eq!(out.dimensions(), (40, 40));
    for (x, y, pixel) in out.enumerate_pixels() {
        assert_eq!(pixel, logo.as_rgba8().unwrap().get_pixel(x + 5, y + 5));
    }
}

#[test]
fn test_content_too_long_fails_generation() {
    let logo = gradient_logo(10, 10);
    let content = "z".repeat(4000);
    let err = qrlogo::encode(&content, &logo, 256).unwrap_err();
    assert!(matches!(err, QrLogoError::GenerationFailed(_)));
}

#[test]
fn test_data_url_wraps_base64() {
    let logo = gradient_logo(10, 10);
    let raw = qrlogo::encode(URL, &logo, 64).unwrap();
    let url = qrlogo::to_data_url(&raw);
    let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(b64).unwrap(), raw);
}

#[test]
fn test_oversized_request_is_invalid_argument() {
    let logo = gradient_logo(50, 50);
    for size in [qrlogo::MAX_SIZE + 1, 24_000, 1 << 20] {
        let err = qrlogo::encode(URL, &logo, size).unwrap_err();
        assert!(matches!(err, QrLogoError::InvalidArgument(_)), "size {size}");
    }
}
