//! QR symbol encoding and decoding.
//!
//! Thin wrapper over the `qrcode` and `rqrr` crates. The payload codec
//! treats this module as a collaborator that turns text into an image and
//! back; it must preserve the text byte-for-byte through a round trip.

use std::path::Path;

use image::{DynamicImage, Luma, Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};

use crate::error::{QuickScanError, Result};

/// QR error-correction level.
///
/// Higher levels tolerate more symbol damage at the cost of density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Rendering options for a generated QR symbol.
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Minimum output dimension in pixels (the symbol is scaled up in
    /// whole-module steps, so the result may be slightly larger).
    pub size: u32,
    pub ec_level: ErrorCorrection,
    /// Module (dark) color as RGB.
    pub foreground: [u8; 3],
    /// Background (light) color as RGB.
    pub background: [u8; 3],
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 300,
            ec_level: ErrorCorrection::default(),
            foreground: [0x00, 0x00, 0x00],
            background: [0xFF, 0xFF, 0xFF],
        }
    }
}

/// Encode text into a QR symbol image.
///
/// The symbol is rendered with a quiet zone and scaled to at least
/// `opts.size` pixels on each side, then colored with the configured
/// foreground and background.
///
/// # Errors
///
/// Returns `QuickScanError::QrEncode` if the text does not fit any QR
/// version at the requested error-correction level.
pub fn encode(text: &str, opts: &QrOptions) -> Result<RgbImage> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), opts.ec_level.into())?;

    let mono = code
        .render::<Luma<u8>>()
        .min_dimensions(opts.size, opts.size)
        .quiet_zone(true)
        .build();

    let (width, height) = mono.dimensions();
    let mut colored = RgbImage::new(width, height);
    for (x, y, pixel) in mono.enumerate_pixels() {
        let rgb = if pixel.0[0] == 0 {
            opts.foreground
        } else {
            opts.background
        };
        colored.put_pixel(x, y, Rgb(rgb));
    }

    Ok(colored)
}

/// Decode the first readable QR symbol in an image.
///
/// Returns `Ok(None)` when no symbol is found. Every detected grid is
/// tried; an undecodable grid does not fail the whole scan.
pub fn decode(image: &DynamicImage) -> Result<Option<String>> {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    for grid in prepared.detect_grids() {
        if let Ok((_meta, content)) = grid.decode() {
            return Ok(Some(content));
        }
    }

    Ok(None)
}

/// Save a rendered QR symbol as a PNG file, atomically.
///
/// The image is written to a temporary sibling first and renamed into
/// place, so a crash mid-write never leaves a truncated file at `path`.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| QuickScanError::InvalidInput(format!("Not a file path: {}", path.display())))?;

    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    image
        .save_with_format(&temp_path, image::ImageFormat::Png)
        .map_err(|e| QuickScanError::Image(format!("Failed to write {}: {}", temp_path.display(), e)))?;

    if let Err(initial_err) = std::fs::rename(&temp_path, path) {
        // Windows refuses to rename over an existing file; replace and retry.
        let _ = std::fs::remove_file(path);
        if let Err(retry_err) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(QuickScanError::Image(format!(
                "Failed to save {} (initial: {}, retry: {})",
                path.display(),
                initial_err,
                retry_err
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_minimum_dimensions() {
        let img = encode("hello world", &QrOptions::default()).unwrap();
        assert!(img.width() >= 300);
        assert!(img.height() >= 300);
    }

    #[test]
    fn test_encode_uses_configured_colors() {
        let opts = QrOptions {
            foreground: [0x10, 0x20, 0x30],
            background: [0xF0, 0xE0, 0xD0],
            ..QrOptions::default()
        };
        let img = encode("hello world", &opts).unwrap();

        // Corner pixel sits in the quiet zone
        assert_eq!(img.get_pixel(0, 0).0, opts.background);
        let has_foreground = img.pixels().any(|p| p.0 == opts.foreground);
        assert!(has_foreground);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let text = "https://example.com/some/path?q=1";
        let img = encode(text, &QrOptions::default()).unwrap();

        let decoded = decode(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(decoded.as_deref(), Some(text));
    }

    #[test]
    fn test_decode_blank_image_returns_none() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 200, Rgb([255, 255, 255])));
        assert_eq!(decode(&blank).unwrap(), None);
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");

        let img = encode("saved symbol", &QrOptions::default()).unwrap();
        save_png(&img, &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(decode(&reloaded).unwrap().as_deref(), Some("saved symbol"));
    }

    #[test]
    fn test_save_png_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        std::fs::write(&path, b"stale").unwrap();

        let img = encode("fresh symbol", &QrOptions::default()).unwrap();
        save_png(&img, &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(decode(&reloaded).unwrap().as_deref(), Some("fresh symbol"));
    }
}
