//! Fixture writers shared by unit tests.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Deterministic noisy pattern so encoded files don't compress to nothing.
fn noise(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(40503)) ^ x.wrapping_mul(y);
        Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
    })
}

/// Encoders are chosen explicitly so a misleading extension stays misleading.
pub fn write_png(path: &Path, width: u32, height: u32) {
    noise(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    noise(width, height)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

pub fn write_gif(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
        .save_with_format(path, ImageFormat::Gif)
        .unwrap();
}

/// A PNG whose header is intact but whose pixel data is cut in half.
pub fn write_truncated_png(path: &Path, width: u32, height: u32) {
    let full = path.with_extension("full.png");
    write_png(&full, width, height);
    let bytes = std::fs::read(&full).unwrap();
    std::fs::remove_file(&full).unwrap();
    std::fs::write(path, &bytes[..bytes.len() / 2]).unwrap();
}
