//! Flattened RGB pixel vectors rendered to RGBA rasters for preview.

use crate::utils::error::{PortalError, Result};
use base64::Engine;
use image::{Rgba, RgbaImage};
use std::io::Cursor;

/// Converts a comma-separated integer list (interleaved R,G,B) into a
/// `width`×`height` RGBA raster. Channels are clamped to `[0, 255]`, indices
/// past the end of the list read as 0 and alpha is fixed at 255. Any
/// unparsable token fails the whole conversion.
pub fn vector_to_raster(vector: &str, width: u32, height: u32) -> Result<RgbaImage> {
    let channels = vector
        .split(',')
        .map(|token| token.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|e| PortalError::ConversionError {
            message: format!("invalid channel value: {}", e),
        })?;

    let mut raster = RgbaImage::new(width, height);
    for (index, pixel) in raster.pixels_mut().enumerate() {
        let offset = index * 3;
        *pixel = Rgba([
            channel_at(&channels, offset),
            channel_at(&channels, offset + 1),
            channel_at(&channels, offset + 2),
            255,
        ]);
    }

    Ok(raster)
}

fn channel_at(channels: &[i64], offset: usize) -> u8 {
    channels.get(offset).copied().unwrap_or(0).clamp(0, 255) as u8
}

pub fn raster_to_png(raster: &RgbaImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    raster.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

pub fn raster_to_png_base64(raster: &RgbaImage) -> Result<String> {
    Ok(base64::engine::general_purpose::STANDARD.encode(raster_to_png(raster)?))
}
