use image::{Rgba, RgbaImage, imageops};

use crate::error::VizError;

use super::array::{Image, RgbFrame};

/// One `u32` per pixel holding R, G, B, A bytes in little-endian order.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedImage {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<u32>,
}

impl PackedImage {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[row * self.cols + col]
    }

    /// Split a packed pixel back into `[r, g, b, a]`.
    #[inline]
    pub fn unpack(pixel: u32) -> [u8; 4] {
        pixel.to_le_bytes()
    }

    /// Bytes in RGBA order, row by row.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}

/// Convert a value in [0, 1] to 8-bit depth, rounding to nearest.
#[inline]
pub fn frac_to_ubyte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Pack an `rows x cols x 3` image with values in [0, 1] into RGBA32 pixels.
///
/// With `flip` the row order is reversed so row 0 ends up at the bottom.
pub fn rgb_to_rgba32(im: &Image, flip: bool) -> Result<PackedImage, VizError> {
    RgbFrame::from_image(im)?.to_rgba32(flip)
}

impl RgbFrame {
    pub fn to_rgba32(&self, flip: bool) -> Result<PackedImage, VizError> {
        if self
            .data
            .iter()
            .flatten()
            .any(|v| !(0.0..=1.0).contains(v))
        {
            return Err(VizError::out_of_range(
                "All pixel values must be between 0 and 1.",
            ));
        }

        let mut rgba = RgbaImage::from_fn(self.cols as u32, self.rows as u32, |x, y| {
            let [r, g, b] = self.get(y as usize, x as usize);
            Rgba([frac_to_ubyte(r), frac_to_ubyte(g), frac_to_ubyte(b), 255])
        });
        if flip {
            imageops::flip_vertical_in_place(&mut rgba);
        }

        Ok(PackedImage {
            rows: self.rows,
            cols: self.cols,
            data: rgba.pixels().map(|p| u32::from_le_bytes(p.0)).collect(),
        })
    }
}
