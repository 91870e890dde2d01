//! Image arrays handed to the display helpers.
//!
//! `Image` mirrors an n-dimensional array: `rows x cols` for an intensity
//! image or `rows x cols x channels` with the channel axis innermost.
//! `Plane` and `RgbFrame` are the floating-point working forms used by the
//! merge and packing steps.

use crate::error::{ErrorKind, VizError};

/// Largest value an 8-bit image can hold; anything brighter is rescaled.
pub const MAX_8BIT: f64 = 255.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::Bool(v) => v.len(),
            PixelData::Int(v) => v.len(),
            PixelData::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> f64 {
        match self {
            PixelData::Bool(v) => v[i] as u8 as f64,
            PixelData::Int(v) => v[i] as f64,
            PixelData::Float(v) => v[i],
        }
    }

    pub fn to_f64(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    pub fn max(&self) -> f64 {
        (0..self.len())
            .map(|i| self.get(i))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        (0..self.len())
            .map(|i| self.get(i))
            .fold(f64::INFINITY, f64::min)
    }
}

impl From<Vec<bool>> for PixelData {
    fn from(v: Vec<bool>) -> Self {
        PixelData::Bool(v)
    }
}

impl From<Vec<i64>> for PixelData {
    fn from(v: Vec<i64>) -> Self {
        PixelData::Int(v)
    }
}

impl From<Vec<u8>> for PixelData {
    fn from(v: Vec<u8>) -> Self {
        PixelData::Int(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<u16>> for PixelData {
    fn from(v: Vec<u16>) -> Self {
        PixelData::Int(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for PixelData {
    fn from(v: Vec<f64>) -> Self {
        PixelData::Float(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    rows: usize,
    cols: usize,
    /// `None` for a 2D image.
    channels: Option<usize>,
    data: PixelData,
}

impl Image {
    /// Build from an array shape (2 or 3 dimensions) and row-major data.
    pub fn new(shape: &[usize], data: impl Into<PixelData>) -> Result<Self, VizError> {
        let data = data.into();
        let (rows, cols, channels) = match *shape {
            [rows, cols] => (rows, cols, None),
            [rows, cols, channels] => (rows, cols, Some(channels)),
            _ => {
                return Err(VizError::dimensions(format!(
                    "Input image array must have either 2 or 3 dimensions, got {}.",
                    shape.len()
                )));
            }
        };
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(VizError::dimensions(format!(
                "Shape {shape:?} needs {expected} values, got {}.",
                data.len()
            )));
        }
        if data.is_empty() {
            return Err(VizError::new(ErrorKind::EmptyImage, "Image has no pixels."));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            data,
        })
    }

    pub fn gray(rows: usize, cols: usize, data: impl Into<PixelData>) -> Result<Self, VizError> {
        Self::new(&[rows, cols], data)
    }

    pub fn stacked(
        rows: usize,
        cols: usize,
        channels: usize,
        data: impl Into<PixelData>,
    ) -> Result<Self, VizError> {
        Self::new(&[rows, cols, channels], data)
    }

    /// Interleave same-shaped planes into a `rows x cols x n` image.
    pub fn from_planes(planes: &[Plane]) -> Result<Self, VizError> {
        let Some(first) = planes.first() else {
            return Err(VizError::new(ErrorKind::EmptyImage, "No channels given."));
        };
        if planes.iter().any(|p| p.shape() != first.shape()) {
            return Err(VizError::shape_mismatch("All channels must have the same shape."));
        }
        let n = planes.len();
        let mut data = vec![0.0; first.data.len() * n];
        for (c, plane) in planes.iter().enumerate() {
            for (i, &v) in plane.data.iter().enumerate() {
                data[i * n + c] = v;
            }
        }
        Self::stacked(first.rows, first.cols, n, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ndim(&self) -> usize {
        if self.channels.is_some() { 3 } else { 2 }
    }

    pub fn channels(&self) -> Option<usize> {
        self.channels
    }

    pub fn shape(&self) -> Vec<usize> {
        match self.channels {
            Some(c) => vec![self.rows, self.cols, c],
            None => vec![self.rows, self.cols],
        }
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn max(&self) -> f64 {
        self.data.max()
    }

    pub fn min(&self) -> f64 {
        self.data.min()
    }

    /// Drop a length-1 channel axis.
    pub fn squeeze(mut self) -> Self {
        if self.channels == Some(1) {
            self.channels = None;
        }
        self
    }

    /// Boolean pixels become 0/1 integers.
    pub fn coerce_bool(mut self) -> Self {
        if let PixelData::Bool(v) = &self.data {
            self.data = PixelData::Int(v.iter().map(|&b| b as i64).collect());
        }
        self
    }

    /// Rescale by the image maximum when it exceeds the 8-bit range.
    pub fn normalize(mut self) -> Self {
        let max = self.max();
        if max > MAX_8BIT {
            log::debug!("normalizing image with max {max} to [0, 1]");
            let scaled = self.data.to_f64().into_iter().map(|v| v / max).collect();
            self.data = PixelData::Float(scaled);
        }
        self
    }

    /// Squeeze, check the channel count, then coerce and normalise values.
    pub fn prepare(self) -> Result<Self, VizError> {
        let im = self.squeeze();
        if let Some(c) = im.channels {
            if !(2..=3).contains(&c) {
                return Err(VizError::channel_count(c));
            }
        }
        Ok(im.coerce_bool().normalize())
    }

    /// Extract channel `c` (0 for a 2D image).
    pub fn channel(&self, c: usize) -> Option<Plane> {
        let n = self.channels.unwrap_or(1);
        if c >= n {
            return None;
        }
        let data = (0..self.rows * self.cols)
            .map(|i| self.data.get(i * n + c))
            .collect();
        Some(Plane {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub fn planes(&self) -> Vec<Plane> {
        (0..self.channels.unwrap_or(1))
            .filter_map(|c| self.channel(c))
            .collect()
    }

    /// The image as a single plane; fails for multi-channel images.
    pub fn to_plane(&self) -> Result<Plane, VizError> {
        match self.channels {
            None | Some(1) => Ok(Plane {
                rows: self.rows,
                cols: self.cols,
                data: self.data.to_f64(),
            }),
            Some(c) => Err(VizError::dimensions(format!(
                "Expected a single-channel image, got {c} channels."
            ))),
        }
    }
}

/// Single-channel floating-point image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Plane {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, VizError> {
        let plane = Self { rows, cols, data };
        plane.validate()?;
        Ok(plane)
    }

    /// Fields are public, so a plane may have been built by hand: check that
    /// it holds exactly `rows * cols` values and at least one pixel.
    pub fn validate(&self) -> Result<(), VizError> {
        let (rows, cols) = self.shape();
        if rows * cols != self.data.len() {
            return Err(VizError::dimensions(format!(
                "{rows}x{cols} plane needs {} values, got {}.",
                rows * cols,
                self.data.len()
            )));
        }
        if self.data.is_empty() {
            return Err(VizError::new(ErrorKind::EmptyImage, "Image has no pixels."));
        }
        Ok(())
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Reverse row order.
    pub fn flipud(&self) -> Self {
        let data = self
            .data
            .chunks(self.cols)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

/// Three-channel floating-point image, row-major, nominally in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<[f64; 3]>,
}

impl RgbFrame {
    pub fn from_image(im: &Image) -> Result<Self, VizError> {
        if im.channels != Some(3) {
            return Err(VizError::new(ErrorKind::NotRgb, "Input image is not RGB."));
        }
        let data = (0..im.rows * im.cols)
            .map(|i| {
                [
                    im.data.get(3 * i),
                    im.data.get(3 * i + 1),
                    im.data.get(3 * i + 2),
                ]
            })
            .collect();
        Ok(Self {
            rows: im.rows,
            cols: im.cols,
            data,
        })
    }

    pub fn to_image(&self) -> Image {
        Image {
            rows: self.rows,
            cols: self.cols,
            channels: Some(3),
            data: PixelData::Float(self.data.iter().flatten().copied().collect()),
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [f64; 3] {
        self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_shapes() {
        let err = Image::new(&[4], vec![0u8; 4]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDimensions);
        let err = Image::new(&[2, 2, 2, 1], vec![0u8; 8]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDimensions);
        let err = Image::gray(2, 3, vec![0u8; 5]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDimensions);
        let err = Image::gray(0, 3, Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyImage);
    }

    #[test]
    fn prepare_squeezes_single_channel() {
        let im = Image::stacked(2, 2, 1, vec![1u8, 2, 3, 4]).unwrap();
        let im = im.prepare().unwrap();
        assert_eq!(im.shape(), vec![2, 2]);
        assert_eq!(im.data(), &PixelData::Int(vec![1, 2, 3, 4]));
    }

    #[test]
    fn prepare_rejects_four_channels() {
        let im = Image::stacked(1, 1, 4, vec![0u8; 4]).unwrap();
        let err = im.prepare().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedChannelCount);
    }

    #[test]
    fn bool_images_become_integers() {
        let im = Image::gray(1, 3, vec![true, false, true]).unwrap().prepare().unwrap();
        assert_eq!(im.data(), &PixelData::Int(vec![1, 0, 1]));
    }

    #[test]
    fn eight_bit_images_are_untouched() {
        let raw = vec![0u8, 17, 255, 128, 3, 9];
        let im = Image::gray(2, 3, raw.clone()).unwrap().prepare().unwrap();
        assert_eq!(im.data(), &PixelData::from(raw));

        let floats = vec![0.0, 0.5, 254.9, 3.25];
        let im = Image::gray(2, 2, floats.clone()).unwrap().prepare().unwrap();
        assert_eq!(im.data(), &PixelData::Float(floats));
    }

    #[test]
    fn deep_images_are_scaled_by_max() {
        let raw: Vec<u16> = vec![0, 256, 1024, 4095];
        let im = Image::gray(2, 2, raw.clone()).unwrap().prepare().unwrap();
        let PixelData::Float(v) = im.data() else {
            panic!("expected float data, got {:?}", im.data());
        };
        for (out, inp) in v.iter().zip(&raw) {
            assert_eq!(*out, *inp as f64 / 4095.0);
        }
        assert_eq!(im.max(), 1.0);
    }

    #[test]
    fn channel_extraction_and_interleave() {
        let im = Image::stacked(1, 2, 3, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let planes = im.planes();
        assert_eq!(planes.len(), 3);
        assert_eq!(planes[0].data, vec![1.0, 4.0]);
        assert_eq!(planes[2].data, vec![3.0, 6.0]);
        assert!(im.channel(3).is_none());
        let back = Image::from_planes(&planes).unwrap();
        assert_eq!(back.planes(), planes);
    }

    #[test]
    fn plane_flipud_reverses_rows() {
        let p = Plane::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(p.flipud().data, vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        assert_eq!(p.flipud().flipud(), p);
    }

    #[test]
    fn rgb_frame_requires_three_channels() {
        let im = Image::stacked(1, 1, 2, vec![0.1, 0.2]).unwrap();
        assert_eq!(RgbFrame::from_image(&im).unwrap_err().kind, ErrorKind::NotRgb);
        let gray = Image::gray(1, 1, vec![0.1]).unwrap();
        assert_eq!(RgbFrame::from_image(&gray).unwrap_err().kind, ErrorKind::NotRgb);
        let rgb = Image::stacked(1, 2, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let frame = RgbFrame::from_image(&rgb).unwrap();
        assert_eq!(frame.get(0, 1), [0.4, 0.5, 0.6]);
        assert_eq!(frame.to_image(), rgb);
    }
}
