//! Synthetic images for the viewer, one per input kind `imshow` accepts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

use crate::error::{ErrorKind, VizError};
use crate::pixels::Image;

const SEED: u64 = 0x5eed_b007;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoImage {
    /// 12-bit fluorescence-like spots with camera noise.
    Spots12Bit,
    /// 8-bit horizontal ramp with a little read noise.
    Gradient8Bit,
    /// Thresholded spots.
    Mask,
    /// A single-channel stack, squeezed away before display.
    SingleChannel,
    /// Two fluorescence channels.
    TwoChannel,
    /// Three fluorescence channels.
    ThreeChannel,
}

impl DemoImage {
    pub const ALL: &[DemoImage] = &[
        DemoImage::Spots12Bit,
        DemoImage::Gradient8Bit,
        DemoImage::Mask,
        DemoImage::SingleChannel,
        DemoImage::TwoChannel,
        DemoImage::ThreeChannel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoImage::Spots12Bit => "Spots (12-bit)",
            DemoImage::Gradient8Bit => "Gradient (8-bit)",
            DemoImage::Mask => "Mask (bool)",
            DemoImage::SingleChannel => "Single channel stack",
            DemoImage::TwoChannel => "Two channels",
            DemoImage::ThreeChannel => "Three channels",
        }
    }

    /// Build the image at `rows x cols`. The same variant always yields the same pixels.
    pub fn generate(self, rows: usize, cols: usize) -> Result<Image, VizError> {
        if rows == 0 || cols == 0 {
            return Err(VizError::new(ErrorKind::EmptyImage, "Demo image needs pixels."));
        }
        let mut rng = StdRng::seed_from_u64(SEED);
        match self {
            DemoImage::Spots12Bit => {
                Image::gray(rows, cols, to_counts(spots(&mut rng, rows, cols, 4095.0)))
            }
            DemoImage::Gradient8Bit => Image::gray(rows, cols, gradient(&mut rng, rows, cols)),
            DemoImage::Mask => {
                let field = spots(&mut rng, rows, cols, 4095.0);
                let mask: Vec<bool> = field.iter().map(|&v| v > 1500.0).collect();
                Image::gray(rows, cols, mask)
            }
            DemoImage::SingleChannel => {
                Image::stacked(rows, cols, 1, to_counts(spots(&mut rng, rows, cols, 255.0)))
            }
            DemoImage::TwoChannel => stack(&mut rng, rows, cols, 2),
            DemoImage::ThreeChannel => stack(&mut rng, rows, cols, 3),
        }
    }
}

fn stack(rng: &mut StdRng, rows: usize, cols: usize, channels: usize) -> Result<Image, VizError> {
    let planes: Vec<Vec<f64>> = (0..channels)
        .map(|_| spots(rng, rows, cols, 4095.0))
        .collect();
    let mut data = Vec::with_capacity(rows * cols * channels);
    for i in 0..rows * cols {
        data.extend(planes.iter().map(|p| p[i].round() as i64));
    }
    Image::stacked(rows, cols, channels, data)
}

fn to_counts(field: Vec<f64>) -> Vec<i64> {
    field.into_iter().map(|v| v.round() as i64).collect()
}

/// Gaussian spots on a dark background, shot and read noise applied,
/// clipped to `[0, full_scale]`.
fn spots(rng: &mut StdRng, rows: usize, cols: usize, full_scale: f64) -> Vec<f64> {
    let background = full_scale * 0.05;
    let n_spots = ((rows * cols) / 400).max(3);
    let sigma = (rows.min(cols) as f64 / 20.0).max(1.0);
    let centers: Vec<(f64, f64, f64)> = (0..n_spots)
        .map(|_| {
            (
                rng.random_range(0.0..rows as f64),
                rng.random_range(0.0..cols as f64),
                rng.random_range(0.3..0.9) * full_scale,
            )
        })
        .collect();

    let read = Normal::new(0.0, full_scale * 0.005).ok();
    let mut field = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let mut signal = background;
            for &(cr, cc, amp) in &centers {
                let d2 = (r as f64 - cr).powi(2) + (c as f64 - cc).powi(2);
                signal += amp * (-d2 / (2.0 * sigma * sigma)).exp();
            }
            if let Ok(shot) = Poisson::new(signal.max(1e-3)) {
                signal = shot.sample(rng);
            }
            if let Some(read) = &read {
                signal += read.sample(rng);
            }
            field.push(signal.clamp(0.0, full_scale));
        }
    }
    field
}

fn gradient(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<i64> {
    let noise = Normal::new(0.0, 2.0).ok();
    let span = cols.saturating_sub(1).max(1) as f64;
    let mut data = Vec::with_capacity(rows * cols);
    for _ in 0..rows {
        for c in 0..cols {
            let mut v = c as f64 / span * 255.0;
            if let Some(noise) = &noise {
                v += noise.sample(rng);
            }
            data.push(v.round().clamp(0.0, 255.0) as i64);
        }
    }
    data
}
