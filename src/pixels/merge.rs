use crate::error::VizError;

use super::array::{Plane, RgbFrame};

/// How merged channels are assigned to display colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Channels 0, 1, 2 shown as cyan, magenta, yellow.
    #[default]
    Cmy,
    /// Channels 0, 1, 2 shown as red, green, blue.
    Rgb,
}

impl MergeMode {
    pub const ALL: &[MergeMode] = &[MergeMode::Cmy, MergeMode::Rgb];

    pub fn name(self) -> &'static str {
        match self {
            MergeMode::Cmy => "cmy",
            MergeMode::Rgb => "rgb",
        }
    }
}

/// Intensities mapped to 0 and 1 when a channel is rescaled.
///
/// `None` uses the channel's own extremum. An explicit bound may widen the
/// data range but never narrow it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ChannelBounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    fn resolve(&self, plane: &Plane) -> (f64, f64) {
        (
            self.min.unwrap_or_else(|| plane.min()),
            self.max.unwrap_or_else(|| plane.max()),
        )
    }
}

/// Merge two or three channels into an RGB frame with values in [0, 1].
///
/// A missing third channel is treated as all zeros. A channel whose
/// effective bounds coincide becomes a 0/1 mask of its positive pixels.
pub fn merge_channels(
    im_0: &Plane,
    im_1: &Plane,
    im_2: Option<&Plane>,
    bounds: [ChannelBounds; 3],
    mode: MergeMode,
) -> Result<RgbFrame, VizError> {
    im_0.validate()?;
    im_1.validate()?;
    if let Some(p) = im_2 {
        p.validate()?;
    }
    let shape = im_0.shape();
    if im_1.shape() != shape || im_2.is_some_and(|p| p.shape() != shape) {
        return Err(VizError::shape_mismatch(
            "All channels must have the same shape.",
        ));
    }

    let mut supplied: Vec<(&Plane, (f64, f64))> = vec![
        (im_0, bounds[0].resolve(im_0)),
        (im_1, bounds[1].resolve(im_1)),
    ];
    if let Some(p) = im_2 {
        supplied.push((p, bounds[2].resolve(p)));
    }

    if supplied.iter().any(|(p, (_, hi))| *hi < p.max()) {
        return Err(VizError::channel_bound(
            "Inputted max of channel < max of inputted channel.",
        ));
    }
    if supplied.iter().any(|(p, (lo, _))| *lo > p.min()) {
        return Err(VizError::channel_bound(
            "Inputted min of channel > min of inputted channel.",
        ));
    }

    let mut scaled: Vec<Plane> = supplied
        .iter()
        .enumerate()
        .map(|(c, &(p, (lo, hi)))| rescale(c, p, lo, hi))
        .collect();
    if scaled.len() == 2 {
        scaled.push(Plane::zeros(shape.0, shape.1));
    }

    let (rows, cols) = shape;
    let mut data: Vec<[f64; 3]> = match mode {
        MergeMode::Cmy => (0..rows * cols)
            .map(|i| {
                let (c, m, y) = (scaled[0].data[i], scaled[1].data[i], scaled[2].data[i]);
                [m + y, c + y, c + m]
            })
            .collect(),
        MergeMode::Rgb => (0..rows * cols)
            .map(|i| [scaled[0].data[i], scaled[1].data[i], scaled[2].data[i]])
            .collect(),
    };

    if mode == MergeMode::Cmy {
        normalize_each_channel(&mut data);
    }

    Ok(RgbFrame { rows, cols, data })
}

fn rescale(channel: usize, plane: &Plane, lo: f64, hi: f64) -> Plane {
    let data = if hi > lo {
        let span = hi - lo;
        plane.data.iter().map(|&v| (v - lo) / span).collect()
    } else {
        log::debug!("channel {channel} is constant at {lo}, using a positivity mask");
        plane
            .data
            .iter()
            .map(|&v| if v > 0.0 { 1.0 } else { 0.0 })
            .collect()
    };
    Plane {
        rows: plane.rows,
        cols: plane.cols,
        data,
    }
}

/// Divide each output channel by its own maximum. All-zero channels stay zero.
fn normalize_each_channel(data: &mut [[f64; 3]]) {
    for c in 0..3 {
        let max = data.iter().map(|px| px[c]).fold(0.0, f64::max);
        if max > 0.0 {
            for px in data.iter_mut() {
                px[c] /= max;
            }
        }
    }
}
