//! `imshow`: turn an image array into a ready-to-draw figure.

pub mod canvas;
pub mod clicks;
pub mod figure;

use std::sync::Arc;

use crate::color::ColorMapper;
use crate::error::VizError;
use crate::pixels::{ChannelBounds, Image, MergeMode, Plane, RgbFrame, merge_channels};
use crate::style::Toolbar;

pub use clicks::ClickLog;
pub use figure::{Axis, ColorBar, Figure, GlyphRenderer, ImageSource, Layout, Tool};

/// Colour handling requested for `imshow`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColorMapping {
    /// Viridis for intensity images, CMY merge for colour images.
    #[default]
    Auto,
    /// Explicit mapper for an intensity image.
    Mapper(ColorMapper),
    /// A palette name for intensity images, or `rgb`/`cmy` for colour images.
    Named(String),
}

/// Display configuration for `imshow`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImshowParams {
    pub color_mapper: ColorMapping,
    pub frame_height: u32,
    /// Derived from the image aspect ratio when `None`.
    pub frame_width: Option<u32>,
    pub length_units: String,
    pub interpixel_distance: f64,
    /// Only used when `y_range` is also given.
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub colorbar: bool,
    pub no_ticks: bool,
    pub x_axis_label: Option<String>,
    pub y_axis_label: Option<String>,
    pub title: Option<String>,
    /// Put pixel row 0 at the top of the plot.
    pub flip: bool,
    pub return_im: bool,
    pub min_intensity: Option<f64>,
    pub max_intensity: Option<f64>,
    pub display_clicks: bool,
}

impl Default for ImshowParams {
    fn default() -> Self {
        Self {
            color_mapper: ColorMapping::Auto,
            frame_height: 400,
            frame_width: None,
            length_units: "pixels".to_string(),
            interpixel_distance: 1.0,
            x_range: None,
            y_range: None,
            colorbar: false,
            no_ticks: false,
            x_axis_label: None,
            y_axis_label: None,
            title: None,
            flip: true,
            return_im: false,
            min_intensity: None,
            max_intensity: None,
            display_clicks: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Imshow {
    pub layout: Layout,
    /// The image renderer, present when `return_im` was requested.
    pub image: Option<Arc<GlyphRenderer>>,
}

enum Prepared {
    Intensity(Plane, ColorMapper),
    Color(RgbFrame),
}

/// Display an intensity or 1-3 channel image.
pub fn imshow(im: &Image, params: &ImshowParams) -> Result<Imshow, VizError> {
    let im = im.clone().prepare()?;

    let prepared = match im.channels() {
        None => {
            let mut mapper = match &params.color_mapper {
                ColorMapping::Auto => ColorMapper::viridis(),
                ColorMapping::Mapper(m) => m.clone(),
                ColorMapping::Named(name) => ColorMapper::named(name)?,
            };
            mapper.low = params.min_intensity.unwrap_or_else(|| im.min());
            mapper.high = params.max_intensity.unwrap_or_else(|| im.max());
            Prepared::Intensity(im.to_plane()?, mapper)
        }
        Some(_) => {
            let mode = merge_mode(&params.color_mapper)?;
            let planes = im.planes();
            let bounds = [ChannelBounds::new(params.min_intensity, params.max_intensity); 3];
            log::debug!("merging {} channels as {}", planes.len(), mode.name());
            let merged = merge_channels(&planes[0], &planes[1], planes.get(2), bounds, mode)?;
            Prepared::Color(merged)
        }
    };

    let (n, m) = (im.rows(), im.cols());
    let (x_range, y_range) = match (params.x_range, params.y_range) {
        (Some(x), Some(y)) => (x, y),
        _ => (
            (0.0, m as f64 * params.interpixel_distance),
            (0.0, n as f64 * params.interpixel_distance),
        ),
    };
    let dw = x_range.1 - x_range.0;
    let dh = y_range.1 - y_range.0;

    let frame_width = params
        .frame_width
        .unwrap_or((m as f64 / n as f64 * params.frame_height as f64) as u32);

    let mut figure = Figure::new(frame_width, params.frame_height, x_range, y_range);
    figure.title = params.title.clone();
    figure.toolbar_location = if params.colorbar {
        Toolbar::Above
    } else {
        Toolbar::Right
    };

    if params.no_ticks {
        figure.x_axis = Axis::bare();
        figure.y_axis = Axis::bare();
    } else {
        let units = &params.length_units;
        figure.x_axis = Axis::labeled(params.x_axis_label.as_deref().unwrap_or(units));
        figure.y_axis = Axis::labeled(params.y_axis_label.as_deref().unwrap_or(units));
    }

    let (source, mapper) = match prepared {
        Prepared::Intensity(plane, mapper) => {
            let image = if params.flip { plane.flipud() } else { plane };
            let source = ImageSource::Intensity {
                image,
                color_mapper: mapper.clone(),
            };
            (source, Some(mapper))
        }
        Prepared::Color(frame) => (ImageSource::Rgba(frame.to_rgba32(params.flip)?), None),
    };

    let glyph = figure.add_glyph(GlyphRenderer {
        x: x_range.0,
        y: y_range.0,
        dw,
        dh,
        source,
    });

    if params.colorbar {
        match mapper {
            Some(mapper) => figure.colorbar = Some(ColorBar::new(mapper)),
            None => log::warn!("No colorbar display for RGB images."),
        }
    }

    let layout = if params.display_clicks {
        Layout::Row {
            figure,
            clicks: ClickLog::new(),
        }
    } else {
        Layout::Figure(figure)
    };

    Ok(Imshow {
        layout,
        image: params.return_im.then_some(glyph),
    })
}

fn merge_mode(mapping: &ColorMapping) -> Result<MergeMode, VizError> {
    match mapping {
        ColorMapping::Auto => Ok(MergeMode::Cmy),
        ColorMapping::Named(name) if name.eq_ignore_ascii_case("cmy") => Ok(MergeMode::Cmy),
        ColorMapping::Named(name) if name.eq_ignore_ascii_case("rgb") => Ok(MergeMode::Rgb),
        _ => Err(VizError::color_mapper("Invalid color mapper for color image.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn merge_mode_from_mapping() {
        assert_eq!(merge_mode(&ColorMapping::Auto).unwrap(), MergeMode::Cmy);
        assert_eq!(
            merge_mode(&ColorMapping::Named("RGB".into())).unwrap(),
            MergeMode::Rgb
        );
        assert_eq!(
            merge_mode(&ColorMapping::Named("Cmy".into())).unwrap(),
            MergeMode::Cmy
        );
        for bad in [
            ColorMapping::Named("viridis".into()),
            ColorMapping::Mapper(ColorMapper::viridis()),
        ] {
            assert_eq!(merge_mode(&bad).unwrap_err().kind, ErrorKind::InvalidColorMapper);
        }
    }

    #[test]
    fn default_params() {
        let p = ImshowParams::default();
        assert_eq!(p.frame_height, 400);
        assert_eq!(p.length_units, "pixels");
        assert!(p.flip);
        assert!(!p.colorbar && !p.no_ticks && !p.return_im && !p.display_clicks);
    }
}
