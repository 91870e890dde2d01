//! Backend-neutral plot model produced by `imshow`.

use std::sync::Arc;

use image::RgbaImage;

use crate::color::ColorMapper;
use crate::pixels::{PackedImage, Plane};
use crate::style::Toolbar;

use super::clicks::ClickLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pan,
    BoxZoom,
    WheelZoom,
    Save,
    Reset,
}

impl Tool {
    pub const IMAGE_TOOLS: &[Tool] = &[
        Tool::Pan,
        Tool::BoxZoom,
        Tool::WheelZoom,
        Tool::Save,
        Tool::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pan => "pan",
            Tool::BoxZoom => "box_zoom",
            Tool::WheelZoom => "wheel_zoom",
            Tool::Save => "save",
            Tool::Reset => "reset",
        }
    }

    /// Pan and box zoom act on pointer drags; only one can be active.
    pub fn is_drag(self) -> bool {
        matches!(self, Tool::Pan | Tool::BoxZoom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: Option<String>,
    pub major_labels: bool,
    pub ticks: bool,
}

impl Axis {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            major_labels: true,
            ticks: true,
        }
    }

    /// No tick marks and no tick labels.
    pub fn bare() -> Self {
        Self {
            label: None,
            major_labels: false,
            ticks: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Scalar image coloured through a mapper, rows bottom to top.
    Intensity {
        image: Plane,
        color_mapper: ColorMapper,
    },
    /// Pre-coloured RGBA32 pixels, rows bottom to top.
    Rgba(PackedImage),
}

/// An image placed in data space with its lower-left corner at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRenderer {
    pub x: f64,
    pub y: f64,
    pub dw: f64,
    pub dh: f64,
    pub source: ImageSource,
}

impl GlyphRenderer {
    pub fn pixel_shape(&self) -> (usize, usize) {
        match &self.source {
            ImageSource::Intensity { image, .. } => image.shape(),
            ImageSource::Rgba(packed) => (packed.rows, packed.cols),
        }
    }

    /// RGBA bytes with the top image row first.
    pub fn rgba_top_down(&self) -> Vec<u8> {
        match &self.source {
            ImageSource::Intensity {
                image,
                color_mapper,
            } => image
                .data
                .chunks(image.cols)
                .rev()
                .flatten()
                .flat_map(|&v| color_mapper.map(v))
                .collect(),
            ImageSource::Rgba(packed) => packed
                .data
                .chunks(packed.cols)
                .rev()
                .flatten()
                .flat_map(|p| PackedImage::unpack(*p))
                .collect(),
        }
    }

    /// The glyph as an image buffer, top row first, ready to save.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let (rows, cols) = self.pixel_shape();
        RgbaImage::from_raw(cols as u32, rows as u32, self.rgba_top_down())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub color_mapper: ColorMapper,
    pub label_standoff: u32,
    pub border_line: bool,
    pub location: (f64, f64),
}

impl ColorBar {
    pub fn new(color_mapper: ColorMapper) -> Self {
        Self {
            color_mapper,
            label_standoff: 12,
            border_line: false,
            location: (0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub frame_width: u32,
    pub frame_height: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub title: Option<String>,
    pub toolbar_location: Toolbar,
    pub tools: Vec<Tool>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub renderers: Vec<Arc<GlyphRenderer>>,
    /// Drawn to the right of the frame.
    pub colorbar: Option<ColorBar>,
}

impl Figure {
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Self {
        Self {
            frame_width,
            frame_height,
            x_range,
            y_range,
            title: None,
            toolbar_location: Toolbar::Right,
            tools: Tool::IMAGE_TOOLS.to_vec(),
            x_axis: Axis::bare(),
            y_axis: Axis::bare(),
            renderers: Vec::new(),
            colorbar: None,
        }
    }

    pub fn add_glyph(&mut self, glyph: GlyphRenderer) -> Arc<GlyphRenderer> {
        let glyph = Arc::new(glyph);
        self.renderers.push(Arc::clone(&glyph));
        glyph
    }

    /// Data coordinates of a point given as fractions of the frame,
    /// measured from the left and from the top.
    pub fn frame_to_data(&self, fx: f64, fy: f64) -> (f64, f64) {
        Viewport::of(self).frame_to_data(fx, fy)
    }
}

/// Visible data window of a figure, moved by the pan and zoom tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Viewport {
    pub fn of(figure: &Figure) -> Self {
        Self {
            x_range: figure.x_range,
            y_range: figure.y_range,
        }
    }

    /// Same convention as `Figure::frame_to_data`.
    pub fn frame_to_data(&self, fx: f64, fy: f64) -> (f64, f64) {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        (x0 + fx * (x1 - x0), y1 - fy * (y1 - y0))
    }

    /// Move the content by fractions of the frame, right and down positive.
    pub fn pan(&mut self, dfx: f64, dfy: f64) {
        let dx = dfx * (self.x_range.1 - self.x_range.0);
        let dy = dfy * (self.y_range.1 - self.y_range.0);
        self.x_range = (self.x_range.0 - dx, self.x_range.1 - dx);
        self.y_range = (self.y_range.0 + dy, self.y_range.1 + dy);
    }

    /// Scale the window by `factor` around a frame point; below 1 zooms in.
    pub fn zoom(&mut self, factor: f64, fx: f64, fy: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let (ax, ay) = self.frame_to_data(fx, fy);
        let scale = |(lo, hi): (f64, f64), anchor: f64| {
            (anchor - (anchor - lo) * factor, anchor + (hi - anchor) * factor)
        };
        self.x_range = scale(self.x_range, ax);
        self.y_range = scale(self.y_range, ay);
    }

    /// Show exactly the box between two frame points. Returns false and
    /// leaves the window alone when the box has no area.
    pub fn zoom_to(&mut self, a: (f64, f64), b: (f64, f64)) -> bool {
        let (ax, ay) = self.frame_to_data(a.0, a.1);
        let (bx, by) = self.frame_to_data(b.0, b.1);
        if ax == bx || ay == by {
            return false;
        }
        self.x_range = (ax.min(bx), ax.max(bx));
        self.y_range = (ay.min(by), ay.max(by));
        true
    }
}

/// What `imshow` hands to the backend: the figure alone, or the figure with
/// a click log panel beside it.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Figure(Figure),
    Row { figure: Figure, clicks: ClickLog },
}

impl Layout {
    pub fn figure(&self) -> &Figure {
        match self {
            Layout::Figure(figure) | Layout::Row { figure, .. } => figure,
        }
    }

    pub fn click_log(&self) -> Option<&ClickLog> {
        match self {
            Layout::Figure(_) => None,
            Layout::Row { clicks, .. } => Some(clicks),
        }
    }

    pub fn click_log_mut(&mut self) -> Option<&mut ClickLog> {
        match self {
            Layout::Figure(_) => None,
            Layout::Row { clicks, .. } => Some(clicks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_fractions_map_to_data() {
        let fig = Figure::new(200, 100, (0.0, 20.0), (0.0, 10.0));
        assert_eq!(fig.frame_to_data(0.0, 0.0), (0.0, 10.0));
        assert_eq!(fig.frame_to_data(1.0, 1.0), (20.0, 0.0));
        assert_eq!(fig.frame_to_data(0.25, 0.5), (5.0, 5.0));
    }

    #[test]
    fn glyph_bytes_are_top_down() {
        let image = Plane::new(2, 1, vec![0.0, 1.0]).unwrap();
        let glyph = GlyphRenderer {
            x: 0.0,
            y: 0.0,
            dw: 1.0,
            dh: 2.0,
            source: ImageSource::Intensity {
                image,
                color_mapper: ColorMapper::greys(),
            },
        };
        assert_eq!(glyph.pixel_shape(), (2, 1));
        assert_eq!(glyph.rgba_top_down(), vec![255, 255, 255, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn add_glyph_shares_the_renderer() {
        let mut fig = Figure::new(10, 10, (0.0, 1.0), (0.0, 1.0));
        let packed = PackedImage {
            rows: 1,
            cols: 1,
            data: vec![0xff00_00ff],
        };
        let handle = fig.add_glyph(GlyphRenderer {
            x: 0.0,
            y: 0.0,
            dw: 1.0,
            dh: 1.0,
            source: ImageSource::Rgba(packed),
        });
        assert!(Arc::ptr_eq(&handle, &fig.renderers[0]));
        assert_eq!(handle.rgba_top_down(), vec![255, 0, 0, 255]);
        let img = handle.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn image_tools_in_toolbar_order() {
        let fig = Figure::new(10, 10, (0.0, 1.0), (0.0, 1.0));
        let names: Vec<&str> = fig.tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["pan", "box_zoom", "wheel_zoom", "save", "reset"]);
        let drag: Vec<Tool> = fig.tools.iter().copied().filter(|t| t.is_drag()).collect();
        assert_eq!(drag, [Tool::Pan, Tool::BoxZoom]);
    }

    #[test]
    fn viewport_pans_and_zooms() {
        let fig = Figure::new(200, 100, (0.0, 20.0), (0.0, 10.0));
        let mut view = Viewport::of(&fig);
        view.pan(0.5, 0.5);
        assert_eq!(view.x_range, (-10.0, 10.0));
        assert_eq!(view.y_range, (5.0, 15.0));

        let mut view = Viewport::of(&fig);
        view.zoom(0.5, 0.5, 0.5);
        assert_eq!(view.x_range, (5.0, 15.0));
        assert_eq!(view.y_range, (2.5, 7.5));
        view.zoom(f64::NAN, 0.5, 0.5);
        assert_eq!(view.x_range, (5.0, 15.0));

        let mut view = Viewport::of(&fig);
        assert!(view.zoom_to((0.75, 0.5), (0.25, 1.0)));
        assert_eq!(view.x_range, (5.0, 15.0));
        assert_eq!(view.y_range, (0.0, 5.0));
        assert!(!view.zoom_to((0.1, 0.1), (0.1, 0.9)));
        assert_eq!(view.x_range, (5.0, 15.0));
    }
}
