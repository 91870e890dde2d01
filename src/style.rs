//! Default visual options for the course's high-level plots.
//!
//! The values are plain data: `set_defaults()` hands back the full
//! collection and the plotting layer decides how to apply it.

pub const DEFAULT_CMAP: [&str; 10] = [
    "#4c78a8", "#f58518", "#e45756", "#72b7b2", "#54a24b", "#eeca3b", "#b279a2", "#ff9da6",
    "#9d755d", "#bab0ac",
];

// Six darkest classes of the 9-class ColorBrewer sequential palettes,
// ordered light to dark.
pub const DATASHADER_BLUES: [&str; 6] = [
    "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b",
];
pub const DATASHADER_GREYS: [&str; 6] = [
    "#bdbdbd", "#969696", "#737373", "#525252", "#252525", "#000000",
];
pub const DATASHADER_PURPLES: [&str; 6] = [
    "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f", "#3f007d",
];
pub const DATASHADER_REDS: [&str; 6] = [
    "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15", "#67000d",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toolbar {
    Above,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendPosition {
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cmap {
    /// `DEFAULT_CMAP`
    Category,
    Viridis256,
}

/// Fill colour of an element's patches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillColor {
    /// No fill; only outlines are drawn.
    Transparent,
    /// Successive series take the next colour, wrapping around.
    Cycle(&'static [&'static str]),
}

impl FillColor {
    /// Fill for the `series`-th series, `None` when transparent.
    pub fn for_series(self, series: usize) -> Option<&'static str> {
        match self {
            FillColor::Transparent => None,
            FillColor::Cycle(colors) if colors.is_empty() => None,
            FillColor::Cycle(colors) => Some(colors[series % colors.len()]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickPolicy {
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineJoin {
    Bevel,
}

/// Options for one element type. `None` leaves the plotting library's own default.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    pub show_grid: bool,
    pub show_xgrid: bool,
    pub show_legend: Option<bool>,
    pub show_title: Option<bool>,
    pub toolbar: Toolbar,
    pub legend_position: Option<LegendPosition>,
    pub legend_offset: Option<(i32, i32)>,
    pub legend_fontsize: Option<u32>,
    pub click_policy: Option<ClickPolicy>,
    /// Line and marker colours cycled through for successive series.
    pub color_cycle: Option<&'static [&'static str]>,
    pub cmap: Option<Cmap>,
    pub alpha: Option<f64>,
    pub fill_alpha: Option<f64>,
    pub fill_color: Option<FillColor>,
    pub line_alpha: Option<f64>,
    pub line_width: Option<f64>,
    pub line_join: Option<LineJoin>,
    pub muted_line_alpha: Option<f64>,
    pub size: Option<f64>,
    pub box_whisker: Option<BoxWhiskerExtras>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxWhiskerExtras {
    pub box_cmap: Cmap,
    pub box_fill_alpha: f64,
    pub box_line_color: &'static str,
    pub box_width: f64,
    pub outlier_alpha: f64,
    pub outlier_fill_color: Option<&'static str>,
    pub outlier_fill_alpha: f64,
    pub outlier_line_width: f64,
    pub whisker_color: &'static str,
    pub whisker_line_width: f64,
}

impl ElementStyle {
    fn base(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: 0.05,
            show_grid: true,
            show_xgrid: true,
            show_legend: None,
            show_title: None,
            toolbar: Toolbar::Above,
            legend_position: None,
            legend_offset: None,
            legend_fontsize: None,
            click_policy: None,
            color_cycle: None,
            cmap: None,
            alpha: None,
            fill_alpha: None,
            fill_color: None,
            line_alpha: None,
            line_width: None,
            line_join: None,
            muted_line_alpha: None,
            size: None,
            box_whisker: None,
        }
    }

    fn with_legend(mut self, fontsize: Option<u32>) -> Self {
        self.legend_position = Some(LegendPosition::Right);
        self.legend_offset = Some((10, 100));
        self.legend_fontsize = fontsize;
        self
    }

    fn overlay() -> Self {
        Self {
            show_legend: Some(true),
            show_title: Some(true),
            click_policy: Some(ClickPolicy::Hide),
            ..Self::base(450, 350).with_legend(Some(8))
        }
    }

    fn markers() -> Self {
        Self {
            color_cycle: Some(&DEFAULT_CMAP),
            alpha: Some(0.75),
            fill_alpha: Some(0.0),
            fill_color: Some(FillColor::Transparent),
            line_width: Some(2.0),
            size: Some(5.0),
            ..Self::base(450, 350).with_legend(Some(8))
        }
    }
}

/// Defaults for every element type the course plots with.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub box_whisker: ElementStyle,
    pub curve: ElementStyle,
    pub histogram: ElementStyle,
    pub nd_overlay: ElementStyle,
    pub overlay: ElementStyle,
    pub points: ElementStyle,
    pub scatter: ElementStyle,
}

pub fn set_defaults() -> StyleDefaults {
    StyleDefaults::default()
}

impl Default for StyleDefaults {
    fn default() -> Self {
        let box_whisker = ElementStyle {
            show_xgrid: false,
            show_legend: Some(false),
            show_title: Some(true),
            cmap: Some(Cmap::Category),
            box_whisker: Some(BoxWhiskerExtras {
                box_cmap: Cmap::Category,
                box_fill_alpha: 0.75,
                box_line_color: "black",
                box_width: 0.4,
                outlier_alpha: 0.75,
                outlier_fill_color: None,
                outlier_fill_alpha: 0.0,
                outlier_line_width: 2.0,
                whisker_color: "black",
                whisker_line_width: 1.0,
            }),
            ..ElementStyle::base(450, 350).with_legend(None)
        };

        let curve = ElementStyle {
            color_cycle: Some(&DEFAULT_CMAP),
            line_width: Some(2.0),
            line_join: Some(LineJoin::Bevel),
            muted_line_alpha: Some(0.1),
            ..ElementStyle::base(450, 350)
        };

        let histogram = ElementStyle {
            fill_alpha: Some(0.3),
            fill_color: Some(FillColor::Cycle(&DEFAULT_CMAP)),
            line_alpha: Some(1.0),
            line_width: Some(2.0),
            show_legend: Some(true),
            show_title: Some(true),
            ..ElementStyle::base(500, 450)
        };

        let points = ElementStyle {
            show_legend: Some(true),
            show_title: Some(true),
            ..ElementStyle::markers()
        };

        let scatter = ElementStyle {
            cmap: Some(Cmap::Viridis256),
            muted_line_alpha: Some(0.1),
            ..ElementStyle::markers()
        };

        Self {
            box_whisker,
            curve,
            histogram,
            nd_overlay: ElementStyle::overlay(),
            overlay: ElementStyle::overlay(),
            points,
            scatter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_rgb;

    #[test]
    fn palettes_are_valid_hex() {
        let all = DEFAULT_CMAP
            .iter()
            .chain(&DATASHADER_BLUES)
            .chain(&DATASHADER_GREYS)
            .chain(&DATASHADER_PURPLES)
            .chain(&DATASHADER_REDS);
        for hex in all {
            assert!(hex_to_rgb(hex).is_ok(), "bad colour {hex}");
        }
    }

    #[test]
    fn datashader_palettes_run_light_to_dark() {
        let luma = |hex: &str| {
            let [r, g, b] = hex_to_rgb(hex).unwrap();
            r as u32 + g as u32 + b as u32
        };
        for palette in [
            DATASHADER_BLUES,
            DATASHADER_GREYS,
            DATASHADER_PURPLES,
            DATASHADER_REDS,
        ] {
            assert!(palette.windows(2).all(|w| luma(w[0]) > luma(w[1])));
        }
    }

    #[test]
    fn element_defaults() {
        let d = set_defaults();
        assert!(!d.box_whisker.show_xgrid);
        assert_eq!(d.box_whisker.box_whisker.as_ref().map(|b| b.box_width), Some(0.4));
        assert_eq!((d.histogram.width, d.histogram.height), (500, 450));
        assert_eq!(d.curve.line_join, Some(LineJoin::Bevel));
        assert_eq!(d.scatter.cmap, Some(Cmap::Viridis256));
        assert_eq!(d.overlay.click_policy, Some(ClickPolicy::Hide));
        assert_eq!(d.points.size, Some(5.0));
        assert_eq!(d.points.fill_color, Some(FillColor::Transparent));
        assert!(d.nd_overlay.show_grid);
    }

    #[test]
    fn histogram_cycles_its_fill() {
        let d = set_defaults();
        assert_eq!(d.histogram.color_cycle, None);
        let fill = d.histogram.fill_color.unwrap();
        assert_eq!(fill, FillColor::Cycle(&DEFAULT_CMAP));
        assert_eq!(fill.for_series(0), Some("#4c78a8"));
        assert_eq!(fill.for_series(11), Some("#f58518"));
        assert_eq!(FillColor::Transparent.for_series(3), None);
        assert_eq!(d.curve.fill_color, None);
    }

    #[test]
    fn datashader_palettes_are_the_darkest_brewer_classes() {
        // Light end is class 4 of 9, dark end is class 9.
        assert_eq!(DATASHADER_BLUES[0], "#9ecae1");
        assert_eq!(DATASHADER_BLUES[5], "#08306b");
        assert_eq!(DATASHADER_GREYS[5], "#000000");
    }
}
