//! egui painter for `Layout`s built by `imshow`.

use std::sync::Arc;

use eframe::egui;

use crate::color::ColorMapper;
use crate::style::Toolbar;

use super::clicks::ClickLog;
use super::figure::{Axis, ColorBar, Figure, GlyphRenderer, Layout, Tool, Viewport};

const FRAME_BG: egui::Color32 = egui::Color32::from_rgb(250, 250, 250);
const FRAME_BORDER: egui::Color32 = egui::Color32::from_rgb(200, 200, 200);
const AXIS_COLOR: egui::Color32 = egui::Color32::from_rgb(68, 68, 68);
const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(20, 20, 20);
const BOX_ZOOM_COLOR: egui::Color32 = egui::Color32::from_rgb(66, 133, 244);

const MARGIN_LEFT: f32 = 64.0;
const MARGIN_BOTTOM: f32 = 48.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_RIGHT: f32 = 16.0;
const COLORBAR_WIDTH: f32 = 16.0;
const COLORBAR_SPACE: f32 = 80.0;
const TICK_LEN: f32 = 5.0;
const TARGET_TICKS: usize = 6;
const WHEEL_ZOOM_RATE: f64 = 0.002;
const SAVE_PATH: &str = "imshow.png";

/// Per-figure interaction state: uploaded texture, visible window and
/// the tool selection from the toolbar.
pub struct FigureView {
    texture: Option<egui::TextureHandle>,
    source: Option<Arc<GlyphRenderer>>,
    viewport: Option<Viewport>,
    drag_tool: Tool,
    wheel_zoom: bool,
    box_start: Option<egui::Pos2>,
}

impl Default for FigureView {
    fn default() -> Self {
        Self {
            texture: None,
            source: None,
            viewport: None,
            drag_tool: Tool::Pan,
            wheel_zoom: false,
            box_start: None,
        }
    }
}

impl FigureView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.texture = None;
        self.source = None;
        self.viewport = None;
        self.box_start = None;
    }

    /// Paint the layout; clicks inside the frame go to its click log.
    pub fn show(&mut self, ui: &mut egui::Ui, layout: &mut Layout) {
        ui.horizontal_top(|ui| {
            if let Some((x, y)) = self.draw_with_toolbar(ui, layout.figure()) {
                if let Some(clicks) = layout.click_log_mut() {
                    clicks.record(x, y);
                }
            }
            let cleared = layout.click_log().is_some_and(|clicks| draw_click_log(ui, clicks));
            if let (true, Some(clicks)) = (cleared, layout.click_log_mut()) {
                clicks.clear();
            }
        });
    }

    fn draw_with_toolbar(&mut self, ui: &mut egui::Ui, figure: &Figure) -> Option<(f64, f64)> {
        match figure.toolbar_location {
            Toolbar::Above => {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| self.draw_toolbar(ui, figure));
                    self.draw_figure(ui, figure)
                })
                .inner
            }
            Toolbar::Right => {
                let clicked = self.draw_figure(ui, figure);
                ui.vertical(|ui| self.draw_toolbar(ui, figure));
                clicked
            }
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui, figure: &Figure) {
        if !figure.tools.contains(&self.drag_tool) {
            if let Some(&first) = figure.tools.iter().find(|t| t.is_drag()) {
                self.drag_tool = first;
            }
        }
        for &tool in &figure.tools {
            match tool {
                Tool::Pan | Tool::BoxZoom => {
                    if ui.selectable_label(self.drag_tool == tool, tool.name()).clicked() {
                        self.drag_tool = tool;
                    }
                }
                Tool::WheelZoom => {
                    if ui.selectable_label(self.wheel_zoom, tool.name()).clicked() {
                        self.wheel_zoom = !self.wheel_zoom;
                    }
                }
                Tool::Save => {
                    if ui.button(tool.name()).clicked() {
                        save_figure(figure);
                    }
                }
                Tool::Reset => {
                    if ui.button(tool.name()).clicked() {
                        self.viewport = None;
                    }
                }
            }
        }
    }

    /// Returns the data coordinates of a click inside the frame, if any.
    fn draw_figure(&mut self, ui: &mut egui::Ui, figure: &Figure) -> Option<(f64, f64)> {
        let right = if figure.colorbar.is_some() {
            COLORBAR_SPACE
        } else {
            MARGIN_RIGHT
        };
        let size = egui::vec2(
            MARGIN_LEFT + figure.frame_width as f32 + right,
            MARGIN_TOP + figure.frame_height as f32 + MARGIN_BOTTOM,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let outer = response.rect;
        let frame = egui::Rect::from_min_size(
            egui::pos2(outer.min.x + MARGIN_LEFT, outer.min.y + MARGIN_TOP),
            egui::vec2(figure.frame_width as f32, figure.frame_height as f32),
        );
        let to_frac = |p: egui::Pos2| {
            (
                ((p.x - frame.min.x) / frame.width()) as f64,
                ((p.y - frame.min.y) / frame.height()) as f64,
            )
        };

        self.interact(ui, &response, frame, figure);
        let view = self.viewport.unwrap_or_else(|| Viewport::of(figure));

        painter.rect_filled(frame, 0.0, FRAME_BG);

        let clipped = painter.with_clip_rect(frame);
        for glyph in &figure.renderers {
            let texture = self.texture_for(ui.ctx(), glyph);
            clipped.image(
                texture.id(),
                glyph_rect(&view, glyph, frame),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if let (Some(start), Some(now)) = (self.box_start, response.interact_pointer_pos()) {
            let selection = egui::Rect::from_two_pos(start, now);
            clipped.rect(
                selection,
                0.0,
                BOX_ZOOM_COLOR.gamma_multiply(0.2),
                egui::Stroke::new(1.0, BOX_ZOOM_COLOR),
                egui::StrokeKind::Inside,
            );
        }

        painter.rect(
            frame,
            0.0,
            egui::Color32::TRANSPARENT,
            egui::Stroke::new(1.0, FRAME_BORDER),
            egui::StrokeKind::Outside,
        );

        if let Some(title) = &figure.title {
            painter.text(
                egui::pos2(frame.min.x, outer.min.y + 4.0),
                egui::Align2::LEFT_TOP,
                title,
                egui::FontId::proportional(14.0),
                TITLE_COLOR,
            );
        }

        draw_x_axis(&painter, frame, view.x_range, &figure.x_axis);
        draw_y_axis(&painter, frame, view.y_range, &figure.y_axis);

        if let Some(colorbar) = &figure.colorbar {
            draw_colorbar(&painter, frame, colorbar);
        }

        let pos = response.interact_pointer_pos().filter(|_| response.clicked())?;
        if !frame.contains(pos) {
            return None;
        }
        let (fx, fy) = to_frac(pos);
        Some(view.frame_to_data(fx, fy))
    }

    /// Apply drag and wheel input from the active tools to the viewport.
    fn interact(&mut self, ui: &egui::Ui, response: &egui::Response, frame: egui::Rect, figure: &Figure) {
        let to_frac = |p: egui::Pos2| {
            (
                ((p.x - frame.min.x) / frame.width()) as f64,
                ((p.y - frame.min.y) / frame.height()) as f64,
            )
        };
        let mut view = self.viewport.unwrap_or_else(|| Viewport::of(figure));
        let mut moved = false;

        let drag_tool = Some(self.drag_tool).filter(|t| figure.tools.contains(t));
        match drag_tool {
            Some(Tool::Pan) if response.dragged() => {
                let delta = response.drag_delta();
                view.pan(
                    (delta.x / frame.width()) as f64,
                    (delta.y / frame.height()) as f64,
                );
                moved = true;
            }
            Some(Tool::BoxZoom) => {
                if response.drag_started() {
                    self.box_start = response
                        .interact_pointer_pos()
                        .filter(|p| frame.contains(*p));
                }
                if response.drag_stopped() {
                    let end = ui.input(|i| i.pointer.latest_pos());
                    if let (Some(start), Some(end)) = (self.box_start.take(), end) {
                        moved = view.zoom_to(to_frac(start), to_frac(frame.clamp(end)));
                    }
                }
            }
            _ => {}
        }

        if self.wheel_zoom && response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if let (true, Some(hover)) = (scroll != 0.0, response.hover_pos()) {
                let (fx, fy) = to_frac(hover);
                view.zoom((-(scroll as f64) * WHEEL_ZOOM_RATE).exp(), fx, fy);
                moved = true;
            }
        }

        if moved {
            self.viewport = Some(view);
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, glyph: &Arc<GlyphRenderer>) -> egui::TextureHandle {
        let fresh = self
            .source
            .as_ref()
            .is_some_and(|s| Arc::ptr_eq(s, glyph));
        if let (true, Some(texture)) = (fresh, &self.texture) {
            return texture.clone();
        }
        let texture = ctx.load_texture("imshow", glyph_color_image(glyph), egui::TextureOptions::NEAREST);
        self.texture = Some(texture.clone());
        self.source = Some(Arc::clone(glyph));
        texture
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_figure(figure: &Figure) {
    let Some(image) = figure.renderers.first().and_then(|g| g.to_rgba_image()) else {
        log::warn!("nothing to save");
        return;
    };
    match image.save(SAVE_PATH) {
        Ok(()) => log::info!("saved image to {SAVE_PATH}"),
        Err(e) => log::error!("failed to save {SAVE_PATH}: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn save_figure(_figure: &Figure) {
    log::warn!("saving {SAVE_PATH} is not available in the browser");
}

/// Upload-ready pixels for a glyph, top row first.
pub fn glyph_color_image(glyph: &GlyphRenderer) -> egui::ColorImage {
    let (rows, cols) = glyph.pixel_shape();
    egui::ColorImage::from_rgba_unmultiplied([cols, rows], &glyph.rgba_top_down())
}

/// Screen rectangle covered by a glyph placed in data space.
fn glyph_rect(view: &Viewport, glyph: &GlyphRenderer, frame: egui::Rect) -> egui::Rect {
    let to_x = |x: f64| data_to_screen(x, view.x_range, frame.min.x, frame.max.x);
    let to_y = |y: f64| data_to_screen(y, view.y_range, frame.max.y, frame.min.y);
    egui::Rect::from_min_max(
        egui::pos2(to_x(glyph.x), to_y(glyph.y + glyph.dh)),
        egui::pos2(to_x(glyph.x + glyph.dw), to_y(glyph.y)),
    )
}

fn data_to_screen(v: f64, range: (f64, f64), start: f32, end: f32) -> f32 {
    let span = range.1 - range.0;
    if span == 0.0 {
        return start;
    }
    start + ((v - range.0) / span) as f32 * (end - start)
}

/// Round tick positions (steps of 1, 2 or 5 times a power of ten) inside `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| span / s <= target as f64)
        .unwrap_or(10.0 * magnitude);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn tick_label(v: f64) -> String {
    if v.abs() >= 1e4 || (v != 0.0 && v.abs() < 1e-3) {
        format!("{v:.1e}")
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn draw_x_axis(painter: &egui::Painter, frame: egui::Rect, range: (f64, f64), axis: &Axis) {
    let stroke = egui::Stroke::new(1.0, AXIS_COLOR);
    if axis.ticks || axis.major_labels {
        for t in nice_ticks(range.0, range.1, TARGET_TICKS) {
            let x = data_to_screen(t, range, frame.min.x, frame.max.x);
            if axis.ticks {
                painter.line_segment(
                    [egui::pos2(x, frame.max.y), egui::pos2(x, frame.max.y + TICK_LEN)],
                    stroke,
                );
            }
            if axis.major_labels {
                painter.text(
                    egui::pos2(x, frame.max.y + TICK_LEN + 2.0),
                    egui::Align2::CENTER_TOP,
                    tick_label(t),
                    egui::FontId::proportional(11.0),
                    AXIS_COLOR,
                );
            }
        }
    }
    if let Some(label) = &axis.label {
        painter.text(
            egui::pos2(frame.center().x, frame.max.y + MARGIN_BOTTOM - 4.0),
            egui::Align2::CENTER_BOTTOM,
            label,
            egui::FontId::proportional(12.0),
            AXIS_COLOR,
        );
    }
}

fn draw_y_axis(painter: &egui::Painter, frame: egui::Rect, range: (f64, f64), axis: &Axis) {
    let stroke = egui::Stroke::new(1.0, AXIS_COLOR);
    if axis.ticks || axis.major_labels {
        for t in nice_ticks(range.0, range.1, TARGET_TICKS) {
            let y = data_to_screen(t, range, frame.max.y, frame.min.y);
            if axis.ticks {
                painter.line_segment(
                    [egui::pos2(frame.min.x - TICK_LEN, y), egui::pos2(frame.min.x, y)],
                    stroke,
                );
            }
            if axis.major_labels {
                painter.text(
                    egui::pos2(frame.min.x - TICK_LEN - 2.0, y),
                    egui::Align2::RIGHT_CENTER,
                    tick_label(t),
                    egui::FontId::proportional(11.0),
                    AXIS_COLOR,
                );
            }
        }
    }
    if let Some(label) = &axis.label {
        painter.text(
            egui::pos2(frame.min.x - MARGIN_LEFT + 2.0, frame.min.y - 4.0),
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(12.0),
            AXIS_COLOR,
        );
    }
}

fn draw_colorbar(painter: &egui::Painter, frame: egui::Rect, colorbar: &ColorBar) {
    let mapper: &ColorMapper = &colorbar.color_mapper;
    let n = mapper.palette.len();
    if n == 0 {
        return;
    }
    let left = frame.max.x + colorbar.label_standoff as f32;
    let bar = egui::Rect::from_min_size(
        egui::pos2(left, frame.min.y),
        egui::vec2(COLORBAR_WIDTH, frame.height()),
    );
    let step = bar.height() / n as f32;
    for (i, [r, g, b]) in mapper.palette.iter().enumerate() {
        let bottom = bar.max.y - i as f32 * step;
        let cell = egui::Rect::from_min_max(
            egui::pos2(bar.min.x, bottom - step),
            egui::pos2(bar.max.x, bottom),
        );
        painter.rect_filled(cell, 0.0, egui::Color32::from_rgb(*r, *g, *b));
    }
    if colorbar.border_line {
        painter.rect(
            bar,
            0.0,
            egui::Color32::TRANSPARENT,
            egui::Stroke::new(1.0, AXIS_COLOR),
            egui::StrokeKind::Outside,
        );
    }

    let range = (mapper.low, mapper.high);
    for t in nice_ticks(range.0, range.1, TARGET_TICKS) {
        let y = data_to_screen(t, range, bar.max.y, bar.min.y);
        painter.line_segment(
            [egui::pos2(bar.max.x, y), egui::pos2(bar.max.x + TICK_LEN, y)],
            egui::Stroke::new(1.0, AXIS_COLOR),
        );
        painter.text(
            egui::pos2(bar.max.x + TICK_LEN + 2.0, y),
            egui::Align2::LEFT_CENTER,
            tick_label(t),
            egui::FontId::proportional(11.0),
            AXIS_COLOR,
        );
    }
}

/// Returns true when the clear button was pressed.
fn draw_click_log(ui: &mut egui::Ui, clicks: &ClickLog) -> bool {
    ui.vertical(|ui| {
        ui.set_width(clicks.width as f32);
        let cleared = ui
            .add_enabled(!clicks.is_empty(), egui::Button::new("Clear"))
            .clicked();
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in clicks.lines() {
                    ui.monospace(line);
                }
            });
        cleared
    })
    .inner
}
