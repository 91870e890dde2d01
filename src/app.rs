use eframe::egui;
use egui_extras::{Column, TableBuilder};

use bootcamp_utils::bioinfo;
use bootcamp_utils::color::hex_to_rgb;
use bootcamp_utils::demo::DemoImage;
use bootcamp_utils::display::canvas::FigureView;
use bootcamp_utils::display::{ColorMapping, Imshow, ImshowParams, imshow};
use bootcamp_utils::pixels::Image;
use bootcamp_utils::style::DEFAULT_CMAP;

const PALETTES: &[&str] = &["viridis", "greys", "blues", "purples", "reds"];
const MERGES: &[&str] = &["cmy", "rgb"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Image,
    Codons,
    AminoAcids,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Image, Tab::Codons, Tab::AminoAcids];

    fn name(self) -> &'static str {
        match self {
            Tab::Image => "Image",
            Tab::Codons => "Codons",
            Tab::AminoAcids => "Amino acids",
        }
    }
}

pub struct ViewerApp {
    demo: DemoImage,
    demo_rows: usize,
    demo_cols: usize,
    source: Option<Image>,
    params: ImshowParams,
    palette: String,
    shown: Option<Imshow>,
    error: Option<String>,
    view: FigureView,
    tab: Tab,
    accent: egui::Color32,
    needs_render: bool,
    render_time_ms: f64,
}

impl ViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let accent = hex_to_rgb(DEFAULT_CMAP[0])
            .map(|[r, g, b]| egui::Color32::from_rgb(r, g, b))
            .unwrap_or(egui::Color32::LIGHT_BLUE);

        Self {
            demo: DemoImage::Spots12Bit,
            demo_rows: 128,
            demo_cols: 192,
            source: None,
            params: ImshowParams::default(),
            palette: "viridis".to_string(),
            shown: None,
            error: None,
            view: FigureView::new(),
            tab: Tab::Image,
            accent,
            needs_render: true,
            render_time_ms: 0.0,
        }
    }

    fn is_color(&self) -> bool {
        self.source.as_ref().is_some_and(|im| {
            matches!(im.channels(), Some(c) if c > 1)
        })
    }

    fn load_demo(&mut self) {
        match self.demo.generate(self.demo_rows, self.demo_cols) {
            Ok(im) => {
                log::info!("generated {} at {:?}", self.demo.name(), im.shape());
                self.source = Some(im);
                // Palette names do not apply to merges and vice versa.
                let fits = if self.is_color() {
                    MERGES.contains(&self.palette.as_str())
                } else {
                    PALETTES.contains(&self.palette.as_str())
                };
                if !fits {
                    self.palette = if self.is_color() { "cmy" } else { "viridis" }.to_string();
                }
            }
            Err(e) => {
                log::error!("demo generation failed: {e}");
                self.source = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn render(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        self.params.color_mapper = ColorMapping::Named(self.palette.clone());

        let start = web_time::Instant::now();
        match imshow(source, &self.params) {
            Ok(shown) => {
                self.shown = Some(shown);
                self.error = None;
            }
            Err(e) => {
                log::error!("imshow failed: {e}");
                self.shown = None;
                self.error = Some(e.to_string());
            }
        }
        self.render_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.view.invalidate();
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel: demo selection and tabs
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for &tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.name());
                }
                ui.separator();

                ui.label("Demo:");
                egui::ComboBox::from_id_salt("demo_image")
                    .selected_text(self.demo.name())
                    .show_ui(ui, |ui| {
                        for &demo in DemoImage::ALL {
                            if ui
                                .selectable_value(&mut self.demo, demo, demo.name())
                                .clicked()
                            {
                                self.source = None;
                                self.needs_render = true;
                            }
                        }
                    });

                if ui.button("Reset").clicked() {
                    self.params = ImshowParams::default();
                    self.palette = "viridis".to_string();
                    self.source = None;
                    self.needs_render = true;
                }

                ui.separator();
                if let Some(im) = &self.source {
                    ui.label(format!("{:?} | {:.1}ms", im.shape(), self.render_time_ms));
                }
            });
        });

        if self.tab == Tab::Image {
            let is_color = self.is_color();
            egui::SidePanel::left("controls")
                .default_width(280.0)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let mut changed = false;
                        changed |= ui_source(ui, &mut self.demo_rows, &mut self.demo_cols);
                        if changed {
                            self.source = None;
                        }
                        changed |= ui_color(ui, &mut self.palette, is_color);
                        changed |= ui_intensity(ui, &mut self.params);
                        changed |= ui_axes(ui, &mut self.params);
                        changed |= ui_frame(ui, &mut self.params);
                        changed |= ui_extras(ui, &mut self.params);
                        if changed {
                            self.needs_render = true;
                        }
                    });
                });
        }

        if self.needs_render {
            if self.source.is_none() {
                self.load_demo();
            }
            self.render();
            self.needs_render = false;
        }

        let accent = self.accent;
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Image => {
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                }
                if let Some(shown) = &mut self.shown {
                    egui::ScrollArea::both().show(ui, |ui| {
                        self.view.show(ui, &mut shown.layout);
                    });
                } else if self.error.is_none() {
                    ui.centered_and_justified(|ui| {
                        ui.label("Pick a demo image to begin");
                    });
                }
            }
            Tab::Codons => ui_codon_table(ui, accent),
            Tab::AminoAcids => ui_amino_acid_table(ui, accent),
        });
    }
}

// --- UI Section Builders ---

fn ui_source(ui: &mut egui::Ui, rows: &mut usize, cols: &mut usize) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Source")
        .default_open(true)
        .show(ui, |ui| {
            changed |= ui.add(egui::Slider::new(rows, 8..=512).text("Rows")).changed();
            changed |= ui.add(egui::Slider::new(cols, 8..=512).text("Columns")).changed();
        });
    changed
}

fn ui_color(ui: &mut egui::Ui, palette: &mut String, is_color: bool) -> bool {
    let mut changed = false;
    let choices = if is_color { MERGES } else { PALETTES };
    egui::CollapsingHeader::new("Color Mapping")
        .default_open(true)
        .show(ui, |ui| {
            egui::ComboBox::from_label(if is_color { "Merge" } else { "Palette" })
                .selected_text(palette.as_str())
                .show_ui(ui, |ui| {
                    for &name in choices {
                        if ui.selectable_label(palette.as_str() == name, name).clicked() {
                            *palette = name.to_string();
                            changed = true;
                        }
                    }
                });
        });
    changed
}

fn ui_optional_f64(ui: &mut egui::Ui, label: &str, value: &mut Option<f64>, default: f64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let mut enabled = value.is_some();
        if ui.checkbox(&mut enabled, label).changed() {
            *value = enabled.then_some(value.unwrap_or(default));
            changed = true;
        }
        if let Some(v) = value {
            changed |= ui.add(egui::DragValue::new(v).speed(0.01)).changed();
        }
    });
    changed
}

fn ui_intensity(ui: &mut egui::Ui, params: &mut ImshowParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Intensity Bounds")
        .default_open(false)
        .show(ui, |ui| {
            changed |= ui_optional_f64(ui, "Min", &mut params.min_intensity, 0.0);
            changed |= ui_optional_f64(ui, "Max", &mut params.max_intensity, 1.0);
        });
    changed
}

fn ui_axes(ui: &mut egui::Ui, params: &mut ImshowParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Axes")
        .default_open(false)
        .show(ui, |ui| {
            changed |= ui.checkbox(&mut params.no_ticks, "Hide ticks").changed();
            ui.horizontal(|ui| {
                ui.label("Units");
                changed |= ui.text_edit_singleline(&mut params.length_units).changed();
            });
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.interpixel_distance, 0.01..=10.0)
                        .logarithmic(true)
                        .text("Interpixel distance"),
                )
                .changed();
            changed |= ui.checkbox(&mut params.flip, "Row 0 at top").changed();

            let mut title = params.title.clone().unwrap_or_default();
            ui.horizontal(|ui| {
                ui.label("Title");
                if ui.text_edit_singleline(&mut title).changed() {
                    params.title = (!title.is_empty()).then_some(title);
                    changed = true;
                }
            });
        });
    changed
}

fn ui_frame(ui: &mut egui::Ui, params: &mut ImshowParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Frame")
        .default_open(false)
        .show(ui, |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut params.frame_height, 100..=1000).text("Height"))
                .changed();
            let mut fixed = params.frame_width.is_some();
            if ui.checkbox(&mut fixed, "Fixed width").changed() {
                params.frame_width = fixed.then_some(params.frame_height);
                changed = true;
            }
            if let Some(w) = &mut params.frame_width {
                changed |= ui.add(egui::Slider::new(w, 100..=1500).text("Width")).changed();
            }
        });
    changed
}

fn ui_extras(ui: &mut egui::Ui, params: &mut ImshowParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Extras")
        .default_open(false)
        .show(ui, |ui| {
            changed |= ui.checkbox(&mut params.colorbar, "Colorbar").changed();
            changed |= ui.checkbox(&mut params.display_clicks, "Log clicks").changed();
        });
    changed
}

fn ui_codon_table(ui: &mut egui::Ui, accent: egui::Color32) {
    let codons = bioinfo::codons();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Codon", "Amino acid", "Name"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (codon, aa) in &codons {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.monospace(codon);
                    });
                    row.col(|ui| {
                        if *aa == '*' {
                            ui.colored_label(accent, "*");
                        } else {
                            ui.label(aa.to_string());
                        }
                    });
                    row.col(|ui| {
                        ui.label(bioinfo::aa_three_letter(*aa).unwrap_or("Stop"));
                    });
                });
            }
        });
}

fn ui_amino_acid_table(ui: &mut egui::Ui, accent: egui::Color32) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Code", "Name"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &(code, name) in bioinfo::AA {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.colored_label(accent, code.to_string());
                    });
                    row.col(|ui| {
                        ui.label(name);
                    });
                });
            }
        });
}
