//! Chart Viewer Widget
//! Central scrollable panel with the map, bar chart, pie chart and image sections.
//!
//! Every section is a pure function of the table and the current widget values.
//! Results are cached by their inputs so a frame only recomputes what changed.

use crate::charts::{ChartPlotter, StaticChartRenderer, FIGURE_SIZE};
use crate::config::AppConfig;
use crate::data::{BridgeTable, DataProcessor, MapPoint, MaterialTraffic};
use crate::gallery::FamousBridge;
use crate::gui::control_panel::UserSettings;
use egui::load::SizedTexture;
use egui::{Color32, RichText, ScrollArea, TextureHandle, TextureOptions};
use plotters::style::RGBColor;
use std::collections::HashMap;

const MAP_HEIGHT: f32 = 420.0;
const SECTION_SPACING: f32 = 20.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// A rendered figure, or the reason it could not be drawn.
type Figure = Result<TextureHandle, String>;

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    map_cache: Option<(usize, Result<Vec<MapPoint>, String>)>,
    bar_cache: Option<(Vec<String>, Figure)>,
    pie_cache: Option<(Figure, Vec<MaterialTraffic>, f64)>,
    photo_cache: HashMap<FamousBridge, Figure>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything derived from the table.
    pub fn clear(&mut self) {
        self.map_cache = None;
        self.bar_cache = None;
        self.pie_cache = None;
    }

    /// Draw all four sections.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        table: Option<&BridgeTable>,
        settings: &UserSettings,
        selected_agencies: &[String],
        config: &AppConfig,
    ) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new("CS230 Final Project (Bridges in Georgia)")
                        .size(26.0)
                        .strong(),
                );
                ui.label(RichText::new("Ryan Dodge").size(16.0).color(Color32::GRAY));
                ui.add_space(SECTION_SPACING);

                match table {
                    Some(table) => {
                        Self::section_header(ui, "Map:");
                        self.show_map(ui, table, settings.oldest_count, config);
                        ui.add_space(SECTION_SPACING);

                        Self::section_header(ui, "Bar Chart:");
                        self.show_bar_chart(ctx, ui, table, selected_agencies, config);
                        ui.add_space(SECTION_SPACING);

                        Self::section_header(ui, "Pie Chart:");
                        self.show_pie_chart(ctx, ui, table);
                        ui.add_space(SECTION_SPACING);
                    }
                    None => {
                        ui.label(RichText::new("No Data").size(20.0));
                        ui.add_space(SECTION_SPACING);
                    }
                }

                Self::section_header(ui, "Image Selection:");
                self.show_photo(ctx, ui, settings.bridge, config);
            });
    }

    fn section_header(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(20.0).strong());
        ui.add_space(8.0);
    }

    fn show_error(ui: &mut egui::Ui, message: &str) {
        ui.label(RichText::new(message).color(ERROR_COLOR));
    }

    fn show_map(
        &mut self,
        ui: &mut egui::Ui,
        table: &BridgeTable,
        oldest_count: usize,
        config: &AppConfig,
    ) {
        let stale = !matches!(&self.map_cache, Some((n, _)) if *n == oldest_count);
        if stale {
            let points =
                DataProcessor::oldest_bridges(table, oldest_count).map_err(|e| e.to_string());
            if let Ok(points) = &points {
                log::debug!("Selected {} oldest bridges", points.len());
            }
            self.map_cache = Some((oldest_count, points));
        }

        match &self.map_cache {
            Some((_, Ok(points))) => {
                let ages: Vec<f64> = points.iter().filter_map(|p| p.age).collect();
                if let (Some(oldest), Some(youngest)) = (ages.first(), ages.last()) {
                    ui.label(format!(
                        "Showing {} bridges, {:.0} to {:.0} years old",
                        points.len(),
                        oldest,
                        youngest
                    ));
                }
                let unplaced = points.iter().filter(|p| p.position.is_none()).count();
                if unplaced > 0 {
                    ui.label(
                        RichText::new(format!("{} selected bridges have no coordinates", unplaced))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
                ChartPlotter::draw_bridge_map(ui, points, &config.map, MAP_HEIGHT);
            }
            Some((_, Err(e))) => Self::show_error(ui, e),
            None => {}
        }
    }

    fn show_bar_chart(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        table: &BridgeTable,
        selected_agencies: &[String],
        config: &AppConfig,
    ) {
        let stale = !matches!(&self.bar_cache, Some((sel, _)) if sel.as_slice() == selected_agencies);
        if stale {
            let [r, g, b] = config.bar_color;
            let figure = DataProcessor::count_by_agency(table, selected_agencies)
                .map_err(|e| e.to_string())
                .and_then(|counts| {
                    StaticChartRenderer::render_bar_chart(&counts, RGBColor(r, g, b), FIGURE_SIZE)
                        .map_err(|e| e.to_string())
                })
                .map(|img| Self::upload(ctx, "bar_chart", &img));
            if let Err(e) = &figure {
                log::warn!("Bar chart failed: {}", e);
            }
            self.bar_cache = Some((selected_agencies.to_vec(), figure));
        }

        match &self.bar_cache {
            Some((_, Ok(texture))) => {
                ui.image(SizedTexture::from_handle(texture));
            }
            Some((_, Err(e))) => Self::show_error(ui, e),
            None => {}
        }
    }

    fn show_pie_chart(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, table: &BridgeTable) {
        if self.pie_cache.is_none() {
            let aggregated = DataProcessor::traffic_by_material(table).and_then(|slices| {
                DataProcessor::total_traffic(table).map(|total| (slices, total))
            });
            let (figure, slices, total) = match aggregated {
                Ok((slices, total)) => {
                    log::debug!("{} materials, {:.0} total daily traffic", slices.len(), total);
                    let figure = StaticChartRenderer::render_pie_chart(&slices, FIGURE_SIZE)
                        .map(|img| Self::upload(ctx, "pie_chart", &img))
                        .map_err(|e| e.to_string());
                    (figure, slices, total)
                }
                Err(e) => (Err(e.to_string()), Vec::new(), 0.0),
            };
            if let Err(e) = &figure {
                log::warn!("Pie chart failed: {}", e);
            }
            self.pie_cache = Some((figure, slices, total));
        }

        let Some((figure, slices, total)) = &self.pie_cache else {
            return;
        };
        match figure {
            Ok(texture) => {
                ui.image(SizedTexture::from_handle(texture));
            }
            Err(e) => Self::show_error(ui, e),
        }

        ui.collapsing("Traffic by material", |ui| {
            egui::Grid::new("material_totals")
                .striped(true)
                .min_col_width(80.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("Material").strong());
                    ui.label(RichText::new("Average Daily Traffic").strong());
                    ui.label(RichText::new("Share").strong());
                    ui.end_row();

                    for (i, slice) in slices.iter().enumerate() {
                        let RGBColor(r, g, b) = StaticChartRenderer::pie_color(i);
                        ui.horizontal(|ui| {
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 2.0, Color32::from_rgb(r, g, b));
                            ui.label(&slice.material);
                        });
                        ui.label(format!("{:.0}", slice.traffic));
                        ui.label(StaticChartRenderer::format_share(slice.traffic, *total));
                        ui.end_row();
                    }
                });
        });
    }

    fn show_photo(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        bridge: FamousBridge,
        config: &AppConfig,
    ) {
        let figure = self.photo_cache.entry(bridge).or_insert_with(|| {
            log::info!("Loading photo for {}", bridge.label());
            bridge
                .load_image(&config.image_dir)
                .map(|image| ctx.load_texture(bridge.file_name(), image, TextureOptions::LINEAR))
                .map_err(|e| {
                    log::warn!("{}", e);
                    e.to_string()
                })
        });

        match figure {
            Ok(texture) => {
                ui.add(egui::Image::new(SizedTexture::from_handle(texture)).max_width(640.0));
            }
            Err(e) => Self::show_error(ui, e),
        }
        ui.label(RichText::new(bridge.caption()).size(11.0).color(Color32::GRAY));
    }

    fn upload(ctx: &egui::Context, name: &str, img: &image::RgbImage) -> TextureHandle {
        let size = [img.width() as usize, img.height() as usize];
        let color_image = egui::ColorImage::from_rgb(size, img.as_raw());
        ctx.load_texture(name, color_image, TextureOptions::LINEAR)
    }
}
