//! Bridge Map Plotter
//! Interactive point map of the oldest bridges using egui_plot.

use crate::config::MapViewConfig;
use crate::data::MapPoint;
use egui::Color32;
use egui_plot::{Plot, PlotPoints, Points};

/// Uniform point color for every bridge.
pub const POINT_COLOR: Color32 = Color32::from_rgb(255, 51, 51);

const SERIES_NAME: &str = "Bridges";

/// Visible latitude span relative to the longitude span.
const LATITUDE_RATIO: f64 = 0.6;

/// Draws the bridge map.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Degrees of longitude shown at a web-map zoom level.
    pub fn longitude_span(zoom: f64) -> f64 {
        360.0 / 2f64.powf(zoom)
    }

    /// `(min, max)` longitude and latitude of the initial view.
    pub fn view_bounds(view: &MapViewConfig) -> ([f64; 2], [f64; 2]) {
        let half_lon = Self::longitude_span(view.zoom) / 2.0;
        let half_lat = half_lon * LATITUDE_RATIO;
        (
            [view.longitude - half_lon, view.longitude + half_lon],
            [view.latitude - half_lat, view.latitude + half_lat],
        )
    }

    /// Hover text for a bridge.
    pub fn tooltip_text(point: &MapPoint) -> String {
        let year = point
            .year_built
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Bridge\nStructure Number: {}\nCounty Name: {}\nYear Built: {}",
            point.structure_number, point.county_name, year
        )
    }

    /// Bridge drawn at (or closest to) the given coordinate.
    pub fn nearest_point(points: &[MapPoint], lon: f64, lat: f64) -> Option<&MapPoint> {
        points
            .iter()
            .filter_map(|p| p.position.map(|[x, y]| (p, (x - lon).powi(2) + (y - lat).powi(2))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    /// Draw the point layer centered on the configured view.
    pub fn draw_bridge_map(
        ui: &mut egui::Ui,
        points: &[MapPoint],
        view: &MapViewConfig,
        height: f32,
    ) {
        let ([lon_min, lon_max], [lat_min, lat_max]) = Self::view_bounds(view);
        let coords: Vec<[f64; 2]> = points.iter().filter_map(|p| p.position).collect();
        let hover_points = points.to_vec();

        Plot::new("bridge_map")
            .height(height)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .include_x(lon_min)
            .include_x(lon_max)
            .include_y(lat_min)
            .include_y(lat_max)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .allow_scroll(false)
            .show_background(true)
            .label_formatter(move |name, value| {
                // Only items are labelled, not the bare pointer position.
                if name != SERIES_NAME {
                    return String::new();
                }
                Self::nearest_point(&hover_points, value.x, value.y)
                    .map(Self::tooltip_text)
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .radius(4.0)
                        .color(POINT_COLOR)
                        .name(SERIES_NAME),
                );
            });
    }
}
