//! Static Chart Renderer
//! Draws the owner agency bar chart and the traffic pie chart with plotters
//! into an in-memory RGB bitmap.
//!
//! Layout:
//! 1. Bar chart: title, one bar per agency, rotated agency names on the x axis
//! 2. Pie chart: title, slices with percentage labels, material legend on the right

use crate::data::{AgencyCount, MaterialTraffic};
use image::RgbImage;
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;

pub const BAR_TITLE: &str = "Number of Bridges by Owner Agency";
pub const PIE_TITLE: &str = "Pie Chart (Total Traffic Based on Material Type)";

/// Default figure size in pixels.
pub const FIGURE_SIZE: (u32, u32) = (640, 480);

/// Slice colors, reused cyclically when there are more than ten materials.
pub const PIE_PALETTE: [RGBColor; 10] = [
    RGBColor(255, 255, 0),   // yellow
    RGBColor(255, 165, 0),   // orange
    RGBColor(128, 128, 0),   // olive
    RGBColor(255, 0, 255),   // magenta
    RGBColor(255, 215, 0),   // gold
    RGBColor(230, 230, 250), // lavender
    RGBColor(255, 0, 0),     // red
    RGBColor(0, 0, 255),     // blue
    RGBColor(192, 192, 192), // silver
    RGBColor(160, 82, 45),   // sienna
];

const FONT: &str = "sans-serif";

/// Legend rows start this far below the top edge, clear of the title.
const LEGEND_TOP: i32 = 50;
const LEGEND_ROW: i32 = 22;
const SWATCH: i32 = 14;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Bitmap buffer does not match {0}x{1}")]
    Buffer(u32, u32),
}

fn drawing_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Palette color for the slice at `index`.
    pub fn pie_color(index: usize) -> RGBColor {
        PIE_PALETTE[index % PIE_PALETTE.len()]
    }

    /// Share of `value` in `total` as a one-decimal percentage, e.g. `12.5%`.
    pub fn format_share(value: f64, total: f64) -> String {
        if total <= 0.0 {
            return "0.0%".to_string();
        }
        format!("{:.1}%", value / total * 100.0)
    }

    /// Corners of the legend swatch for the slice at `index`, relative to the
    /// legend area on the right third of the figure.
    fn legend_swatch(index: usize) -> [(i32, i32); 2] {
        let y = LEGEND_TOP + index as i32 * LEGEND_ROW;
        [(10, y), (10 + SWATCH, y + SWATCH)]
    }

    /// Height reserved under the x axis for the rotated agency names.
    fn x_label_area(counts: &[AgencyCount]) -> u32 {
        let longest = counts
            .iter()
            .map(|c| c.agency.chars().count())
            .max()
            .unwrap_or(0) as u32;
        (longest * 7 + 40).clamp(60, 260)
    }

    /// Bar chart of bridge counts per owner agency.
    ///
    /// An empty `counts` renders empty axes.
    pub fn render_bar_chart(
        counts: &[AgencyCount],
        bar_color: RGBColor,
        size: (u32, u32),
    ) -> Result<RgbImage, RenderError> {
        let (width, height) = size;
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_err)?;

            let slots = counts.len().max(1);
            let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
            let y_max = (max_count as f64 * 1.1).ceil().max(1.0) as usize;
            let labels: Vec<&str> = counts.iter().map(|c| c.agency.as_str()).collect();

            let mut chart = ChartBuilder::on(&root)
                .caption(BAR_TITLE, (FONT, 20))
                .margin(15)
                .x_label_area_size(Self::x_label_area(counts))
                .y_label_area_size(60)
                .build_cartesian_2d((0..slots).into_segmented(), 0usize..y_max)
                .map_err(drawing_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("Owner Agency")
                .y_desc("Number of Bridges")
                .x_labels(slots)
                .x_label_formatter(&|value: &SegmentValue<usize>| match value {
                    SegmentValue::CenterOf(i) => labels.get(*i).map(|s| s.to_string()).unwrap_or_default(),
                    _ => String::new(),
                })
                .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
                .draw()
                .map_err(drawing_err)?;

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(bar_color.filled())
                        .margin(10)
                        .data(counts.iter().enumerate().map(|(i, c)| (i, c.count))),
                )
                .map_err(drawing_err)?;

            root.present().map_err(drawing_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }

    /// Pie chart of total traffic per main span material.
    ///
    /// Slices with no traffic are left out of the pie but kept in the legend.
    pub fn render_pie_chart(
        slices: &[MaterialTraffic],
        size: (u32, u32),
    ) -> Result<RgbImage, RenderError> {
        let (width, height) = size;
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_err)?;
            let titled = root.titled(PIE_TITLE, (FONT, 20)).map_err(drawing_err)?;

            let total: f64 = slices.iter().map(|s| s.traffic).sum();
            if total > 0.0 {
                let (pie_area, _) = titled.split_horizontally(width * 2 / 3);
                let (_, legend_area) = root.split_horizontally(width * 2 / 3);

                let mut sizes = Vec::new();
                let mut colors = Vec::new();
                for (i, slice) in slices.iter().enumerate() {
                    if slice.traffic > 0.0 {
                        sizes.push(slice.traffic);
                        colors.push(Self::pie_color(i));
                    }
                }
                let labels = vec![""; sizes.len()];

                let (area_w, area_h) = pie_area.dim_in_pixel();
                let center = ((area_w / 2) as i32, (area_h / 2) as i32);
                let radius = area_w.min(area_h) as f64 * 0.32;

                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
                pie.percentages((FONT, 12).into_font().color(&BLACK));
                pie_area.draw(&pie).map_err(drawing_err)?;

                for (i, slice) in slices.iter().enumerate() {
                    let swatch = Self::legend_swatch(i);
                    legend_area
                        .draw(&Rectangle::new(swatch, Self::pie_color(i).filled()))
                        .map_err(drawing_err)?;
                    legend_area
                        .draw(&Text::new(
                            slice.material.clone(),
                            (swatch[1].0 + 8, swatch[0].1),
                            (FONT, 13).into_font(),
                        ))
                        .map_err(drawing_err)?;
                }
            }

            root.present().map_err(drawing_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_palette_wraps() {
        assert_eq!(StaticChartRenderer::pie_color(0), RGBColor(255, 255, 0));
        assert_eq!(StaticChartRenderer::pie_color(9), RGBColor(160, 82, 45));
        assert_eq!(StaticChartRenderer::pie_color(10), StaticChartRenderer::pie_color(0));
        assert_eq!(StaticChartRenderer::pie_color(23), StaticChartRenderer::pie_color(3));
    }

    #[test]
    fn test_format_share() {
        assert_eq!(StaticChartRenderer::format_share(1.0, 8.0), "12.5%");
        assert_eq!(StaticChartRenderer::format_share(2.0, 3.0), "66.7%");
        assert_eq!(StaticChartRenderer::format_share(5.0, 0.0), "0.0%");
    }

    #[test]
    fn test_x_label_area_grows_with_names() {
        let short = [AgencyCount { agency: "City".into(), count: 1 }];
        let long = [AgencyCount {
            agency: "Other Local Agencies and Authorities".into(),
            count: 1,
        }];
        assert!(StaticChartRenderer::x_label_area(&long) > StaticChartRenderer::x_label_area(&short));
        assert_eq!(StaticChartRenderer::x_label_area(&[]), 60);
    }

    fn material(name: &str, traffic: f64) -> MaterialTraffic {
        MaterialTraffic { material: name.to_string(), traffic }
    }

    /// Pixel at the centre of the legend swatch for `index`.
    fn swatch_pixel(img: &RgbImage, index: usize) -> RGBColor {
        let [(x0, y0), (x1, y1)] = StaticChartRenderer::legend_swatch(index);
        let offset = (FIGURE_SIZE.0 * 2 / 3) as i32;
        let px = img.get_pixel((offset + (x0 + x1) / 2) as u32, ((y0 + y1) / 2) as u32);
        RGBColor(px[0], px[1], px[2])
    }

    #[test]
    fn test_render_bar_chart_empty_selection() {
        let img = StaticChartRenderer::render_bar_chart(&[], RGBColor(0, 128, 0), FIGURE_SIZE).unwrap();
        assert_eq!(img.dimensions(), FIGURE_SIZE);
    }

    #[test]
    fn test_render_bar_chart_uses_bar_color() {
        let counts = [
            AgencyCount { agency: "County Highway Agency".into(), count: 40 },
            AgencyCount { agency: "State Highway Agency".into(), count: 25 },
        ];
        let img = StaticChartRenderer::render_bar_chart(&counts, RGBColor(0, 128, 0), FIGURE_SIZE).unwrap();
        assert_eq!(img.dimensions(), FIGURE_SIZE);
        assert!(img.pixels().any(|p| p.0 == [0, 128, 0]));
    }

    #[test]
    fn test_render_pie_chart_zero_traffic_draws_title_only() {
        let slices = [material("Concrete", 0.0), material("Steel", 0.0)];
        let img = StaticChartRenderer::render_pie_chart(&slices, FIGURE_SIZE).unwrap();
        assert_eq!(img.dimensions(), FIGURE_SIZE);
        assert_eq!(swatch_pixel(&img, 0), WHITE);
        assert_eq!(swatch_pixel(&img, 1), WHITE);
    }

    #[test]
    fn test_render_pie_chart_legend_matches_palette_past_skipped_slices() {
        let mut slices: Vec<MaterialTraffic> = (0..12)
            .map(|i| material(&format!("Material {:02}", i), 1000.0 + i as f64 * 100.0))
            .collect();
        slices[2].traffic = 0.0;
        slices[7].traffic = 0.0;

        let img = StaticChartRenderer::render_pie_chart(&slices, FIGURE_SIZE).unwrap();
        assert_eq!(img.dimensions(), FIGURE_SIZE);
        for i in 0..slices.len() {
            assert_eq!(swatch_pixel(&img, i), StaticChartRenderer::pie_color(i), "legend row {}", i);
        }
    }

    #[test]
    fn test_render_pie_chart_single_slice() {
        let img = StaticChartRenderer::render_pie_chart(&[material("Concrete", 5000.0)], FIGURE_SIZE).unwrap();
        assert_eq!(img.dimensions(), FIGURE_SIZE);
        assert_eq!(swatch_pixel(&img, 0), StaticChartRenderer::pie_color(0));
    }
}
