//! Charts module - Bridge map and static chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{StaticChartRenderer, FIGURE_SIZE};
