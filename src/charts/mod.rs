pub mod figure;
pub mod line_chart;

pub use figure::{Figure, Trace};
pub use line_chart::{DashboardFigures, LineChartBuilder, Panel};
