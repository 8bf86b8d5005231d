use crate::charts::figure::{Axis, Figure, Font, Layout, Legend, Text, Trace};
use crate::models::{AggregateTable, DelayAggregates, DelayCause};
use serde::Serialize;

const TRANSPARENT: &str = "rgba(0,0,0,0)";
const FONT_COLOR: &str = "white";

/// Builds one line chart per delay cause: Month on x, mean delay on y,
/// one line per airline.
pub struct LineChartBuilder {
    background: String,
    font_color: String,
}

impl LineChartBuilder {
    pub fn new() -> Self {
        Self {
            background: TRANSPARENT.to_string(),
            font_color: FONT_COLOR.to_string(),
        }
    }

    pub fn with_background(mut self, color: &str) -> Self {
        self.background = color.to_string();
        self
    }

    pub fn with_font_color(mut self, color: &str) -> Self {
        self.font_color = color.to_string();
        self
    }

    /// Traces follow the airlines' first appearance in the table and
    /// points keep table order. An empty table yields a figure with no
    /// traces.
    pub fn build(&self, table: &AggregateTable) -> Figure {
        let mut traces: Vec<Trace> = Vec::new();

        for row in &table.rows {
            let index = match traces
                .iter()
                .position(|t| t.name == row.reporting_airline)
            {
                Some(i) => i,
                None => {
                    traces.push(Trace::line(&row.reporting_airline));
                    traces.len() - 1
                }
            };
            traces[index].push(row.month, row.mean);
        }

        Figure {
            data: traces,
            layout: self.layout(table.cause),
        }
    }

    pub fn build_all(&self, aggregates: &DelayAggregates) -> DashboardFigures {
        let panels = aggregates
            .iter()
            .map(|table| Panel {
                id: table.cause.element_id(),
                cause: table.cause.column(),
                figure: self.build(table),
            })
            .collect();

        DashboardFigures {
            year: aggregates.year,
            panels,
        }
    }

    fn layout(&self, cause: DelayCause) -> Layout {
        Layout {
            title: Text::new(&cause.chart_title()),
            xaxis: Axis {
                title: Text::new("Month"),
            },
            yaxis: Axis {
                title: Text::new(cause.column()),
            },
            legend: Legend {
                title: Text::new("Reporting_Airline"),
            },
            paper_bgcolor: self.background.clone(),
            plot_bgcolor: self.background.clone(),
            font: Font {
                color: self.font_color.clone(),
            },
        }
    }
}

impl Default for LineChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One chart region of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: &'static str,
    pub cause: &'static str,
    pub figure: Figure,
}

/// Everything the page needs to redraw after a year change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFigures {
    pub year: i32,
    pub panels: Vec<Panel>,
}

impl DashboardFigures {
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}
