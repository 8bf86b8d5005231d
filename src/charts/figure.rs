//! Plotly figure description, serialized as the JSON that `Plotly.react`
//! accepts. Only the attributes the dashboard sets are modelled.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub legendgroup: String,
    pub x: Vec<u32>,
    /// `null` entries leave a gap in the line.
    pub y: Vec<Option<f64>>,
}

impl Trace {
    pub fn line(name: &str) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: name.to_string(),
            legendgroup: name.to_string(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn push(&mut self, x: u32, y: Option<f64>) {
        self.x.push(x);
        self.y.push(y);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Text,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
}
