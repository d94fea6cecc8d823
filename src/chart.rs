use serde::Serialize;

/// Declarative chart configuration in the ECharts option shape.
///
/// Built once by a chart builder, then handed to a rendering backend: the
/// HTML backend serializes it verbatim into a `setOption` call, the
/// plotters backend interprets it directly.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartConfig {
    pub title: Title,
    pub tooltip: Tooltip,
    pub legend: Legend,
    #[serde(rename = "xAxis")]
    pub x_axis: Axis,
    #[serde(rename = "yAxis")]
    pub y_axis: Axis,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

/// Tooltip mode. Serializes to `{}` when no trigger is set, which is what
/// the original demo sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Tooltip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
}

impl Tooltip {
    pub fn axis() -> Self {
        Self {
            trigger: Some("axis".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Legend {
    pub data: Vec<String>,
}

/// An axis; `data` present means categorical, absent means value axis.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

impl Axis {
    pub fn categories(data: Vec<String>) -> Self {
        Self { data: Some(data) }
    }

    pub fn value() -> Self {
        Self { data: None }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// One named series. Style fields are optional overrides and stay out of
/// the serialized option when unset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Series {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<f64>,
    #[serde(rename = "lineStyle", skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(rename = "showSymbol", skip_serializing_if = "Option::is_none")]
    pub show_symbol: Option<bool>,
    #[serde(rename = "symbolSize", skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineStyle {
    pub width: u32,
}

impl Series {
    pub fn bar(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Bar,
            data,
            line_style: None,
            show_symbol: None,
            symbol_size: None,
            color: None,
        }
    }

    pub fn line(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            data,
            line_style: None,
            show_symbol: None,
            symbol_size: None,
            color: None,
        }
    }

    /// A line series that contributes to the y-range but draws nothing:
    /// zero stroke width, no point symbols.
    pub fn hidden_line(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            data,
            line_style: Some(LineStyle { width: 0 }),
            show_symbol: Some(false),
            symbol_size: Some(0),
            color: None,
        }
    }

    /// Whether a backend should draw any geometry for this series.
    pub fn is_visible(&self) -> bool {
        !(matches!(self.kind, SeriesKind::Line)
            && self.line_style.as_ref().map(|s| s.width) == Some(0)
            && self.show_symbol == Some(false))
    }
}
