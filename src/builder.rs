use crate::chart::{Axis, ChartConfig, Legend, Series, Title, Tooltip};
use crate::error::ChartError;
use crate::payload::StatsTable;

/// The chart variants, collapsed from the three near-identical prototype
/// files into one parameterized selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Fixed categorical bar chart; ignores the payload content.
    StaticDemo,
    /// Model vs k-LIME prediction overlay with hidden reason-code series.
    KlimeOverlay,
}

/// Build the chart configuration for `kind` from the raw response body.
///
/// The static demo never decodes the body, so even a non-JSON payload
/// still produces the fixed bar chart.
pub fn build(kind: ChartKind, body: &str) -> Result<ChartConfig, ChartError> {
    match kind {
        ChartKind::StaticDemo => Ok(static_demo()),
        ChartKind::KlimeOverlay => klime_overlay(&StatsTable::from_json(body)?),
    }
}

/// The demo bar chart, value for value as the prototype hard-coded it.
pub fn static_demo() -> ChartConfig {
    let categories = ["shirt", "cardign", "chiffon shirt", "pants", "heels", "socks"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    ChartConfig {
        title: Title {
            text: "ECharts entry example".to_string(),
        },
        tooltip: Tooltip::default(),
        legend: Legend {
            data: vec!["Sales".to_string()],
        },
        x_axis: Axis::categories(categories),
        y_axis: Axis::value(),
        series: vec![Series::bar("Sales", vec![5.0, 20.0, 36.0, 10.0, 10.0, 20.0])],
    }
}

/// Prediction overlay: `p1` and `predict_klime` as visible lines over the
/// `idx` axis, plus one hidden line per `rc_*` reason-code column.
///
/// A missing required column is a decode error, not a panic and not a
/// silently empty series.
pub fn klime_overlay(table: &StatsTable) -> Result<ChartConfig, ChartError> {
    let idx = table.require("idx")?;
    let p1 = table.require("p1")?;
    let klime = table.require("predict_klime")?;

    let categories = idx.iter().map(|v| format!("{v}")).collect();

    let mut series = vec![
        Series::line("model_pred", p1.to_vec()),
        Series::line("klime_pred", klime.to_vec()),
    ];
    for (name, values) in table.columns_with_prefix("rc_") {
        series.push(Series::hidden_line(name, values.to_vec()));
    }

    let legend = series.iter().map(|s| s.name.clone()).collect();

    Ok(ChartConfig {
        title: Title {
            text: "Model vs k-LIME prediction".to_string(),
        },
        tooltip: Tooltip::axis(),
        legend: Legend { data: legend },
        x_axis: Axis::categories(categories),
        y_axis: Axis::value(),
        series,
    })
}
