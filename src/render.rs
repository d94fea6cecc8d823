use std::io::{self, Write};
use std::path::Path;

use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::{ChartConfig, Series, SeriesKind};
use crate::error::ChartError;
use crate::html;
use crate::palette;
use crate::{OutputFormat, RenderOptions};

/// Render a chart configuration to output bytes in the requested format.
pub fn render(config: &ChartConfig, options: &RenderOptions) -> Result<Vec<u8>, ChartError> {
    match options.format {
        OutputFormat::Png => render_png(config, options),
        OutputFormat::Svg => render_svg(config, options),
        OutputFormat::Html => html::render_page(config, options).map(String::into_bytes),
    }
}

/// Write chart bytes to a file, or to stdout when no target is given.
///
/// The output location plays the role the `#main` DOM container played in
/// the prototype: writing into a directory that does not exist is a
/// render-target error, not something to paper over by creating it.
pub fn write_to(target: Option<&Path>, bytes: &[u8]) -> Result<(), ChartError> {
    match target {
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes)?;
            handle.flush()?;
        }
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.is_dir() {
                    return Err(ChartError::RenderTarget(parent.to_path_buf()));
                }
            }
            std::fs::write(path, bytes)?;
        }
    }
    Ok(())
}

fn render_png(config: &ChartConfig, options: &RenderOptions) -> Result<Vec<u8>, ChartError> {
    let mut buffer = vec![0u8; (options.width * options.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        draw_chart(config, &root)?;
        root.present().map_err(render_err)?;
    }

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            &buffer,
            options.width,
            options.height,
            image::ColorType::Rgb8,
        )
        .map_err(|e| ChartError::Render(format!("failed to encode PNG: {e}")))?;
    Ok(png_bytes)
}

fn render_svg(config: &ChartConfig, options: &RenderOptions) -> Result<Vec<u8>, ChartError> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_chart(config, &root)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg.into_bytes())
}

/// Draw onto any plotters backend: categorical x-axis, dodged bars, lines
/// over category centers. Series hidden by style (zero-width, symbol-less
/// lines) still widen the y-range but produce no geometry and no legend
/// entry.
fn draw_chart<DB: DrawingBackend>(
    config: &ChartConfig,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(render_err)?;

    let categories = config
        .x_axis
        .data
        .clone()
        .ok_or_else(|| ChartError::Render("x axis has no categories".to_string()))?;
    if categories.is_empty() {
        return Err(ChartError::Render(
            "cannot draw a chart with no categories".to_string(),
        ));
    }

    let y_range = y_range(config)?;
    let num_categories = categories.len();

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(&config.title.text, ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..num_categories as f64, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_labels(num_categories)
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            categories.get(idx).cloned().unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    let bar_series: Vec<(usize, &Series)> = config
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SeriesKind::Bar && s.is_visible())
        .collect();
    let num_bars = bar_series.len();

    for (slot, &(series_idx, series)) in bar_series.iter().enumerate() {
        let color = resolved_color(series, series_idx);
        let bar_width = 0.8 / num_bars as f64;
        let rects = series.data.iter().enumerate().map(|(cat_idx, &y)| {
            let x_offset = (slot as f64 - (num_bars as f64 - 1.0) / 2.0) * bar_width;
            let x_center = cat_idx as f64 + 0.5 + x_offset;
            Rectangle::new(
                [
                    (x_center - bar_width / 2.0, 0.0),
                    (x_center + bar_width / 2.0, y),
                ],
                color.filled(),
            )
        });
        chart
            .draw_series(rects)
            .map_err(render_err)?
            .label(&series.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled()));
    }

    for (series_idx, series) in config
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SeriesKind::Line && s.is_visible())
    {
        let color = resolved_color(series, series_idx);
        let width = series.line_style.as_ref().map_or(2, |s| s.width);
        let points: Vec<(f64, f64)> = series
            .data
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64 + 0.5, y))
            .collect();

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(width),
            ))
            .map_err(render_err)?
            .label(&series.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
            });

        if series.show_symbol != Some(false) {
            let size = series.symbol_size.unwrap_or(4) as i32;
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), size, color.filled())),
                )
                .map_err(render_err)?;
        }
    }

    if config.series.iter().any(Series::is_visible) {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// Global y-range over every series, hidden ones included, padded the
/// same way for all backends. A bar series anchors the range at zero.
fn y_range(config: &ChartConfig) -> Result<std::ops::Range<f64>, ChartError> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for series in &config.series {
        for &v in &series.data {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return Err(ChartError::Render(
            "cannot draw a chart with no series data".to_string(),
        ));
    }
    if config.series.iter().any(|s| s.kind == SeriesKind::Bar) {
        y_min = y_min.min(0.0);
    }

    if y_min == y_max {
        Ok((y_min - 1.0)..(y_max + 1.0))
    } else {
        let padding = (y_max - y_min) * 0.05;
        Ok((y_min - padding)..(y_max + padding))
    }
}

fn resolved_color(series: &Series, index: usize) -> RGBColor {
    series
        .color
        .as_deref()
        .and_then(palette::parse_color)
        .unwrap_or_else(|| palette::series_color(index))
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}
