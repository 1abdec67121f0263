//! Visualization: render a legend's current projection to **SVG**.
//!
//! - Line, bar, pie and donut charts
//! - Series colours keyed by original series index (stable while toggling)
//! - Legend placement: `Inside`, `Right`, `Top`, `Bottom` (non-overlapping for external legends)
//! - Inactive legend entries drawn grey with a hollow marker
//! - Locale-aware y tick labels (`30,000` vs `30.000`)
//!
//! Text is drawn without measuring fonts, so only the SVG backend is supported.

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use legend::LegendItem;
pub use types::{DEFAULT_LEGEND_POSITION, LegendPosition};

use anyhow::{Result, anyhow, bail};
use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use std::f64::consts::{PI, TAU};
use std::path::Path;

use crate::host::HostChart;
use crate::legend::Legend;
use crate::models::ChartKind;
use legend::{draw_legend_panel, estimate_band_height_px};
use text::TextMetrics;
use util::{format_tick, map_locale, nice_ticks, series_color};

const MARGIN: i32 = 16;
const TITLE_H: i32 = 36;
const TICK_FONT_PX: u32 = 12;
const X_LABEL_H: i32 = 28;

/// One visible series, with its original index and colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub index: usize,
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub color: RGBAColor,
}

/// Snapshot of everything the renderer needs from a legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub title: String,
    /// X-axis categories for line/bar charts; slice labels for pie/donut.
    pub categories: Vec<String>,
    pub series: Vec<SeriesView>,
    pub legend: Vec<LegendItem>,
}

impl ChartView {
    pub fn from_legend<C: HostChart>(legend: &Legend<C>, title: &str) -> Self {
        let projection = legend.projection();
        let kind = legend.kind();
        let series: Vec<SeriesView> = projection
            .indices
            .iter()
            .zip(&projection.series)
            .map(|(&index, s)| SeriesView {
                index,
                name: s.display_text(),
                values: s.values(),
                color: series_color(index),
            })
            .collect();

        let categories = if kind.is_label_driven() {
            match &projection.labels {
                Some(labels) => labels.clone(),
                None => series.iter().map(|s| s.name.clone()).collect(),
            }
        } else {
            legend.original_data().labels.clone()
        };

        let legend_items = legend
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| LegendItem {
                label: e.text.clone(),
                color: series_color(e.series_indices.first().copied().unwrap_or(i)),
                active: e.active,
            })
            .collect();

        Self {
            kind,
            title: title.trim().to_string(),
            categories,
            series,
            legend: legend_items,
        }
    }
}

/// Render `view` to an SVG file at `out_path`.
pub fn plot_chart<P: AsRef<Path>>(
    view: &ChartView,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    position: LegendPosition,
) -> Result<()> {
    let out_path = out_path.as_ref();
    match out_path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => {}
        _ => bail!(
            "unsupported output {}, only .svg is supported",
            out_path.display()
        ),
    }
    let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
    draw_chart(&root, view, locale_tag, position)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Render `view` into an SVG string.
pub fn render_svg(
    view: &ChartView,
    width: u32,
    height: u32,
    locale_tag: &str,
    position: LegendPosition,
) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_chart(&root, view, locale_tag, position)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(buf)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &ChartView,
    locale_tag: &str,
    position: LegendPosition,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (num_locale, dec_sep) = map_locale(locale_tag);

    let body = if view.title.is_empty() {
        root.clone()
    } else {
        let (title_area, body) = root.split_vertically(TITLE_H);
        let (tw, _) = title_area.dim_in_pixel();
        title_area
            .draw(&Text::new(
                view.title.as_str(),
                (tw as i32 / 2, TITLE_H / 2),
                TextStyle::from((FontFamily::SansSerif, 20)).pos(Pos::new(HPos::Center, VPos::Center)),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        body
    };

    let axis = !view.kind.is_label_driven();
    let ticks = axis.then(|| value_ticks(view));
    let left_gutter = ticks
        .as_ref()
        .map_or(0, |t| left_gutter_px(t, num_locale, dec_sep));
    let axis_x_start = MARGIN + left_gutter;

    let (body_w, body_h) = body.dim_in_pixel();
    let labels: Vec<&str> = view.legend.iter().map(|i| i.label.as_str()).collect();
    let band_h = || estimate_band_height_px(&labels, axis_x_start, body_w as i32).max(40);

    let (plot_area, legend_area) = match position {
        LegendPosition::Right => {
            let (plot, legend) = body.split_horizontally((80).percent_width());
            (plot, Some(legend))
        }
        LegendPosition::Top => {
            let (legend, plot) = body.split_vertically(band_h());
            (plot, Some(legend))
        }
        LegendPosition::Bottom => {
            let (plot, legend) = body.split_vertically((body_h as i32 - band_h()).max(40));
            (plot, Some(legend))
        }
        LegendPosition::Inside => (body.clone(), None),
    };

    match (view.kind, &ticks) {
        (ChartKind::Line, Some(t)) => draw_axis_chart(&plot_area, view, t, left_gutter, false, num_locale, dec_sep)?,
        (ChartKind::Bar, Some(t)) => draw_axis_chart(&plot_area, view, t, left_gutter, true, num_locale, dec_sep)?,
        (ChartKind::Pie, _) => draw_pie(&plot_area, view, false)?,
        (ChartKind::Donut, _) => draw_pie(&plot_area, view, true)?,
        _ => {}
    }

    match legend_area {
        Some(area) => draw_legend_panel(&area, &view.legend, position, axis_x_start)?,
        None => draw_legend_panel(&plot_area, &view.legend, LegendPosition::Inside, axis_x_start)?,
    }
    Ok(())
}

/// Y ticks over all visible values; bars always include zero.
fn value_ticks(view: &ChartView) -> Vec<f64> {
    let values: Vec<f64> = view
        .series
        .iter()
        .flat_map(|s| s.values.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return nice_ticks(0.0, 1.0, 5);
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if view.kind == ChartKind::Bar {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    nice_ticks(lo, hi, 6)
}

/// Width of the y tick label column, clamped to a sensible range.
fn left_gutter_px(ticks: &[f64], locale: &Locale, dec_sep: char) -> i32 {
    let metrics = TextMetrics::new(TICK_FONT_PX);
    let widest = ticks
        .iter()
        .map(|t| metrics.width(&format_tick(*t, locale, dec_sep)))
        .max()
        .unwrap_or(0);
    (widest.saturating_add(18)).clamp(40, 140) as i32
}

fn draw_axis_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &ChartView,
    ticks: &[f64],
    left_gutter: i32,
    bars: bool,
    locale: &Locale,
    dec_sep: char,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (x0, x1) = (MARGIN + left_gutter, w as i32 - MARGIN);
    let (y0, y1) = (MARGIN, h as i32 - MARGIN - X_LABEL_H);
    if x1 <= x0 || y1 <= y0 {
        return Ok(());
    }
    let (ymin, ymax) = (ticks[0], ticks[ticks.len() - 1]);
    let span = (ymax - ymin).max(f64::EPSILON);
    let map_y = |v: f64| y1 - (((v - ymin) / span) * (y1 - y0) as f64).round() as i32;

    let grid = RGBColor(230, 230, 230);
    let tick_style =
        TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX)).pos(Pos::new(HPos::Right, VPos::Center));
    for &t in ticks {
        let y = map_y(t);
        area.draw(&PathElement::new(vec![(x0, y), (x1, y)], grid.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
        area.draw(&Text::new(format_tick(t, locale, dec_sep), (x0 - 6, y), tick_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    area.draw(&PathElement::new(vec![(x0, y0), (x0, y1), (x1, y1)], BLACK.stroke_width(1)))
        .map_err(|e| anyhow!("{:?}", e))?;

    let n = view
        .series
        .iter()
        .map(|s| s.values.len())
        .max()
        .unwrap_or(0)
        .max(view.categories.len());
    if n == 0 {
        return Ok(());
    }
    let plot_w = (x1 - x0) as f64;
    let x_at = |i: usize| -> i32 {
        if bars {
            x0 + ((i as f64 + 0.5) * plot_w / n as f64).round() as i32
        } else if n == 1 {
            x0 + (plot_w / 2.0) as i32
        } else {
            x0 + (i as f64 * plot_w / (n - 1) as f64).round() as i32
        }
    };

    let label_step = n.div_ceil(12).max(1);
    let x_style =
        TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX)).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, label) in view.categories.iter().enumerate().step_by(label_step) {
        area.draw(&Text::new(label.as_str(), (x_at(i), y1 + 6), x_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    if bars {
        let slot = plot_w / n as f64;
        let group = slot * 0.8;
        let bar_w = group / view.series.len().max(1) as f64;
        let base = map_y(0.0f64.clamp(ymin, ymax));
        for (si, s) in view.series.iter().enumerate() {
            for (i, v) in s.values.iter().enumerate() {
                let Some(v) = v.filter(|v| v.is_finite()) else {
                    continue;
                };
                let left = x0 as f64 + i as f64 * slot + (slot - group) / 2.0 + si as f64 * bar_w;
                let (l, r) = (left.round() as i32, (left + bar_w).round() as i32 - 1);
                let y = map_y(v);
                area.draw(&Rectangle::new([(l, y.min(base)), (r.max(l), y.max(base))], s.color.filled()))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    } else {
        for s in &view.series {
            // gaps (missing values) split the line into segments
            let mut segment: Vec<(i32, i32)> = Vec::new();
            let mut segments: Vec<Vec<(i32, i32)>> = Vec::new();
            for (i, v) in s.values.iter().enumerate() {
                match v.filter(|v| v.is_finite()) {
                    Some(v) => segment.push((x_at(i), map_y(v))),
                    None if !segment.is_empty() => segments.push(std::mem::take(&mut segment)),
                    None => {}
                }
            }
            if !segment.is_empty() {
                segments.push(segment);
            }
            for seg in &segments {
                area.draw(&PathElement::new(seg.clone(), s.color.stroke_width(2)))
                    .map_err(|e| anyhow!("{:?}", e))?;
                for &p in seg {
                    area.draw(&Circle::new(p, 3, s.color.filled()))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
    }
    Ok(())
}

fn draw_pie<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, view: &ChartView, donut: bool) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = (w.min(h) as f64 / 2.0 - MARGIN as f64 * 2.0).max(10.0);

    let totals: Vec<f64> = view
        .series
        .iter()
        .map(|s| s.values.iter().flatten().filter(|v| v.is_finite() && **v > 0.0).sum())
        .collect();
    let sum: f64 = totals.iter().sum();
    if sum <= 0.0 {
        return Ok(());
    }

    let label_style =
        TextStyle::from((FontFamily::SansSerif, 13)).pos(Pos::new(HPos::Center, VPos::Center));
    let at = |angle: f64, r: f64| -> (i32, i32) {
        (
            center.0 + (r * angle.cos()).round() as i32,
            center.1 + (r * angle.sin()).round() as i32,
        )
    };

    let mut start = -PI / 2.0;
    for (k, (s, total)) in view.series.iter().zip(&totals).enumerate() {
        let sweep = total / sum * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
        let mut points = vec![center];
        points.extend((0..=steps).map(|i| at(start + sweep * i as f64 / steps as f64, radius)));
        area.draw(&Polygon::new(points, s.color.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;

        if sweep / TAU >= 0.05
            && let Some(label) = view.categories.get(k)
        {
            let r = if donut { radius * 0.78 } else { radius * 0.65 };
            area.draw(&Text::new(label.as_str(), at(start + sweep / 2.0, r), label_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        start += sweep;
    }

    if donut {
        area.draw(&Circle::new(center, (radius * 0.55) as i32, WHITE.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
