/*!
 * Interactive legend viewer
 *
 * Opens a chart document and draws it with a clickable legend:
 * - Click a legend entry to hide or show its series
 * - Colours stay attached to the original series while toggling
 *
 * Usage: legend-gui <chart.json> [options.json]
 */

use anyhow::{Context, Result};
use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use legend_rs::legend::{Legend, Trigger};
use legend_rs::models::ChartKind;
use legend_rs::viz::util::{INACTIVE_RGB, series_rgb};
use legend_rs::{HostChart, LegendOptions, MemoryChart, storage};
use std::f32::consts::{PI, TAU};

fn main() -> Result<()> {
    // Enable logging for better debugging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let chart_path = args
        .next()
        .context("usage: legend-gui <chart.json> [options.json]")?;
    let doc = storage::load_chart(&chart_path)?;
    let options = match args.next() {
        Some(path) => LegendOptions::from_path(path)?,
        None => LegendOptions::default(),
    };
    options.validate(doc.data.series.len())?;
    let title = doc.title.clone().unwrap_or_else(|| chart_path.clone());

    let mut legend = Legend::attach(MemoryChart::from(doc), options);
    legend.on_toggle(|chart, event| {
        log::info!(
            "entry {} {:?}; chart now shows {} series",
            event.entry,
            event.outcome,
            chart.data().series.len()
        );
    });

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title(format!("Legend - {title}")),
        ..Default::default()
    };

    eframe::run_native(
        "legend-gui",
        native,
        Box::new(move |_cc| Ok(Box::new(LegendApp { legend, status: String::new() }))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

struct LegendApp {
    legend: Legend<MemoryChart>,
    status: String,
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

impl eframe::App for LegendApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("legend").show(ctx, |ui| {
            ui.heading("Legend");
            ui.separator();
            let items: Vec<(String, bool, usize)> = self
                .legend
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    (e.text.clone(), e.active, e.series_indices.first().copied().unwrap_or(i))
                })
                .collect();
            for (i, (text, active, color_index)) in items.into_iter().enumerate() {
                let color = if active { rgb(series_rgb(color_index)) } else { rgb(INACTIVE_RGB) };
                let label = egui::RichText::new(format!("● {text}")).color(color);
                if ui.selectable_label(active, label).clicked() {
                    self.status = match self.legend.toggle(i, Trigger::Pointer) {
                        Ok(outcome) => format!("{text}: {outcome:?}"),
                        Err(e) => e.to_string(),
                    };
                }
            }
            ui.separator();
            if ui.button("Show all").clicked() {
                self.legend.reset();
                self.status = "all series shown".into();
            }
            if !self.status.is_empty() {
                ui.label(self.status.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
            let rect = response.rect.shrink(24.0);
            painter.rect_filled(response.rect, 0.0, Color32::WHITE);

            let projection = self.legend.projection();
            let values: Vec<Vec<Option<f64>>> = projection.series.iter().map(|s| s.values()).collect();
            match self.legend.kind() {
                ChartKind::Pie | ChartKind::Donut => {
                    let totals: Vec<f64> = projection.series.iter().map(|s| s.total().max(0.0)).collect();
                    paint_pie(&painter, rect, &projection.indices, &totals, self.legend.kind() == ChartKind::Donut);
                }
                ChartKind::Line | ChartKind::Bar => {
                    paint_axis_chart(&painter, rect, &projection.indices, &values, self.legend.kind() == ChartKind::Bar);
                }
            }
        });
    }
}

fn paint_pie(painter: &egui::Painter, rect: Rect, indices: &[usize], totals: &[f64], donut: bool) {
    let sum: f64 = totals.iter().sum();
    if sum <= 0.0 {
        return;
    }
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0;
    let mut start = -PI / 2.0;
    for (&index, &total) in indices.iter().zip(totals) {
        let sweep = (total / sum) as f32 * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
        // egui polygons must be convex, so each slice is a fan of thin triangles
        for i in 0..steps {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            let p0 = center + Vec2::angled(a0) * radius;
            let p1 = center + Vec2::angled(a1) * radius;
            painter.add(Shape::convex_polygon(vec![center, p0, p1], rgb(series_rgb(index)), Stroke::NONE));
        }
        start += sweep;
    }
    if donut {
        painter.circle_filled(center, radius * 0.55, Color32::WHITE);
    }
}

fn paint_axis_chart(painter: &egui::Painter, rect: Rect, indices: &[usize], values: &[Vec<Option<f64>>], bars: bool) {
    let axis = Stroke::new(1.0, Color32::from_gray(80));
    painter.line_segment([rect.left_top(), rect.left_bottom()], axis);
    painter.line_segment([rect.left_bottom(), rect.right_bottom()], axis);

    let finite = || values.iter().flatten().flatten().copied().filter(|v| v.is_finite());
    let (mut lo, mut hi) = (
        finite().fold(f64::INFINITY, f64::min),
        finite().fold(f64::NEG_INFINITY, f64::max),
    );
    if !lo.is_finite() || !hi.is_finite() {
        return;
    }
    if bars {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let n = values.iter().map(Vec::len).max().unwrap_or(0);
    if n == 0 {
        return;
    }
    let map_y = |v: f64| rect.bottom() - ((v - lo) / (hi - lo)) as f32 * rect.height();

    if bars {
        let slot = rect.width() / n as f32;
        let bar_w = slot * 0.8 / values.len().max(1) as f32;
        let base = map_y(0.0f64.clamp(lo, hi));
        for (si, (&index, series)) in indices.iter().zip(values).enumerate() {
            for (i, v) in series.iter().enumerate() {
                let Some(v) = v.filter(|v| v.is_finite()) else {
                    continue;
                };
                let left = rect.left() + i as f32 * slot + slot * 0.1 + si as f32 * bar_w;
                let y = map_y(v);
                let bar = Rect::from_min_max(Pos2::new(left, y.min(base)), Pos2::new(left + bar_w - 1.0, y.max(base)));
                painter.rect_filled(bar, 0.0, rgb(series_rgb(index)));
            }
        }
    } else {
        let x_at = |i: usize| {
            if n == 1 {
                rect.center().x
            } else {
                rect.left() + i as f32 * rect.width() / (n - 1) as f32
            }
        };
        for (&index, series) in indices.iter().zip(values) {
            let color = rgb(series_rgb(index));
            let points: Vec<Pos2> = series
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| Pos2::new(x_at(i), map_y(v))))
                .collect();
            painter.add(Shape::line(points.clone(), Stroke::new(2.0, color)));
            for p in points {
                painter.circle_filled(p, 3.0, color);
            }
        }
    }
}
