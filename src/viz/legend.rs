//! Legend layout and drawing for the SVG renderer.
//!
//! Inactive entries stay in the legend (so they can be switched back on)
//! and are drawn grey with a hollow marker.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::TextMetrics;
use super::types::LegendPosition;
use super::util::{INACTIVE_COLOR, inactive_color};

/// One row of the rendered legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: RGBAColor,
    pub active: bool,
}

// Layout constants shared by the estimator and the drawing code.
const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 4;
const PAD_SMALL: i32 = 6;
const PAD_BAND: i32 = 8;
const MARKER_RADIUS: i32 = 4;
const MARKER_TO_TEXT: i32 = 12;
const TRAILING_GAP: i32 = 12;
const MIN_SLOT: i32 = 60;
const BLOCK_EXTRA: i32 = MARKER_TO_TEXT + MARKER_RADIUS + TRAILING_GAP;

/// Column-aligned multi-row layout for top/bottom legend bands.
#[derive(Debug, Clone, PartialEq)]
struct BandLayout {
    /// Item indices per row.
    rows: Vec<Vec<usize>>,
    /// X position of each column's text.
    col_x: Vec<i32>,
    /// Text width cap per column.
    text_cap: Vec<u32>,
}

impl BandLayout {
    fn new(labels: &[&str], start_x: i32, total_w: i32) -> Self {
        let metrics = TextMetrics::new(FONT_PX);
        let usable_w = total_w - PAD_SMALL;
        let per_item_cap = (((usable_w - start_x) as f32) * 0.35).max(140.0) as i32;
        let block_w = |label: &str, cap: i32| -> i32 {
            let lines = metrics.wrap(label, cap.max(40) as u32);
            BLOCK_EXTRA + metrics.max_width(&lines) as i32
        };

        // greedy row packing decides the column count
        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut cur: Vec<usize> = Vec::new();
        let mut x = start_x;
        for (i, label) in labels.iter().enumerate() {
            let cap_now = ((usable_w - x).max(40) - BLOCK_EXTRA).min(per_item_cap);
            let mut w = block_w(label, cap_now);
            if x + w > usable_w && !cur.is_empty() {
                rows.push(std::mem::take(&mut cur));
                x = start_x;
                w = block_w(label, (usable_w - start_x - BLOCK_EXTRA).min(per_item_cap));
            }
            x += w;
            cur.push(i);
        }
        if !cur.is_empty() {
            rows.push(cur);
        }
        let cols = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);

        // per-column widths from the longest single-line label, else uniform slots
        let mut slot = vec![MIN_SLOT; cols];
        for row in &rows {
            for (ci, &item) in row.iter().enumerate() {
                let w = BLOCK_EXTRA + metrics.width(labels[item]) as i32;
                slot[ci] = slot[ci].max(w);
            }
        }
        if start_x + slot.iter().sum::<i32>() > usable_w {
            let uniform = ((usable_w - start_x) / cols as i32).max(MIN_SLOT);
            slot = vec![uniform; cols];
        }

        let mut col_x = Vec::with_capacity(cols);
        let mut acc = start_x;
        for w in &slot {
            col_x.push(acc);
            acc += w;
        }
        let text_cap = slot.iter().map(|w| (w - BLOCK_EXTRA).max(40) as u32).collect();

        Self {
            rows,
            col_x,
            text_cap,
        }
    }

    fn wrapped(&self, labels: &[&str], row: usize) -> Vec<Vec<String>> {
        let metrics = TextMetrics::new(FONT_PX);
        self.rows[row]
            .iter()
            .enumerate()
            .map(|(ci, &item)| metrics.wrap(labels[item], self.text_cap[ci]))
            .collect()
    }

    fn row_height(lines: &[Vec<String>]) -> i32 {
        lines
            .iter()
            .map(|l| l.len().max(1) as i32 * LINE_H)
            .max()
            .unwrap_or(LINE_H)
            .max(LINE_H)
    }
}

/// Height in pixels a top/bottom legend band needs for `labels`.
pub fn estimate_band_height_px(labels: &[&str], start_x: i32, total_w: i32) -> i32 {
    let layout = BandLayout::new(labels, start_x, total_w);
    let mut height = PAD_BAND + 8;
    for row in 0..layout.rows.len() {
        height += BandLayout::row_height(&layout.wrapped(labels, row));
        if row + 1 < layout.rows.len() {
            height += ROW_GAP;
        }
    }
    height + PAD_BAND
}

/// Width in pixels an inside (overlay) legend box needs.
pub fn estimate_inside_width_px(items: &[LegendItem]) -> i32 {
    let metrics = TextMetrics::new(FONT_PX);
    let widest = items
        .iter()
        .map(|i| metrics.width(&i.label))
        .max()
        .unwrap_or(0) as i32;
    widest.min(220) + BLOCK_EXTRA + 2 * PAD_SMALL
}

fn label_style(active: bool) -> TextStyle<'static> {
    let style = TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    if active {
        style.color(&BLACK)
    } else {
        style.color(&INACTIVE_COLOR)
    }
}

fn draw_item<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    item: &LegendItem,
    marker: (i32, i32),
    text_x: i32,
    top: i32,
    lines: &[String],
) -> Result<()> {
    let style = if item.active {
        item.color.filled()
    } else {
        inactive_color().stroke_width(1)
    };
    area.draw(&Circle::new(marker, MARKER_RADIUS, style))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let text_style = label_style(item.active);
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as i32 * LINE_H + LINE_H / 2;
        area.draw(&Text::new(line.as_str(), (text_x, y), text_style.clone()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Draw the legend into `legend_area`.
///
/// `Right` is a single column; `Top`/`Bottom` are column-aligned bands whose
/// first column starts at `axis_x_start_px`; `Inside` draws a framed box in
/// the top-right corner of the area it is given.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    position: LegendPosition,
    axis_x_start_px: i32,
) -> Result<()> {
    let metrics = TextMetrics::new(FONT_PX);
    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;

    match position {
        LegendPosition::Right => {
            legend_area
                .fill(&WHITE)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            let pad_x = PAD_SMALL;
            let text_x = pad_x + 24;
            let max_text_w = (w - text_x - pad_x).max(40) as u32;
            let mut y = PAD_SMALL + 6;
            for item in items {
                let lines = metrics.wrap(&item.label, max_text_w);
                let block_h = lines.len().max(1) as i32 * LINE_H;
                draw_item(legend_area, item, (pad_x + 12, y + block_h / 2), text_x, y, &lines)?;
                y += block_h + ROW_GAP;
            }
        }

        LegendPosition::Top | LegendPosition::Bottom => {
            legend_area
                .fill(&WHITE)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
            let layout = BandLayout::new(&labels, axis_x_start_px, w);
            let mut y_top = PAD_BAND + 8;
            for (ri, row) in layout.rows.iter().enumerate() {
                let wrapped = layout.wrapped(&labels, ri);
                let row_h = BandLayout::row_height(&wrapped);
                let y_center = y_top + row_h / 2;
                for (ci, &item) in row.iter().enumerate() {
                    let text_x = layout.col_x[ci];
                    let lines = &wrapped[ci];
                    let block_h = lines.len().max(1) as i32 * LINE_H;
                    let marker = ((text_x - MARKER_TO_TEXT).max(0), y_center);
                    draw_item(legend_area, &items[item], marker, text_x, y_center - block_h / 2, lines)?;
                }
                y_top += row_h + ROW_GAP;
            }
        }

        LegendPosition::Inside => {
            if items.is_empty() {
                return Ok(());
            }
            let box_w = estimate_inside_width_px(items);
            let max_text_w = (box_w - BLOCK_EXTRA - 2 * PAD_SMALL).max(40) as u32;
            let wrapped: Vec<Vec<String>> =
                items.iter().map(|i| metrics.wrap(&i.label, max_text_w)).collect();
            let box_h = wrapped
                .iter()
                .map(|l| l.len().max(1) as i32 * LINE_H + ROW_GAP)
                .sum::<i32>()
                + 2 * PAD_SMALL;
            let x0 = (w - box_w - PAD_BAND).max(0);
            let y0 = PAD_BAND;
            legend_area
                .draw(&Rectangle::new([(x0, y0), (x0 + box_w, y0 + box_h)], WHITE.mix(0.85).filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            legend_area
                .draw(&Rectangle::new(
                    [(x0, y0), (x0 + box_w, y0 + box_h)],
                    inactive_color().stroke_width(1),
                ))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;

            let text_x = x0 + PAD_SMALL + MARKER_RADIUS + MARKER_TO_TEXT;
            let mut y = y0 + PAD_SMALL;
            for (item, lines) in items.iter().zip(&wrapped) {
                let block_h = lines.len().max(1) as i32 * LINE_H;
                let marker = (x0 + PAD_SMALL + MARKER_RADIUS, y + block_h / 2);
                draw_item(legend_area, item, marker, text_x, y, lines)?;
                y += block_h + ROW_GAP;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_fit_one_row() {
        let labels = ["Blue pill", "Red pill", "Purple pill"];
        let one_row = estimate_band_height_px(&labels, 60, 1000);
        assert_eq!(one_row, PAD_BAND + 8 + LINE_H + PAD_BAND);
    }

    #[test]
    fn narrow_canvas_needs_more_rows() {
        let labels = ["A fairly long legend label", "Another long legend label", "Third one here"];
        let wide = estimate_band_height_px(&labels, 60, 1200);
        let narrow = estimate_band_height_px(&labels, 60, 300);
        assert!(narrow > wide, "{narrow} <= {wide}");
    }
}
