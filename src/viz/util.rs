//! Utility functions for visualization: colors, tick generation, locale mapping.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [(u8, u8, u8); 10] = [
    (68, 114, 196),  // #4472C4
    (237, 125, 49),  // #ED7D31
    (165, 165, 165), // #A5A5A5
    (255, 192, 0),   // #FFC000
    (91, 155, 213),  // #5B9BD5
    (112, 173, 71),  // #70AD47
    (38, 68, 120),   // #264478
    (158, 72, 14),   // #9E480E
    (99, 99, 99),    // #636363
    (153, 115, 0),   // #997300
];

/// Colour used for inactive legend entries.
pub const INACTIVE_RGB: (u8, u8, u8) = (190, 190, 190);
pub const INACTIVE_COLOR: RGBColor = RGBColor(INACTIVE_RGB.0, INACTIVE_RGB.1, INACTIVE_RGB.2);

/// Palette colour for the series at its **original** index, so hiding one
/// series never changes the colour of another.
#[inline]
pub fn series_rgb(original_index: usize) -> (u8, u8, u8) {
    OFFICE10[original_index % OFFICE10.len()]
}

#[inline]
pub fn series_color(original_index: usize) -> RGBAColor {
    let (r, g, b) = series_rgb(original_index);
    RGBColor(r, g, b).to_rgba()
}

#[inline]
pub fn inactive_color() -> RGBAColor {
    INACTIVE_COLOR.to_rgba()
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format a tick value with locale grouping; at most two decimals for small magnitudes.
pub fn format_tick(v: f64, locale: &Locale, dec_sep: char) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 || a == 0.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let scaled = (a * 10f64.powi(prec)).round() as u64;
    let pow = 10u64.pow(prec as u32);
    let int_part = (scaled / pow).to_formatted_string(locale);
    let sign = if v < 0.0 && scaled != 0 { "-" } else { "" };
    if prec == 0 {
        format!("{sign}{int_part}")
    } else {
        let frac = scaled % pow;
        let frac = format!("{frac:0width$}", width = prec as usize);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            format!("{sign}{int_part}")
        } else {
            format!("{sign}{int_part}{dec_sep}{frac}")
        }
    }
}

/// Evenly spaced "nice" ticks (steps of 1, 2 or 5 times a power of ten) covering `min..=max`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min.min(max), min.max(max))
    };
    let raw = (hi - lo) / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    let first = (lo / step).floor() * step;
    let mut ticks = Vec::new();
    let mut t = first;
    while t <= hi + step * 0.5 {
        ticks.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
        if t >= hi {
            break;
        }
        t += step;
    }
    ticks
}
