//! Derive legend entries and per-series metadata from chart data.

use log::{debug, warn};
use serde::Serialize;

use crate::models::{ChartData, ChartKind, Series};
use crate::options::LegendOptions;

/// One clickable legend item controlling one or more series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub text: String,
    #[serde(rename = "series")]
    pub series_indices: Vec<usize>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Book-keeping for one original series; index-stable for the lifetime of a legend.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMetadata {
    pub data: Series,
    pub label: Option<String>,
    /// Owning legend entry; `None` when no entry references this series.
    pub legend_index: Option<usize>,
    pub class_name: String,
}

/// Output of [`build`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendModel {
    pub entries: Vec<LegendEntry>,
    pub metadata: Vec<SeriesMetadata>,
    /// True when projections carry labels alongside series.
    pub label_driven: bool,
}

/// Spreadsheet-style lowercase numbering: 0 -> "a", 25 -> "z", 26 -> "aa".
pub fn alpha_numerate(mut n: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Class tag for the series at `index`, e.g. `ct-series-c` for index 2.
pub fn series_class_name(prefix: &str, index: usize) -> String {
    format!("{prefix}-{}", alpha_numerate(index))
}

/// Build the legend model for a chart.
///
/// Source: `options.legend_names` if given, else the labels of a
/// label-driven chart (when present), else the series themselves.
pub fn build(kind: ChartKind, data: &ChartData, options: &LegendOptions) -> LegendModel {
    let label_driven = kind.is_label_driven() && !data.labels.is_empty();

    let sources: Vec<(String, Option<Vec<usize>>)> = match &options.legend_names {
        Some(names) => names
            .iter()
            .map(|n| (n.text(), n.series().map(<[usize]>::to_vec)))
            .collect(),
        None if label_driven => data.labels.iter().map(|l| (l.clone(), None)).collect(),
        None => data
            .series
            .iter()
            .map(|s| (s.display_text(), None))
            .collect(),
    };

    let class_names = options
        .class_names
        .as_ref()
        .filter(|c| c.len() == sources.len());
    if options.class_names.is_some() && class_names.is_none() {
        debug!(
            "ignoring classNames: {} given for {} legend entries",
            options.class_names.as_ref().map_or(0, Vec::len),
            sources.len()
        );
    }

    let entries: Vec<LegendEntry> = sources
        .into_iter()
        .enumerate()
        .map(|(i, (text, series))| LegendEntry {
            text,
            series_indices: series.unwrap_or_else(|| vec![i]),
            active: true,
            class_name: class_names.map(|c| c[i].clone()),
        })
        .collect();

    let mut metadata: Vec<SeriesMetadata> = data
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let class_name = series
                .class_name()
                .map(str::to_string)
                .unwrap_or_else(|| series_class_name(&options.series_class_prefix, i));
            let mut payload = series.clone();
            if options.clickable
                && let Series::Named(named) = &mut payload
                && named.class_name.is_none()
            {
                named.class_name = Some(class_name.clone());
            }
            SeriesMetadata {
                data: payload,
                label: if label_driven {
                    data.labels.get(i).cloned()
                } else {
                    None
                },
                legend_index: None,
                class_name,
            }
        })
        .collect();

    let count = metadata.len();
    for (entry_index, entry) in entries.iter().enumerate() {
        for &series in &entry.series_indices {
            let Some(meta) = metadata.get_mut(series) else {
                warn!(
                    "legend entry {entry_index} ({}) references missing series {series}",
                    entry.text
                );
                continue;
            };
            match meta.legend_index {
                None => meta.legend_index = Some(entry_index),
                Some(owner) if owner != entry_index => {
                    warn!("series {series} already belongs to legend entry {owner}, ignoring entry {entry_index}")
                }
                Some(_) => {}
            }
        }
    }

    debug!(
        "built legend: {} entries over {count} series (label-driven: {label_driven})",
        entries.len()
    );

    LegendModel {
        entries,
        metadata,
        label_driven,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LegendName;
    use serde_json::json;

    fn line_data() -> ChartData {
        serde_json::from_value(json!({
            "labels": ["Mon", "Tue"],
            "series": [
                {"name": "Blue pill", "data": [12, 9]},
                {"name": "Red pill", "data": [2, 1]},
                {"name": "Purple pill", "data": [1, 3]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn alpha_numerate_counts_like_spreadsheet_columns() {
        assert_eq!(alpha_numerate(0), "a");
        assert_eq!(alpha_numerate(2), "c");
        assert_eq!(alpha_numerate(25), "z");
        assert_eq!(alpha_numerate(26), "aa");
        assert_eq!(alpha_numerate(27), "ab");
        assert_eq!(alpha_numerate(701), "zz");
        assert_eq!(alpha_numerate(702), "aaa");
    }

    #[test]
    fn line_chart_takes_legend_from_series_names() {
        let model = build(ChartKind::Line, &line_data(), &LegendOptions::default());
        let texts: Vec<&str> = model.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["Blue pill", "Red pill", "Purple pill"]);
        assert!(!model.label_driven);
        assert!(model.metadata.iter().all(|m| m.label.is_none()));
    }

    #[test]
    fn clickable_legend_tags_named_series_with_class_names() {
        let model = build(ChartKind::Line, &line_data(), &LegendOptions::default());
        let tags: Vec<Option<&str>> = model.metadata.iter().map(|m| m.data.class_name()).collect();
        assert_eq!(tags, [Some("ct-series-a"), Some("ct-series-b"), Some("ct-series-c")]);
    }

    #[test]
    fn existing_class_name_is_kept() {
        let mut data = line_data();
        if let Series::Named(s) = &mut data.series[1] {
            s.class_name = Some("custom".into());
        }
        let model = build(ChartKind::Line, &data, &LegendOptions::default());
        assert_eq!(model.metadata[1].class_name, "custom");
        assert_eq!(model.metadata[1].data.class_name(), Some("custom"));
    }

    #[test]
    fn non_clickable_legend_leaves_payload_untouched() {
        let options = LegendOptions {
            clickable: false,
            ..Default::default()
        };
        let data = line_data();
        let model = build(ChartKind::Line, &data, &options);
        assert_eq!(model.metadata[0].data, data.series[0]);
        assert_eq!(model.metadata[0].class_name, "ct-series-a");
    }

    #[test]
    fn pie_without_labels_falls_back_to_series() {
        let data: ChartData = serde_json::from_value(json!({
            "labels": [],
            "series": [{"name": "Piece A", "value": 20}, {"name": "Piece B", "value": 10}]
        }))
        .unwrap();
        let model = build(ChartKind::Pie, &data, &LegendOptions::default());
        assert!(!model.label_driven);
        assert_eq!(model.entries[1].text, "Piece B");
    }

    #[test]
    fn class_names_require_matching_length() {
        let matching = LegendOptions {
            class_names: Some(vec!["x".into(), "y".into(), "z".into()]),
            ..Default::default()
        };
        let model = build(ChartKind::Line, &line_data(), &matching);
        assert_eq!(model.entries[2].class_name.as_deref(), Some("z"));

        let short = LegendOptions {
            class_names: Some(vec!["x".into()]),
            ..Default::default()
        };
        let model = build(ChartKind::Line, &line_data(), &short);
        assert!(model.entries.iter().all(|e| e.class_name.is_none()));
    }

    #[test]
    fn unreferenced_series_stay_unassigned() {
        let options = LegendOptions {
            legend_names: Some(vec![LegendName::from("only first")]),
            ..Default::default()
        };
        let model = build(ChartKind::Line, &line_data(), &options);
        assert_eq!(model.metadata[0].legend_index, Some(0));
        assert_eq!(model.metadata[1].legend_index, None);
        assert_eq!(model.metadata[2].legend_index, None);
    }

    #[test]
    fn first_entry_keeps_a_doubly_claimed_series() {
        let options = LegendOptions {
            legend_names: Some(
                serde_json::from_value(json!([
                    {"name": "both", "series": [0, 1]},
                    {"name": "again", "series": [1, 2]}
                ]))
                .unwrap(),
            ),
            ..Default::default()
        };
        let model = build(ChartKind::Line, &line_data(), &options);
        let owners: Vec<Option<usize>> = model.metadata.iter().map(|m| m.legend_index).collect();
        assert_eq!(owners, [Some(0), Some(0), Some(1)]);
    }
}
