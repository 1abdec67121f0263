//! Recompute the visible series (and labels) from the legend state.

use log::debug;
use serde::Serialize;

use super::builder::{LegendEntry, SeriesMetadata};
use crate::models::Series;

/// Visible subset of the original series, in original index order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Projection {
    /// Original index of every projected series.
    pub indices: Vec<usize>,
    pub series: Vec<Series>,
    /// Present for label-driven charts; always as long as `series`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Project `metadata` through the active flags of `entries`.
///
/// Series without an owning entry are never included.
pub fn project(metadata: &[SeriesMetadata], entries: &[LegendEntry], label_driven: bool) -> Projection {
    let mut out = Projection {
        labels: label_driven.then(Vec::new),
        ..Default::default()
    };
    for (i, meta) in metadata.iter().enumerate() {
        let visible = meta
            .legend_index
            .and_then(|e| entries.get(e))
            .is_some_and(|e| e.active);
        if !visible {
            continue;
        }
        out.indices.push(i);
        out.series.push(meta.data.clone());
        if let Some(labels) = out.labels.as_mut() {
            labels.push(meta.label.clone().unwrap_or_default());
        }
    }
    debug!("projected {} of {} series", out.len(), metadata.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: i64, label: Option<&str>, legend_index: Option<usize>) -> SeriesMetadata {
        SeriesMetadata {
            data: Series::Raw(json!(value)),
            label: label.map(String::from),
            legend_index,
            class_name: String::new(),
        }
    }

    fn entry(series: &[usize], active: bool) -> LegendEntry {
        LegendEntry {
            text: String::new(),
            series_indices: series.to_vec(),
            active,
            class_name: None,
        }
    }

    #[test]
    fn unowned_series_are_never_projected() {
        let metadata = [meta(1, None, Some(0)), meta(2, None, None), meta(3, None, Some(1))];
        let entries = [entry(&[0], true), entry(&[2], true)];
        let p = project(&metadata, &entries, false);
        assert_eq!(p.indices, vec![0, 2]);
        assert!(p.labels.is_none());
    }

    #[test]
    fn labels_follow_series_and_default_to_empty() {
        let metadata = [meta(1, Some("A"), Some(0)), meta(2, Some("B"), Some(1)), meta(3, None, Some(2))];
        let entries = [entry(&[0], false), entry(&[1], true), entry(&[2], true)];
        let p = project(&metadata, &entries, true);
        assert_eq!(p.series, vec![Series::Raw(json!(2)), Series::Raw(json!(3))]);
        assert_eq!(p.labels, Some(vec!["B".to_string(), String::new()]));
    }
}
