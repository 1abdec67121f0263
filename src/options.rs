//! Legend configuration.
//!
//! Options are plain data and deserialize from camelCase JSON, e.g.
//!
//! ```json
//! { "legendNames": ["Sheep", "are", "animals"], "removeAll": true, "position": "top" }
//! ```
//!
//! The toggle callback is not part of the options; register it with
//! [`Legend::on_toggle`](crate::legend::Legend::on_toggle).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{ChartKind, LegendName};
use crate::viz::types::{LegendPosition, default_position_for};

/// Errors raised while loading or checking legend options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read options file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid legend options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("legend entry {entry} references series {series}, but the chart has {count} series")]
    SeriesOutOfRange {
        entry: usize,
        series: usize,
        count: usize,
    },
    #[error("series {series} is claimed by legend entries {first} and {second}")]
    DuplicateSeries {
        series: usize,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendOptions {
    /// Extra class for the legend container.
    pub class_name: String,
    /// Replaces the derived legend source, entry for entry.
    pub legend_names: Option<Vec<LegendName>>,
    /// Per-entry classes; used only when the length equals the entry count.
    pub class_names: Option<Vec<String>>,
    /// Whether entries can be toggled at all.
    pub clickable: bool,
    /// Allow every entry to be inactive (an empty chart).
    pub remove_all: bool,
    /// Placement of the legend; `None` picks a default from the chart kind.
    pub position: Option<LegendPosition>,
    /// Prefix of the class tag injected into each series (`ct-series-a`, ...).
    pub series_class_prefix: String,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            legend_names: None,
            class_names: None,
            clickable: true,
            remove_all: false,
            position: None,
            series_class_prefix: "ct-series".to_string(),
        }
    }
}

impl LegendOptions {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Effective legend placement for a chart of `kind`.
    pub fn position_for(&self, kind: ChartKind) -> LegendPosition {
        self.position.unwrap_or_else(|| default_position_for(kind))
    }

    /// Check explicit `{ name, series }` records against a chart with
    /// `series_count` series: every index must exist and belong to one entry.
    pub fn validate(&self, series_count: usize) -> Result<(), ConfigError> {
        let Some(names) = &self.legend_names else {
            return Ok(());
        };
        let mut owner: BTreeMap<usize, usize> = BTreeMap::new();
        for (entry, name) in names.iter().enumerate() {
            let declared = name.series().map(<[usize]>::to_vec);
            let indices = declared.unwrap_or_else(|| vec![entry]);
            for series in indices {
                if name.series().is_some() && series >= series_count {
                    return Err(ConfigError::SeriesOutOfRange {
                        entry,
                        series,
                        count: series_count,
                    });
                }
                if let Some(&first) = owner.get(&series)
                    && first != entry
                {
                    return Err(ConfigError::DuplicateSeries {
                        series,
                        first,
                        second: entry,
                    });
                }
                owner.insert(series, entry);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_clickable_and_keep_one_entry() {
        let o = LegendOptions::from_json_str("{}").unwrap();
        assert!(o.clickable);
        assert!(!o.remove_all);
        assert_eq!(o.series_class_prefix, "ct-series");
        assert_eq!(o.position_for(ChartKind::Line), LegendPosition::Bottom);
        assert_eq!(o.position_for(ChartKind::Pie), LegendPosition::Inside);
    }

    #[test]
    fn malformed_position_is_rejected() {
        let err = LegendOptions::from_json_str(r#"{"position": "sideways"}"#).unwrap_err();
        assert!(err.to_string().contains("sideways"), "{err}");
    }

    #[test]
    fn validate_rejects_shared_series() {
        let o = LegendOptions::from_json_str(
            r#"{"legendNames": [{"name": "a", "series": [0, 1]}, {"name": "b", "series": [1]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            o.validate(3),
            Err(ConfigError::DuplicateSeries { series: 1, first: 0, second: 1 })
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_records() {
        let o = LegendOptions::from_json_str(r#"{"legendNames": [{"name": "a", "series": [7]}]}"#)
            .unwrap();
        assert!(matches!(
            o.validate(3),
            Err(ConfigError::SeriesOutOfRange { series: 7, count: 3, .. })
        ));
    }
}
