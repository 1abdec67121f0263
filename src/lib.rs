//! legend_rs
//!
//! Interactive chart legends. A [`Legend`] derives its entries from chart
//! data, toggles series visibility when an entry is activated, and hands the
//! visible series (in their original order) back to the host chart.
//!
//! ### Features
//! - Legend from series names, pie labels, or explicit overrides
//! - One entry may control several series (`{ name, series: [1, 3] }`)
//! - Optional "never blank" policy: switching off the last entry restores all
//! - Render the current projection with its legend to SVG
//!
//! ### Example
//! ```
//! use legend_rs::{ChartKind, Legend, LegendOptions, MemoryChart, Trigger};
//! use legend_rs::models::ChartData;
//!
//! let data: ChartData = serde_json::from_str(
//!     r#"{"labels": ["A", "B", "C", "D"], "series": [20, 10, 30, 40]}"#,
//! )?;
//! let mut legend = Legend::attach(MemoryChart::new(ChartKind::Pie, data), LegendOptions::default());
//! legend.toggle(1, Trigger::Pointer)?;
//! let projection = legend.projection();
//! assert_eq!(projection.labels.as_deref(), Some(&["A".to_string(), "C".into(), "D".into()][..]));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod host;
pub mod legend;
pub mod models;
pub mod options;
pub mod storage;
pub mod viz;

pub use host::{HostChart, MemoryChart};
pub use legend::{Legend, LegendError, ToggleEvent, ToggleOutcome, Trigger};
pub use models::{ChartData, ChartKind, Series};
pub use options::{ConfigError, LegendOptions};
