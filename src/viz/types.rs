//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ChartKind;

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LegendPosition {
    /// Overlay legend inside the plotting area (may overlap data).
    Inside,
    /// Separate, non-overlapping legend panel on the right side.
    Right,
    /// Separate, non-overlapping legend band at the top.
    Top,
    /// Separate, non-overlapping legend band at the bottom.
    Bottom,
}

/// Error for a positioning value that is not one of the known placements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown legend position `{0}`, expected top, bottom, right or inside")]
pub struct ParsePositionError(pub String);

impl FromStr for LegendPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" => Ok(LegendPosition::Inside),
            "right" => Ok(LegendPosition::Right),
            "top" => Ok(LegendPosition::Top),
            "bottom" => Ok(LegendPosition::Bottom),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

impl TryFrom<String> for LegendPosition {
    type Error = ParsePositionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LegendPosition> for String {
    fn from(p: LegendPosition) -> Self {
        p.to_string()
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LegendPosition::Inside => "inside",
            LegendPosition::Right => "right",
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
        })
    }
}

/// Default legend placement for axis charts: a horizontal band below the
/// chart keeps labels close to the x-axis start.
pub const DEFAULT_LEGEND_POSITION: LegendPosition = LegendPosition::Bottom;

/// Placement used when the options leave `position` unset.
///
/// Proportional charts have free corners, so their legend sits inside.
pub fn default_position_for(kind: ChartKind) -> LegendPosition {
    if kind.is_label_driven() {
        LegendPosition::Inside
    } else {
        DEFAULT_LEGEND_POSITION
    }
}
