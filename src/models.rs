use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chart kinds understood by the legend and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Multi-series line chart (default).
    #[default]
    Line,
    /// Grouped bar chart (one bar per series and category).
    Bar,
    /// Proportional chart, one slice per label.
    Pie,
    /// Pie with a hole in the middle.
    Donut,
}

impl ChartKind {
    /// Label-driven kinds take their legend from category labels, not series names.
    pub fn is_label_driven(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Donut)
    }
}

/// Series object carrying optional metadata next to its payload.
///
/// Fields this crate does not know about are kept in `extra` and written
/// back verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `chart.series`.
///
/// JSON objects parse as [`Series::Named`]; every other value (a number, an
/// array of numbers, a string) parses as [`Series::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Named(NamedSeries),
    Raw(Value),
}

impl Series {
    pub fn named(name: &str, data: Value) -> Self {
        Series::Named(NamedSeries {
            name: Some(name.to_string()),
            data: Some(data),
            ..Default::default()
        })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Series::Named(s) => s.name.as_deref(),
            Series::Raw(_) => None,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Series::Named(s) => s.class_name.as_deref(),
            Series::Raw(_) => None,
        }
    }

    /// Text shown for this series when it has no explicit name.
    pub fn display_text(&self) -> String {
        match self {
            Series::Named(s) => match (&s.name, s.value) {
                (Some(name), _) => name.clone(),
                (None, Some(v)) => v.to_string(),
                (None, None) => serde_json::to_string(s).unwrap_or_default(),
            },
            Series::Raw(v) => value_text(v),
        }
    }

    /// Numeric points of this series.
    ///
    /// A bare number yields one point; arrays yield one point per element
    /// (`None` for non-numeric entries or `{ "y": .. }`-less objects).
    pub fn values(&self) -> Vec<Option<f64>> {
        match self {
            Series::Raw(v) => points_of(v),
            Series::Named(s) => match (&s.data, s.value) {
                (Some(data), _) => points_of(data),
                (None, Some(v)) => vec![Some(v)],
                (None, None) => Vec::new(),
            },
        }
    }

    /// Sum of all numeric points, used for slice sizes of proportional charts.
    pub fn total(&self) -> f64 {
        self.values().into_iter().flatten().sum()
    }
}

fn points_of(v: &Value) -> Vec<Option<f64>> {
    match v {
        Value::Number(n) => vec![n.as_f64()],
        Value::Array(items) => items.iter().map(point_of).collect(),
        _ => Vec::new(),
    }
}

fn point_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::Object(o) => o.get("y").and_then(Value::as_f64),
        _ => None,
    }
}

/// Natural display form of a JSON value: strings unquoted, everything else as JSON text.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Data object of a host chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// A chart as stored on disk: kind, optional title and data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub data: ChartData,
}

/// Record form of a legend override: one entry controlling explicit series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<usize>>,
}

/// Element of `legendNames`: a plain value or a `{ name, series }` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegendName {
    Record(LegendRecord),
    Plain(Value),
}

impl LegendName {
    pub fn text(&self) -> String {
        match self {
            LegendName::Record(r) => r.name.clone(),
            LegendName::Plain(v) => value_text(v),
        }
    }

    pub fn series(&self) -> Option<&[usize]> {
        match self {
            LegendName::Record(r) => r.series.as_deref(),
            LegendName::Plain(_) => None,
        }
    }
}

impl From<&str> for LegendName {
    fn from(s: &str) -> Self {
        LegendName::Plain(Value::String(s.to_string()))
    }
}
