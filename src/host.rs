//! The chart a legend is attached to.
//!
//! A legend reads `data()` once when it is built and afterwards only
//! writes projected arrays back and asks for a re-render.

use crate::models::{ChartData, ChartDocument, ChartKind, Series};

pub trait HostChart {
    fn kind(&self) -> ChartKind;
    fn data(&self) -> &ChartData;
    fn set_series(&mut self, series: Vec<Series>);
    fn set_labels(&mut self, labels: Vec<String>);
    /// Request a re-render with the current data.
    fn update(&mut self);
}

/// Host chart that keeps its data in memory and counts re-render requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryChart {
    kind: ChartKind,
    title: Option<String>,
    data: ChartData,
    renders: usize,
}

impl MemoryChart {
    pub fn new(kind: ChartKind, data: ChartData) -> Self {
        Self {
            kind,
            title: None,
            data,
            renders: 0,
        }
    }

    /// Number of `update()` calls so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Replace the whole data object, as an application would before a rebuild.
    pub fn replace_data(&mut self, data: ChartData) {
        self.data = data;
    }

    pub fn to_document(&self) -> ChartDocument {
        ChartDocument {
            kind: self.kind,
            title: self.title.clone(),
            data: self.data.clone(),
        }
    }
}

impl From<ChartDocument> for MemoryChart {
    fn from(doc: ChartDocument) -> Self {
        Self {
            kind: doc.kind,
            title: doc.title,
            data: doc.data,
            renders: 0,
        }
    }
}

impl HostChart for MemoryChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn data(&self) -> &ChartData {
        &self.data
    }

    fn set_series(&mut self, series: Vec<Series>) {
        self.data.series = series;
    }

    fn set_labels(&mut self, labels: Vec<String>) {
        self.data.labels = labels;
    }

    fn update(&mut self) {
        self.renders += 1;
    }
}
