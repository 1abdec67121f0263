//! Interactive legend over a [`HostChart`].
//!
//! - [`builder`] derives entries and per-series metadata from chart data
//! - [`state`] flips entry visibility (with the no-blank-chart policy)
//! - [`projector`] recomputes the visible series/labels in original order
//!
//! [`Legend`] ties the three together: every toggle runs state + projection,
//! writes the result onto the host chart, requests a re-render and finally
//! calls the registered toggle callback.

pub mod builder;
pub mod projector;
pub mod state;

pub use builder::{LegendEntry, LegendModel, SeriesMetadata, alpha_numerate, build};
pub use projector::{Projection, project};
pub use state::{ToggleOutcome, Toggled, toggle};

use log::debug;

use crate::host::HostChart;
use crate::models::{ChartData, ChartKind};
use crate::options::LegendOptions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LegendError {
    #[error("no legend entry at index {index} (legend has {count} entries)")]
    UnknownEntry { index: usize, count: usize },
    #[error("legend is not clickable")]
    NotClickable,
}

/// How the user activated a legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    Pointer,
    Keyboard,
    Touch,
    Programmatic,
}

/// Passed to the toggle callback after the host was asked to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEvent {
    pub entry: usize,
    pub outcome: ToggleOutcome,
    pub trigger: Trigger,
}

type ToggleCallback<C> = Box<dyn FnMut(&C, &ToggleEvent)>;

pub struct Legend<C: HostChart> {
    chart: C,
    options: LegendOptions,
    model: LegendModel,
    /// Full host data as of the last (re)build, class tags included.
    original: ChartData,
    /// Host data right after the last projection was pushed.
    pushed: Option<ChartData>,
    on_toggle: Option<ToggleCallback<C>>,
}

impl<C: HostChart> Legend<C> {
    /// Build a legend for `chart` from its current data.
    pub fn attach(chart: C, options: LegendOptions) -> Self {
        let mut legend = Self {
            chart,
            options,
            model: LegendModel::default(),
            original: ChartData::default(),
            pushed: None,
            on_toggle: None,
        };
        legend.build_model();
        legend
    }

    /// Register the callback run after every toggle.
    pub fn on_toggle<F>(&mut self, callback: F)
    where
        F: FnMut(&C, &ToggleEvent) + 'static,
    {
        self.on_toggle = Some(Box::new(callback));
    }

    /// Discard all legend state and rebuild from the host's data.
    ///
    /// If the host still holds the last projection, the full data is
    /// restored first; data the application replaced in the meantime is
    /// taken as the new original.
    pub fn rebuild(&mut self) {
        if self.pushed.as_ref() == Some(self.chart.data()) {
            debug!("rebuilding legend from the full data");
            let original = std::mem::take(&mut self.original);
            self.chart.set_series(original.series);
            self.chart.set_labels(original.labels);
        } else {
            debug!("rebuilding legend from new host data");
        }
        self.build_model();
    }

    /// Toggle the entry at `index`, project, and push the result to the host.
    pub fn toggle(&mut self, index: usize, trigger: Trigger) -> Result<ToggleOutcome, LegendError> {
        if !self.options.clickable {
            return Err(LegendError::NotClickable);
        }
        let count = self.model.entries.len();
        if index >= count {
            return Err(LegendError::UnknownEntry { index, count });
        }

        let toggled = state::toggle(
            &self.model.entries,
            &self.model.metadata,
            index,
            self.options.remove_all,
        );
        debug!("legend entry {index}: {:?}", toggled.outcome);
        self.model.entries = toggled.entries;
        self.push_projection();

        let event = ToggleEvent {
            entry: index,
            outcome: toggled.outcome,
            trigger,
        };
        if let Some(callback) = self.on_toggle.as_mut() {
            callback(&self.chart, &event);
        }
        Ok(toggled.outcome)
    }

    /// Make every entry active again and show the full data.
    pub fn reset(&mut self) {
        for entry in &mut self.model.entries {
            entry.active = true;
        }
        self.push_projection();
    }

    /// Restore the full data on the host and hand it back.
    pub fn detach(mut self) -> C {
        let original = std::mem::take(&mut self.original);
        self.chart.set_series(original.series);
        self.chart.set_labels(original.labels);
        self.chart
    }

    /// Projection of the current state, without touching the host.
    pub fn projection(&self) -> Projection {
        project(
            &self.model.metadata,
            &self.model.entries,
            self.model.label_driven,
        )
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.model.entries
    }

    pub fn metadata(&self) -> &[SeriesMetadata] {
        &self.model.metadata
    }

    pub fn kind(&self) -> ChartKind {
        self.chart.kind()
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// Mutable host access, e.g. to replace its data before [`Legend::rebuild`].
    pub fn chart_mut(&mut self) -> &mut C {
        &mut self.chart
    }

    pub fn options(&self) -> &LegendOptions {
        &self.options
    }

    /// Full data as read at the last (re)build.
    pub fn original_data(&self) -> &ChartData {
        &self.original
    }

    fn build_model(&mut self) {
        self.model = build(self.chart.kind(), self.chart.data(), &self.options);
        if self.options.clickable {
            let tagged = self.model.metadata.iter().map(|m| m.data.clone()).collect();
            self.chart.set_series(tagged);
        }
        self.original = self.chart.data().clone();
        self.pushed = None;
    }

    fn push_projection(&mut self) {
        let projection = self.projection();
        if let Some(labels) = projection.labels {
            self.chart.set_labels(labels);
        }
        self.chart.set_series(projection.series);
        self.pushed = Some(self.chart.data().clone());
        self.chart.update();
    }
}
