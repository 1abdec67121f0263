//! Visibility state: flip one entry, keep the chart from going blank.

use log::info;

use super::builder::{LegendEntry, SeriesMetadata};

/// What a single toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Deactivated,
    Activated,
    /// The chart would have gone blank, so every entry is active again.
    RolledBack,
    /// The index does not name an entry; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    pub entries: Vec<LegendEntry>,
    pub outcome: ToggleOutcome,
}

/// Flip `entries[index].active` and return the new entries.
///
/// With `allow_all_inactive == false`, a toggle that would leave no series of
/// `metadata` visible reactivates every entry instead. Entries owning no
/// existing series do not keep the chart from going blank.
pub fn toggle(
    entries: &[LegendEntry],
    metadata: &[SeriesMetadata],
    index: usize,
    allow_all_inactive: bool,
) -> Toggled {
    let mut next = entries.to_vec();
    let Some(entry) = next.get_mut(index) else {
        return Toggled {
            entries: next,
            outcome: ToggleOutcome::Ignored,
        };
    };
    entry.active = !entry.active;
    let mut outcome = if entry.active {
        ToggleOutcome::Activated
    } else {
        ToggleOutcome::Deactivated
    };

    if !allow_all_inactive && has_owned_series(metadata) && !any_visible(&next, metadata) {
        info!("legend entry {index} would blank the chart, restoring all entries");
        for e in &mut next {
            e.active = true;
        }
        outcome = ToggleOutcome::RolledBack;
    }

    Toggled {
        entries: next,
        outcome,
    }
}

fn has_owned_series(metadata: &[SeriesMetadata]) -> bool {
    metadata.iter().any(|m| m.legend_index.is_some())
}

/// True when at least one series would be projected with these flags.
fn any_visible(entries: &[LegendEntry], metadata: &[SeriesMetadata]) -> bool {
    metadata
        .iter()
        .filter_map(|m| m.legend_index)
        .any(|e| entries.get(e).is_some_and(|e| e.active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;
    use serde_json::json;

    fn metadata(owners: &[Option<usize>]) -> Vec<SeriesMetadata> {
        owners
            .iter()
            .map(|&legend_index| SeriesMetadata {
                data: Series::Raw(json!(1)),
                label: None,
                legend_index,
                class_name: String::new(),
            })
            .collect()
    }

    fn owned(n: usize) -> Vec<SeriesMetadata> {
        metadata(&(0..n).map(Some).collect::<Vec<_>>())
    }

    fn active_count(entries: &[LegendEntry]) -> usize {
        entries.iter().filter(|e| e.active).count()
    }

    fn entries(n: usize) -> Vec<LegendEntry> {
        (0..n)
            .map(|i| LegendEntry {
                text: format!("e{i}"),
                series_indices: vec![i],
                active: true,
                class_name: None,
            })
            .collect()
    }

    #[test]
    fn toggle_does_not_touch_its_input() {
        let before = entries(3);
        let after = toggle(&before, &owned(3), 1, false);
        assert!(before.iter().all(|e| e.active));
        assert!(!after.entries[1].active);
        assert_eq!(after.outcome, ToggleOutcome::Deactivated);
    }

    #[test]
    fn double_toggle_is_identity() {
        let start = entries(3);
        let meta = owned(3);
        let once = toggle(&start, &meta, 2, false);
        let twice = toggle(&once.entries, &meta, 2, false);
        assert_eq!(twice.entries, start);
        assert_eq!(twice.outcome, ToggleOutcome::Activated);
    }

    #[test]
    fn last_entry_rolls_back_unless_allowed() {
        let start = entries(2);
        let meta = owned(2);
        let one_left = toggle(&start, &meta, 0, false).entries;
        let rolled = toggle(&one_left, &meta, 1, false);
        assert_eq!(rolled.outcome, ToggleOutcome::RolledBack);
        assert_eq!(active_count(&rolled.entries), 2);

        let blank = toggle(&toggle(&start, &meta, 0, true).entries, &meta, 1, true);
        assert_eq!(blank.outcome, ToggleOutcome::Deactivated);
        assert_eq!(active_count(&blank.entries), 0);
    }

    #[test]
    fn unknown_index_is_ignored() {
        let start = entries(2);
        let t = toggle(&start, &owned(2), 5, false);
        assert_eq!(t.outcome, ToggleOutcome::Ignored);
        assert_eq!(t.entries, start);
    }

    #[test]
    fn entries_without_series_do_not_keep_the_chart_alive() {
        // four entries, only the first two own a series
        let start = entries(4);
        let meta = metadata(&[Some(0), Some(1)]);
        let one_left = toggle(&start, &meta, 0, false).entries;
        let rolled = toggle(&one_left, &meta, 1, false);
        assert_eq!(rolled.outcome, ToggleOutcome::RolledBack);
        assert_eq!(active_count(&rolled.entries), 4);
    }

    #[test]
    fn hiding_a_seriesless_entry_is_not_a_rollback() {
        let start = entries(3);
        let meta = metadata(&[Some(0), Some(1)]);
        let t = toggle(&start, &meta, 2, false);
        assert_eq!(t.outcome, ToggleOutcome::Deactivated);
    }

    #[test]
    fn chart_without_series_toggles_freely() {
        let start = entries(1);
        let t = toggle(&start, &[], 0, false);
        assert_eq!(t.outcome, ToggleOutcome::Deactivated);
    }
}
