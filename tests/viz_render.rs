use legend_rs::legend::{Legend, Trigger};
use legend_rs::models::{ChartData, ChartKind, Series};
use legend_rs::viz::{self, ChartView, LegendPosition};
use legend_rs::{LegendOptions, MemoryChart};
use serde_json::json;
use std::fs;

const POSITIONS: [LegendPosition; 4] = [
    LegendPosition::Inside,
    LegendPosition::Right,
    LegendPosition::Top,
    LegendPosition::Bottom,
];

fn weekly() -> ChartData {
    ChartData {
        labels: ["Mon", "Tue", "Wed", "Thu"].map(String::from).to_vec(),
        series: vec![
            Series::named("Blue pill", json!([12, 9, 7, 8])),
            Series::named("Red pill", json!([2, 1, 3.5, 7])),
            Series::named("Purple pill", json!([1, 3, 4000, 5])),
        ],
    }
}

fn slices() -> ChartData {
    serde_json::from_value(json!({
        "labels": ["Bananas", "Apples", "Grapes"],
        "series": [20, 10, 30]
    }))
    .unwrap()
}

fn legend(kind: ChartKind, data: ChartData, options: LegendOptions) -> Legend<MemoryChart> {
    Legend::attach(MemoryChart::new(kind, data), options)
}

#[test]
fn every_kind_renders_at_every_position() {
    for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie, ChartKind::Donut] {
        let data = if kind.is_label_driven() { slices() } else { weekly() };
        let mut legend = legend(kind, data, LegendOptions::default());
        legend.toggle(1, Trigger::Programmatic).unwrap();
        let view = ChartView::from_legend(&legend, "Demo");
        for position in POSITIONS {
            let svg = viz::render_svg(&view, 800, 500, "en", position).unwrap();
            assert!(svg.starts_with("<svg"), "{kind:?} at {position}");
            assert!(svg.contains("Demo"), "title drawn for {kind:?} at {position}");
        }
    }
}

#[test]
fn hidden_entries_stay_in_the_legend() {
    let mut legend = legend(ChartKind::Line, weekly(), LegendOptions::default());
    legend.toggle(1, Trigger::Pointer).unwrap();
    let view = ChartView::from_legend(&legend, "");

    assert_eq!(view.series.len(), 2);
    assert_eq!(view.legend.len(), 3);
    assert!(!view.legend[1].active);

    let svg = viz::render_svg(&view, 800, 500, "en", LegendPosition::Bottom).unwrap();
    for name in ["Blue pill", "Red pill", "Purple pill"] {
        assert!(svg.contains(name), "legend label {name} missing");
    }
}

#[test]
fn colours_follow_the_original_series() {
    let full = legend(ChartKind::Bar, weekly(), LegendOptions::default());
    let mut toggled = legend(ChartKind::Bar, weekly(), LegendOptions::default());
    toggled.toggle(0, Trigger::Pointer).unwrap();

    let before = ChartView::from_legend(&full, "");
    let after = ChartView::from_legend(&toggled, "");
    assert_eq!(after.series[0].index, 1);
    assert_eq!(after.series[0].color, before.series[1].color);
    assert_eq!(after.series[1].color, before.series[2].color);
}

#[test]
fn pie_categories_are_projected_labels() {
    let mut legend = legend(ChartKind::Pie, slices(), LegendOptions::default());
    legend.toggle(2, Trigger::Pointer).unwrap();
    let view = ChartView::from_legend(&legend, "Fruit");
    assert_eq!(view.categories, vec!["Bananas", "Apples"]);
}

#[test]
fn german_locale_groups_with_dots() {
    let legend = legend(ChartKind::Line, weekly(), LegendOptions::default());
    let view = ChartView::from_legend(&legend, "");
    let svg = viz::render_svg(&view, 800, 500, "de", LegendPosition::Right).unwrap();
    assert!(svg.contains("4.000"), "expected a dotted thousands tick");
}

#[test]
fn empty_projection_still_renders() {
    let options = LegendOptions {
        remove_all: true,
        ..Default::default()
    };
    let mut legend = legend(ChartKind::Line, weekly(), options);
    for i in 0..3 {
        legend.toggle(i, Trigger::Pointer).unwrap();
    }
    let view = ChartView::from_legend(&legend, "Nothing left");
    assert!(view.series.is_empty());
    let svg = viz::render_svg(&view, 640, 400, "en", LegendPosition::Top).unwrap();
    assert!(svg.contains("Nothing left"));
}

#[test]
fn plot_chart_writes_svg_and_rejects_other_formats() {
    let dir = tempfile::tempdir().unwrap();
    let legend = legend(ChartKind::Donut, slices(), LegendOptions::default());
    let view = ChartView::from_legend(&legend, "Donut");

    let svg_path = dir.path().join("donut.svg");
    viz::plot_chart(&view, &svg_path, 600, 400, "en", LegendPosition::Inside).unwrap();
    let meta = fs::metadata(&svg_path).expect("file created");
    assert!(meta.len() > 0, "svg has content");

    let png_path = dir.path().join("donut.png");
    let err = viz::plot_chart(&view, &png_path, 600, 400, "en", LegendPosition::Inside).unwrap_err();
    assert!(err.to_string().contains("only .svg"));
    assert!(!png_path.exists());
}
