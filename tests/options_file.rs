use legend_rs::models::ChartKind;
use legend_rs::viz::LegendPosition;
use legend_rs::{ConfigError, LegendOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn options_load_from_camel_case_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legend.json");
    fs::write(
        &path,
        r#"{
  "className": "crazyPink",
  "legendNames": ["Sheep", {"name": "Goats", "series": [1, 2]}],
  "classNames": ["a", "b"],
  "removeAll": true,
  "position": "top"
}"#,
    )
    .unwrap();

    let options = LegendOptions::from_path(&path).unwrap();
    assert_eq!(options.class_name, "crazyPink");
    assert!(options.remove_all);
    assert!(options.clickable, "unset fields keep their defaults");
    assert_eq!(options.position_for(ChartKind::Pie), LegendPosition::Top);
    assert_eq!(options.legend_names.as_ref().map(Vec::len), Some(2));
    options.validate(3).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = LegendOptions::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_json_is_rejected() {
    let err = LegendOptions::from_json_str(r#"{"position": "sideways"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().contains("sideways"));
}

#[test]
fn overlapping_groups_are_rejected() {
    let options =
        LegendOptions::from_json_str(r#"{"legendNames": [{"name": "a", "series": [0, 1]}, {"name": "b", "series": [1]}]}"#)
            .unwrap();
    assert!(matches!(
        options.validate(2),
        Err(ConfigError::DuplicateSeries { series: 1, first: 0, second: 1 })
    ));
}
