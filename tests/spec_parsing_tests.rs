use chart_xkcd::core::{ChartKind, ChartSpec, Quadrant, Value, XValue};
use chart_xkcd::render::Color;
use serde_json::json;

#[test]
fn full_config_parses() {
    let spec = ChartSpec::from_json_str(
        r##"{
            "title": "Monthly income",
            "xLabel": "Month",
            "yLabel": "$ Dollars",
            "data": {
                "labels": ["Jan", "Feb"],
                "datasets": [{"label": "Plan", "data": [30, 70], "color": "#ff0000"}]
            },
            "options": {
                "unxkcdify": true,
                "dataColors": ["#dd4528", "#28a3dd"],
                "legendPosition": 4,
                "yTickCount": 5,
                "innerRadius": 0.3
            }
        }"##,
    )
    .expect("spec");

    assert_eq!(spec.title.as_deref(), Some("Monthly income"));
    assert_eq!(spec.x_label.as_deref(), Some("Month"));
    assert_eq!(spec.y_label.as_deref(), Some("$ Dollars"));
    assert_eq!(spec.labels(), ["Jan", "Feb"]);
    assert_eq!(spec.datasets()[0].values().collect::<Vec<_>>(), vec![30.0, 70.0]);
    assert_eq!(spec.datasets()[0].color, Some(Color::from_rgb8(0xff, 0, 0)));
    assert_eq!(spec.options.unxkcdify, Some(true));
    assert_eq!(spec.options.legend_position, Some(Quadrant::DownRight));
    assert_eq!(spec.options.y_tick_count, Some(5));
    assert_eq!(spec.options.inner_radius, Some(0.3));
    assert_eq!(spec.options.data_colors.as_ref().map(Vec::len), Some(2));
}

#[test]
fn missing_sections_default_to_empty() {
    let spec = ChartSpec::from_json_str("{}").expect("spec");
    assert!(spec.title.is_none());
    assert!(spec.labels().is_empty());
    assert!(spec.datasets().is_empty());
    assert_eq!(spec.options, Default::default());
}

#[test]
fn legend_positions_accept_names_and_codes() {
    let by_name = ChartSpec::from_json_value(json!({"options": {"legendPosition": "upRight"}}))
        .expect("spec");
    assert_eq!(by_name.options.legend_position, Some(Quadrant::UpRight));

    let unknown = ChartSpec::from_json_value(json!({"options": {"legendPosition": 9}}))
        .expect("spec");
    assert_eq!(unknown.options.legend_position, Some(Quadrant::UpLeft));
}

#[test]
fn unknown_option_keys_are_kept() {
    let spec = ChartSpec::from_json_value(json!({"options": {"animate": true, "dotSize": 2}}))
        .expect("spec");
    assert_eq!(spec.options.dot_size, Some(2.0));
    assert_eq!(spec.options.extra.get("animate"), Some(&json!(true)));
}

#[test]
fn scatter_points_keep_their_x_shape() {
    let spec = ChartSpec::from_json_value(json!({
        "data": {"datasets": [{"label": "p", "data": [{"x": 1, "y": 2}, {"x": "2020-01-01", "y": 3}]}]}
    }))
    .expect("spec");
    let data = &spec.datasets()[0].data;
    assert_eq!(data[0], Value::point(1.0, 2.0));
    assert_eq!(data[1].as_point(), Some((&XValue::Text("2020-01-01".to_owned()), 3.0)));
    assert!(spec.validate(ChartKind::Scatter).is_ok());
    assert!(spec.validate(ChartKind::Bar).is_err());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(ChartSpec::from_json_str("{").is_err());
    assert!(ChartSpec::from_json_value(json!({"data": {"labels": "a"}})).is_err());
    assert!(ChartSpec::from_json_value(json!({"options": {"strokeColor": "sparkly"}})).is_err());
}

#[test]
fn strict_validation_checks_shape() {
    let ok = ChartSpec::from_json_value(json!({
        "data": {"labels": ["a", "b"], "datasets": [{"data": [1, 2]}]}
    }))
    .expect("spec");
    assert!(ok.validate(ChartKind::Line).is_ok());

    let short = ChartSpec::from_json_value(json!({
        "data": {"labels": ["a", "b"], "datasets": [{"data": [1]}]}
    }))
    .expect("spec");
    assert!(short.validate(ChartKind::Bar).is_err());

    let scatter_numbers = ChartSpec::from_json_value(json!({
        "data": {"datasets": [{"data": [1, 2]}]}
    }))
    .expect("spec");
    assert!(scatter_numbers.validate(ChartKind::Scatter).is_err());
}

#[test]
fn chart_kinds_parse_case_insensitively() {
    assert_eq!("stackedbar".parse::<ChartKind>().ok(), Some(ChartKind::StackedBar));
    assert_eq!(" Radar ".parse::<ChartKind>().ok(), Some(ChartKind::Radar));
    assert!("XY".parse::<ChartKind>().is_err());
    for kind in ChartKind::ALL {
        assert_eq!(kind.to_string().parse::<ChartKind>().ok(), Some(kind));
    }
}
