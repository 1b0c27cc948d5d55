use ww_core::{FlowUnit, InfluentInput, UnitSystem};
use ww_process::{NegativeSizingPolicy, Technology};
use ww_project::{DesignCase, load_case, load_json, load_yaml, save_json, save_yaml, validate_case};
use ww_sim::AdjustmentFactors;

fn temp_path(name: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ww_project_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn full_case() -> DesignCase {
    let mut case = DesignCase::new(
        "Roundtrip",
        InfluentInput {
            flow_value: 3.0,
            flow_unit: FlowUnit::Mgd,
            use_alum: true,
            ..InfluentInput::default()
        },
    );
    case.technologies = vec![Technology::Mbr, Technology::Cas];
    case.seed = Some(99);
    case.adjustments = Some(AdjustmentFactors::new(110.0, 60.0, 100.0, 90.0).unwrap());
    case.parameters.aeration.sote = 0.25;
    case.negative_sizing = NegativeSizingPolicy::ClampToZero;
    case
}

#[test]
fn roundtrip_yaml_full_case() {
    let case = full_case();
    let path = temp_path("case.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_minimal_case() {
    let case = DesignCase::new("Minimal", InfluentInput::default());
    let path = temp_path("case.json");
    save_json(&path, &case).unwrap();
    let loaded = load_case(&path).unwrap();
    assert_eq!(case, loaded);
    assert_eq!(loaded.technologies(), Technology::ALL.to_vec());
    assert_eq!(loaded.seed(), ww_sim::DEFAULT_SEED);
    assert_eq!(loaded.display_units(), UnitSystem::Metric);
}

#[test]
fn derived_settings() {
    let case = full_case();
    assert_eq!(case.technologies(), vec![Technology::Cas, Technology::Mbr]);
    assert_eq!(case.display_units(), UnitSystem::UsCustomary);
    let config = case.sizing_config();
    assert_eq!(config.negative_sizing, NegativeSizingPolicy::ClampToZero);
    let spec = case.influent_spec().unwrap();
    assert!((spec.flow_m3_day() - 3.0 * 3785.41).abs() < 1e-9);
}

#[test]
fn rejects_bad_cases() {
    let mut case = DesignCase::new("Bad", InfluentInput::default());
    case.influent.flow_value = 0.0;
    assert!(validate_case(&case).is_err());

    let mut case = DesignCase::new("Dup", InfluentInput::default());
    case.technologies = vec![Technology::Ifas, Technology::Ifas];
    assert!(validate_case(&case).is_err());

    let mut case = DesignCase::new("  ", InfluentInput::default());
    assert!(validate_case(&case).is_err());
    case.name = "Future".to_string();
    case.version = 9;
    assert!(validate_case(&case).is_err());

    let mut case = DesignCase::new("Params", InfluentInput::default());
    case.parameters.kinetics.y = -0.6;
    assert!(validate_case(&case).is_err());
}

#[test]
fn out_of_range_adjustment_fails_to_load() {
    let path = temp_path("adjust.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: x\ninfluent: {flow_value: 1000, bod_mg_l: 200, tss_mg_l: 200, tkn_mg_l: 30, tp_mg_l: 5}\nadjustments: {was_pump_pct: 151}\n",
    )
    .unwrap();
    assert!(load_yaml(&path).is_err());
}

#[test]
fn unknown_extension_is_rejected() {
    let path = temp_path("case.toml");
    std::fs::write(&path, "").unwrap();
    assert!(load_case(&path).is_err());
}
