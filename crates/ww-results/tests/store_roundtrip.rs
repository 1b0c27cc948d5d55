use ww_core::InfluentInput;
use ww_process::{SizingConfig, Technology, size};
use ww_results::*;
use ww_sim::{AdjustmentFactors, SimParams, simulate_seeded};

fn temp_dir() -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ww_results_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn record(case_id: &str, tech: Technology, adjustments: Option<AdjustmentFactors>) -> DesignRecord {
    let spec = InfluentInput::default().normalize().unwrap();
    let sizing = size(&tech.profile(), &spec, &SizingConfig::default());
    let sim = simulate_seeded(&spec, &sizing, adjustments.as_ref(), &SimParams::default(), 42).unwrap();
    DesignRecord::new(case_id.to_string(), 42, sizing, sim, adjustments)
}

fn half_ras() -> Option<AdjustmentFactors> {
    Some(AdjustmentFactors::new(100.0, 50.0, 100.0, 100.0).unwrap())
}

#[test]
fn initial_and_adjusted_coexist() {
    let mut store = DesignStore::new();
    store.insert_initial(record("c1", Technology::Cas, None)).unwrap();
    store.insert_adjusted(record("c1", Technology::Cas, half_ras())).unwrap();

    let initial = store.initial(Technology::Cas).unwrap();
    let adjusted = store.adjusted(Technology::Cas).unwrap();
    assert_eq!(initial.variant, Variant::Initial);
    assert_eq!(adjusted.variant, Variant::Adjusted);
    assert_eq!(
        adjusted.simulation.ras_flow_m3_day,
        initial.simulation.ras_flow_m3_day * 0.5
    );
    assert_eq!(store.latest(Technology::Cas).unwrap().variant, Variant::Adjusted);
    assert_eq!(store.len(), 2);
}

#[test]
fn adjusted_requires_initial() {
    let mut store = DesignStore::new();
    let err = store
        .insert_adjusted(record("c1", Technology::Mbr, half_ras()))
        .unwrap_err();
    assert!(matches!(err, ResultsError::MissingInitial { technology: Technology::Mbr }));
}

#[test]
fn adjusted_from_other_case_is_refused() {
    let mut store = DesignStore::new();
    store.insert_initial(record("c1", Technology::Ifas, None)).unwrap();
    let err = store
        .insert_adjusted(record("c2", Technology::Ifas, half_ras()))
        .unwrap_err();
    assert!(matches!(err, ResultsError::CaseMismatch { .. }));
}

#[test]
fn adjusted_must_reuse_sizing() {
    let mut store = DesignStore::new();
    store.insert_initial(record("c1", Technology::Cas, None)).unwrap();
    let mut other = record("c1", Technology::Cas, half_ras());
    other.sizing.total_volume_m3 += 1.0;
    let err = store.insert_adjusted(other).unwrap_err();
    assert!(matches!(err, ResultsError::SizingMismatch { .. }));
}

#[test]
fn variant_is_checked_on_insert() {
    let mut store = DesignStore::new();
    assert!(store.insert_initial(record("c1", Technology::Cas, half_ras())).is_err());
}

#[test]
fn new_initial_supersedes_adjusted_and_other_cases() {
    let mut store = DesignStore::new();
    store.insert_initial(record("c1", Technology::Cas, None)).unwrap();
    store.insert_adjusted(record("c1", Technology::Cas, half_ras())).unwrap();
    store.insert_initial(record("c1", Technology::Mbr, None)).unwrap();

    let replaced = store.insert_initial(record("c1", Technology::Cas, None)).unwrap();
    assert!(replaced.is_some());
    assert!(store.adjusted(Technology::Cas).is_none());
    assert!(store.initial(Technology::Mbr).is_some());

    store.insert_initial(record("c2", Technology::Ifas, None)).unwrap();
    assert_eq!(store.technologies(), vec![Technology::Ifas]);
    assert_eq!(store.case_id(), Some("c2"));
}

#[test]
fn save_and_load_store() {
    let dir = temp_dir();
    let case_path = dir.join("plant.yaml");
    let store_path = DesignStore::path_for_case(&case_path).unwrap();
    assert!(store_path.ends_with(".wwtp/store.json"));

    let mut store = DesignStore::new();
    for tech in Technology::ALL {
        store.insert_initial(record("c1", tech, None)).unwrap();
    }
    store.insert_adjusted(record("c1", Technology::Cas, half_ras())).unwrap();
    store.save(&store_path).unwrap();

    let loaded = DesignStore::load(&store_path).unwrap();
    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded.technologies(), Technology::ALL.to_vec());
    for (key, rec) in store.iter() {
        let back = loaded.get(key).unwrap();
        assert_eq!(back.case_id, rec.case_id);
        assert_eq!(back.created_at, rec.created_at);
        assert_eq!(back.adjustments, rec.adjustments);
        let rel = (back.sizing.total_volume_m3 - rec.sizing.total_volume_m3).abs()
            / rec.sizing.total_volume_m3.abs();
        assert!(rel < 1e-12);
    }

    let missing = DesignStore::load_or_default(&dir.join("nope.json")).unwrap();
    assert!(missing.is_empty());
}
