use proptest::prelude::*;
use ww_core::{FlowUnit, InfluentInput, UnitSystem};
use ww_process::{SizingConfig, Technology, size};
use ww_results::{ExportTable, SimulationDisplay, SizingDisplay};
use ww_sim::{SimParams, simulate_seeded};

#[test]
fn export_reads_the_display_numbers() {
    let spec = InfluentInput::default().normalize().unwrap();
    let sizing = size(&Technology::Cas.profile(), &spec, &SizingConfig::default());
    let sim = simulate_seeded(&spec, &sizing, None, &SimParams::default(), 42).unwrap();
    let units = UnitSystem::UsCustomary;

    let table = ExportTable::for_design(&sizing, &sim, units);
    let size_view = SizingDisplay::new(&sizing, units);
    let sim_view = SimulationDisplay::new(&sim, units);

    let vol = table.get("sizing.total_volume").unwrap();
    assert_eq!(vol.value, size_view.total_volume.value);
    assert_eq!(vol.unit, "gal");
    let ras = table.get("flow.ras").unwrap();
    assert_eq!(ras.value, sim_view.ras_flow.value);
    assert_eq!(ras.unit, "MGD");
    let pump = table.get("equipment.ras_pump.design").unwrap();
    assert_eq!(pump.unit, "gpm");
    assert!(table.get("equipment.ras_valve_cv").is_some());
    assert!(table.get("sizing.membrane_area").is_none());

    let csv = table.to_csv();
    assert_eq!(csv.lines().count(), table.rows.len() + 1);
    assert!(csv.starts_with("key,label,value,unit\n"));
}

#[test]
fn mbbr_export_has_no_sludge_pumps() {
    let spec = InfluentInput::default().normalize().unwrap();
    let sizing = size(&Technology::Mbbr.profile(), &spec, &SizingConfig::default());
    let sim = simulate_seeded(&spec, &sizing, None, &SimParams::default(), 1).unwrap();
    let table = ExportTable::for_design(&sizing, &sim, UnitSystem::Metric);
    assert!(table.get("equipment.ras_pump.design").is_none());
    assert!(table.get("equipment.ras_valve_cv").is_none());
    assert_eq!(table.get("sizing.media_area").unwrap().value, 500.0);
}

proptest! {
    #[test]
    fn mgd_display_round_trips_within_tenth_percent(
        mgd in 0.05f64..200.0,
        bod in 20.0f64..600.0,
        tech_idx in 0usize..4,
    ) {
        let input = InfluentInput {
            flow_value: mgd,
            flow_unit: FlowUnit::Mgd,
            bod_mg_l: bod,
            ..InfluentInput::default()
        };
        let spec = input.normalize().unwrap();
        let sizing = size(&Technology::ALL[tech_idx].profile(), &spec, &SizingConfig::default());
        let units = UnitSystem::UsCustomary;
        let shown = SizingDisplay::new(&sizing, units);

        let back = units.volume_to_canonical(shown.total_volume.value);
        prop_assert!((back - sizing.total_volume_m3).abs() <= 1e-3 * sizing.total_volume_m3.abs());
        let flow_back = units.flow_to_canonical(units.flow(spec.flow_m3_day()));
        prop_assert!((flow_back - spec.flow_m3_day()).abs() <= 1e-3 * spec.flow_m3_day());
        prop_assert!((units.flow(spec.flow_m3_day()) - mgd).abs() <= 1e-9 * mgd);
    }
}
