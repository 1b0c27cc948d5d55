//! Flat key → (value, unit) table.
//!
//! Built from the display records, so CSV, report tables and on-screen
//! metrics all read the same numbers.

use serde::Serialize;
use ww_core::{Pollutant, UnitSystem};
use ww_process::SizingResult;
use ww_sim::SimulationResult;

use crate::display::{PumpDisplay, Quantity, SimulationDisplay, SizingDisplay};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, label: &str, value: f64, unit: &str) {
        self.rows.push(ExportRow {
            key: key.to_string(),
            label: label.to_string(),
            value,
            unit: unit.to_string(),
        });
    }

    fn push_quantity(&mut self, key: &str, label: &str, q: Quantity) {
        self.push(key, label, q.value, q.unit);
    }

    fn push_optional(&mut self, key: &str, label: &str, q: Option<Quantity>) {
        if let Some(q) = q {
            self.push_quantity(key, label, q);
        }
    }

    pub fn from_sizing(sizing: &SizingDisplay) -> Self {
        let mut t = Self::new();
        t.push_quantity("sizing.hrt", "Hydraulic retention time", sizing.hrt);
        t.push_optional("sizing.srt", "Solids retention time", sizing.srt);
        t.push_optional("sizing.mlss", "MLSS", sizing.mlss);
        t.push_quantity("sizing.total_volume", "Total basin volume", sizing.total_volume);
        t.push_quantity("sizing.anoxic_volume", "Anoxic volume", sizing.anoxic_volume);
        t.push_quantity("sizing.aerobic_volume", "Aerobic volume", sizing.aerobic_volume);
        t.push_optional("sizing.clarifier_area", "Clarifier area", sizing.clarifier_area);
        t.push_optional("sizing.clarifier_sor", "Clarifier SOR", sizing.clarifier_sor);
        t.push_optional("sizing.membrane_area", "Membrane area", sizing.membrane_area);
        t.push_optional("sizing.membrane_flux", "Membrane flux", sizing.membrane_flux);
        t.push_optional("sizing.media_volume", "Media volume", sizing.media_volume);
        t.push_optional("sizing.media_area", "Media surface area", sizing.media_area);
        t
    }

    pub fn from_simulation(sim: &SimulationDisplay) -> Self {
        let mut t = Self::new();
        for p in Pollutant::ALL {
            let key = format!("effluent.{}", p.label().to_ascii_lowercase());
            t.push(&key, &format!("Effluent {p}"), sim.effluent.get(p), "mg/L");
        }
        t.push_quantity("flow.ras", "RAS flow", sim.ras_flow);
        t.push_quantity("flow.was", "WAS flow", sim.was_flow);
        t.push_quantity("flow.ras_design", "RAS flow (design basis)", sim.design_ras_flow);
        t.push_quantity("flow.was_design", "WAS flow (design basis)", sim.design_was_flow);
        t.push_quantity("chemicals.alum", "Alum dose", sim.alum_dose);
        t.push_quantity("chemicals.carbon", "Carbon source dose", sim.carbon_dose);
        t.push_quantity("sludge.biological", "Biological sludge", sim.biological_sludge);
        t.push_quantity("sludge.chemical", "Chemical sludge", sim.chemical_sludge);
        t.push_quantity("sludge.total", "Total sludge production", sim.total_sludge);
        t.push_quantity("aeration.oxygen_demand", "Oxygen demand", sim.oxygen_demand);
        t.push_quantity("aeration.required_air", "Required air", sim.required_air);
        t.push_pump("equipment.eq_pump", "EQ pump", Some(&sim.eq_pump));
        t.push_pump("equipment.ras_pump", "RAS pump", sim.ras_pump.as_ref());
        t.push_pump("equipment.was_pump", "WAS pump", sim.was_pump.as_ref());
        t.push_pump("equipment.blower", "Blower", Some(&sim.blower));
        if let Some(cv) = sim.ras_valve_cv {
            t.push("equipment.ras_valve_cv", "RAS valve Cv", cv, "");
        }
        if let Some(cv) = sim.was_valve_cv {
            t.push("equipment.was_valve_cv", "WAS valve Cv", cv, "");
        }
        t
    }

    fn push_pump(&mut self, key: &str, label: &str, pump: Option<&PumpDisplay>) {
        let Some(pump) = pump else {
            return;
        };
        self.push_quantity(&format!("{key}.design"), &format!("{label} (design)"), pump.design);
        self.push_quantity(
            &format!("{key}.operating"),
            &format!("{label} (operating)"),
            pump.operating,
        );
        self.push(
            &format!("{key}.adjustment"),
            &format!("{label} adjustment"),
            pump.adjustment_pct,
            "%",
        );
    }

    /// Sizing rows followed by simulation rows.
    pub fn for_design(sizing: &SizingResult, sim: &SimulationResult, units: UnitSystem) -> Self {
        let mut t = Self::from_sizing(&SizingDisplay::new(sizing, units));
        t.rows
            .extend(Self::from_simulation(&SimulationDisplay::new(sim, units)).rows);
        t
    }

    pub fn get(&self, key: &str) -> Option<&ExportRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("key,label,value,unit\n");
        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                escape(&row.key),
                escape(&row.label),
                row.value,
                escape(&row.unit)
            ));
        }
        csv
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
