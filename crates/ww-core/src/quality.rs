//! Water quality records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Conventional pollutant parameters tracked through the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Bod,
    Tss,
    Tkn,
    Tp,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [Pollutant::Bod, Pollutant::Tss, Pollutant::Tkn, Pollutant::Tp];

    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Bod => "BOD",
            Pollutant::Tss => "TSS",
            Pollutant::Tkn => "TKN",
            Pollutant::Tp => "TP",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BOD/TSS/TKN/TP concentrations in mg/L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    pub bod_mg_l: f64,
    pub tss_mg_l: f64,
    pub tkn_mg_l: f64,
    pub tp_mg_l: f64,
}

/// Nominal discharge quality of a technology before noise and dosing.
pub type EffluentTargets = WaterQuality;

impl WaterQuality {
    pub const fn new(bod_mg_l: f64, tss_mg_l: f64, tkn_mg_l: f64, tp_mg_l: f64) -> Self {
        Self {
            bod_mg_l,
            tss_mg_l,
            tkn_mg_l,
            tp_mg_l,
        }
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Bod => self.bod_mg_l,
            Pollutant::Tss => self.tss_mg_l,
            Pollutant::Tkn => self.tkn_mg_l,
            Pollutant::Tp => self.tp_mg_l,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_pollutant() {
        let q = WaterQuality::new(10.0, 12.0, 8.0, 2.0);
        let values: Vec<f64> = Pollutant::ALL.iter().map(|p| q.get(*p)).collect();
        assert_eq!(values, vec![10.0, 12.0, 8.0, 2.0]);
    }
}
