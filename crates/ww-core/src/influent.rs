//! Influent input normalization.
//!
//! `InfluentInput` is what a form, CLI or case file supplies. `InfluentSpec`
//! is the validated, canonical record every calculator consumes: flow in
//! m³/day, concentrations in mg/L. The only way to build an `InfluentSpec`
//! (including through serde) is [`normalize`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::quality::WaterQuality;
use crate::units::{FlowUnit, load_kg_day};

/// Raw influent entry as typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluentInput {
    pub flow_value: f64,
    #[serde(default)]
    pub flow_unit: FlowUnit,
    pub bod_mg_l: f64,
    pub tss_mg_l: f64,
    pub tkn_mg_l: f64,
    pub tp_mg_l: f64,
    #[serde(default)]
    pub use_alum: bool,
    #[serde(default)]
    pub use_carbon_source: bool,
}

impl Default for InfluentInput {
    /// Typical medium-strength municipal sewage at 10 000 m³/day.
    fn default() -> Self {
        Self {
            flow_value: 10_000.0,
            flow_unit: FlowUnit::CubicMetersPerDay,
            bod_mg_l: 250.0,
            tss_mg_l: 220.0,
            tkn_mg_l: 40.0,
            tp_mg_l: 7.0,
            use_alum: false,
            use_carbon_source: false,
        }
    }
}

impl InfluentInput {
    pub fn normalize(&self) -> Result<InfluentSpec, ValidationError> {
        normalize(
            self.flow_value,
            self.flow_unit,
            self.bod_mg_l,
            self.tss_mg_l,
            self.tkn_mg_l,
            self.tp_mg_l,
            self.use_alum,
            self.use_carbon_source,
        )
    }
}

/// Validated influent in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InfluentInput", into = "InfluentInput")]
pub struct InfluentSpec {
    flow_value: f64,
    flow_unit: FlowUnit,
    bod_mg_l: f64,
    tss_mg_l: f64,
    tkn_mg_l: f64,
    tp_mg_l: f64,
    use_alum: bool,
    use_carbon_source: bool,
    flow_canonical_m3_day: f64,
}

/// Validate raw influent entry and convert the flow to m³/day.
///
/// Fields are checked in order flow, BOD, TSS, TKN, TP; the first failure
/// is returned.
#[allow(clippy::too_many_arguments)]
pub fn normalize(
    raw_flow_value: f64,
    flow_unit: FlowUnit,
    bod_mg_l: f64,
    tss_mg_l: f64,
    tkn_mg_l: f64,
    tp_mg_l: f64,
    use_alum: bool,
    use_carbon_source: bool,
) -> Result<InfluentSpec, ValidationError> {
    if !raw_flow_value.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "flow_value",
            value: raw_flow_value,
        });
    }
    if raw_flow_value <= 0.0 {
        return Err(ValidationError::NonPositiveFlow {
            value: raw_flow_value,
        });
    }

    for (field, value) in [
        ("bod_mg_l", bod_mg_l),
        ("tss_mg_l", tss_mg_l),
        ("tkn_mg_l", tkn_mg_l),
        ("tp_mg_l", tp_mg_l),
    ] {
        check_concentration(field, value)?;
    }

    let flow_canonical_m3_day = flow_unit.to_canonical(raw_flow_value);
    // A huge finite entry times the MGD factor can still overflow.
    if !flow_canonical_m3_day.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "flow_value",
            value: flow_canonical_m3_day,
        });
    }

    Ok(InfluentSpec {
        flow_value: raw_flow_value,
        flow_unit,
        bod_mg_l,
        tss_mg_l,
        tkn_mg_l,
        tp_mg_l,
        use_alum,
        use_carbon_source,
        flow_canonical_m3_day,
    })
}

fn check_concentration(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeConcentration { field, value });
    }
    Ok(())
}

impl InfluentSpec {
    /// Flow as entered, in `flow_unit`.
    pub fn flow_value(&self) -> f64 {
        self.flow_value
    }

    pub fn flow_unit(&self) -> FlowUnit {
        self.flow_unit
    }

    pub fn flow_m3_day(&self) -> f64 {
        self.flow_canonical_m3_day
    }

    pub fn bod_mg_l(&self) -> f64 {
        self.bod_mg_l
    }

    pub fn tss_mg_l(&self) -> f64 {
        self.tss_mg_l
    }

    pub fn tkn_mg_l(&self) -> f64 {
        self.tkn_mg_l
    }

    pub fn tp_mg_l(&self) -> f64 {
        self.tp_mg_l
    }

    pub fn use_alum(&self) -> bool {
        self.use_alum
    }

    pub fn use_carbon_source(&self) -> bool {
        self.use_carbon_source
    }

    pub fn quality(&self) -> WaterQuality {
        WaterQuality::new(self.bod_mg_l, self.tss_mg_l, self.tkn_mg_l, self.tp_mg_l)
    }

    /// Influent BOD load, kg/day.
    pub fn bod_load_kg_day(&self) -> f64 {
        load_kg_day(self.bod_mg_l, self.flow_canonical_m3_day)
    }

    /// Same influent with the dosing toggles replaced.
    pub fn with_dosing(mut self, use_alum: bool, use_carbon_source: bool) -> Self {
        self.use_alum = use_alum;
        self.use_carbon_source = use_carbon_source;
        self
    }

    pub fn to_input(&self) -> InfluentInput {
        InfluentInput {
            flow_value: self.flow_value,
            flow_unit: self.flow_unit,
            bod_mg_l: self.bod_mg_l,
            tss_mg_l: self.tss_mg_l,
            tkn_mg_l: self.tkn_mg_l,
            tp_mg_l: self.tp_mg_l,
            use_alum: self.use_alum,
            use_carbon_source: self.use_carbon_source,
        }
    }
}

impl TryFrom<InfluentInput> for InfluentSpec {
    type Error = ValidationError;

    fn try_from(input: InfluentInput) -> Result<Self, Self::Error> {
        input.normalize()
    }
}

impl From<InfluentSpec> for InfluentInput {
    fn from(spec: InfluentSpec) -> Self {
        spec.to_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_normalizes() {
        let spec = InfluentInput::default().normalize().unwrap();
        assert_eq!(spec.flow_m3_day(), 10_000.0);
        assert_eq!(spec.bod_load_kg_day(), 2_500.0);
        assert!(!spec.use_alum());
    }

    #[test]
    fn mgd_is_converted() {
        let spec = normalize(2.0, FlowUnit::Mgd, 200.0, 200.0, 35.0, 6.0, true, false).unwrap();
        assert_eq!(spec.flow_m3_day(), 2.0 * 3785.41);
        assert_eq!(spec.flow_value(), 2.0);
        assert!(spec.use_alum());
    }

    #[test]
    fn zero_flow_is_rejected() {
        let err = normalize(0.0, FlowUnit::Mld, 250.0, 220.0, 40.0, 7.0, false, false)
            .unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveFlow { value: 0.0 });
    }

    #[test]
    fn negative_flow_is_rejected_not_clamped() {
        let err = normalize(-5.0, FlowUnit::CubicMetersPerDay, 1.0, 1.0, 1.0, 1.0, false, false)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveFlow { .. }));
    }

    #[test]
    fn nan_concentration_is_rejected() {
        let err = normalize(
            100.0,
            FlowUnit::CubicMetersPerDay,
            250.0,
            f64::NAN,
            40.0,
            7.0,
            false,
            false,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFinite {
                field: "tss_mg_l",
                ..
            }
        ));
    }

    #[test]
    fn negative_concentration_names_the_field() {
        let err = normalize(100.0, FlowUnit::CubicMetersPerDay, 250.0, 220.0, 40.0, -0.1, false, false)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeConcentration {
                field: "tp_mg_l",
                value: -0.1
            }
        );
    }

    #[test]
    fn zero_concentration_is_valid() {
        let spec = normalize(100.0, FlowUnit::CubicMetersPerDay, 0.0, 0.0, 0.0, 0.0, false, false);
        assert!(spec.is_ok());
    }

    #[test]
    fn infinite_flow_is_rejected() {
        let err = normalize(f64::INFINITY, FlowUnit::Mgd, 1.0, 1.0, 1.0, 1.0, false, false)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));
    }
}
