// ww-core/src/units.rs

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uom::si::f64::{
    Area as UomArea, Mass as UomMass, Time as UomTime, Volume as UomVolume,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Mass = UomMass;
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn days(v: f64) -> Time {
    use uom::si::time::day;
    Time::new::<day>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m3_per_day(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v / SECONDS_PER_DAY)
}

/// Mass load in kg/day of a concentration (mg/L = g/m³) carried by a flow (m³/day).
#[inline]
pub fn load_kg_day(conc_mg_l: f64, flow_m3_day: f64) -> f64 {
    conc_mg_l * flow_m3_day / 1000.0
}

/// Fixed conversion table. These constants are the only conversion factors
/// used anywhere in the workspace.
pub mod factors {
    pub const MGD_TO_M3_DAY: f64 = 3785.41;
    pub const MLD_TO_M3_DAY: f64 = 1000.0;
    pub const M3_TO_GAL: f64 = 264.172;
    pub const M2_TO_FT2: f64 = 10.7639;
    pub const M3_HR_TO_GPM: f64 = 4.40287;
    pub const M3_M2_DAY_TO_GPD_FT2: f64 = 24.54;
}

/// Unit the operator entered the influent flow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowUnit {
    /// Canonical unit, m³/day
    #[default]
    #[serde(rename = "m3_day", alias = "m3/day")]
    CubicMetersPerDay,
    /// Million US gallons per day
    #[serde(rename = "MGD", alias = "mgd")]
    Mgd,
    /// Megaliters per day
    #[serde(rename = "MLD", alias = "mld")]
    Mld,
}

impl FlowUnit {
    pub const ALL: [FlowUnit; 3] = [FlowUnit::CubicMetersPerDay, FlowUnit::Mgd, FlowUnit::Mld];

    /// Multiplier taking a value in this unit to m³/day.
    pub fn factor(self) -> f64 {
        match self {
            FlowUnit::CubicMetersPerDay => 1.0,
            FlowUnit::Mgd => factors::MGD_TO_M3_DAY,
            FlowUnit::Mld => factors::MLD_TO_M3_DAY,
        }
    }

    pub fn to_canonical(self, value: f64) -> f64 {
        value * self.factor()
    }

    pub fn from_canonical(self, m3_day: f64) -> f64 {
        m3_day / self.factor()
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowUnit::CubicMetersPerDay => "m³/day",
            FlowUnit::Mgd => "MGD",
            FlowUnit::Mld => "MLD",
        }
    }
}

impl fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlowUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m3_day" | "m3/day" | "m3d" => Ok(FlowUnit::CubicMetersPerDay),
            "mgd" => Ok(FlowUnit::Mgd),
            "mld" => Ok(FlowUnit::Mld),
            other => Err(format!("unknown flow unit '{other}' (expected m3_day, MGD or MLD)")),
        }
    }
}

/// Unit system used to present results. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// m³, m², m³/day
    #[default]
    Metric,
    /// gal, ft², MGD, gpm, gpd/ft²
    UsCustomary,
    /// m³, m², MLD
    Si,
}

impl UnitSystem {
    /// Display system implied by the unit the flow was entered in.
    pub fn for_flow_unit(unit: FlowUnit) -> Self {
        match unit {
            FlowUnit::CubicMetersPerDay => UnitSystem::Metric,
            FlowUnit::Mgd => UnitSystem::UsCustomary,
            FlowUnit::Mld => UnitSystem::Si,
        }
    }

    pub fn flow_unit(self) -> FlowUnit {
        match self {
            UnitSystem::Metric => FlowUnit::CubicMetersPerDay,
            UnitSystem::UsCustomary => FlowUnit::Mgd,
            UnitSystem::Si => FlowUnit::Mld,
        }
    }

    fn is_us(self) -> bool {
        matches!(self, UnitSystem::UsCustomary)
    }

    pub fn flow(self, m3_day: f64) -> f64 {
        self.flow_unit().from_canonical(m3_day)
    }

    pub fn flow_to_canonical(self, value: f64) -> f64 {
        self.flow_unit().to_canonical(value)
    }

    pub fn flow_label(self) -> &'static str {
        self.flow_unit().label()
    }

    pub fn volume(self, m3: f64) -> f64 {
        if self.is_us() { m3 * factors::M3_TO_GAL } else { m3 }
    }

    pub fn volume_to_canonical(self, value: f64) -> f64 {
        if self.is_us() { value / factors::M3_TO_GAL } else { value }
    }

    pub fn volume_label(self) -> &'static str {
        if self.is_us() { "gal" } else { "m³" }
    }

    pub fn area(self, m2: f64) -> f64 {
        if self.is_us() { m2 * factors::M2_TO_FT2 } else { m2 }
    }

    pub fn area_to_canonical(self, value: f64) -> f64 {
        if self.is_us() { value / factors::M2_TO_FT2 } else { value }
    }

    pub fn area_label(self) -> &'static str {
        if self.is_us() { "ft²" } else { "m²" }
    }

    pub fn sor(self, m3_m2_day: f64) -> f64 {
        if self.is_us() {
            m3_m2_day * factors::M3_M2_DAY_TO_GPD_FT2
        } else {
            m3_m2_day
        }
    }

    pub fn sor_to_canonical(self, value: f64) -> f64 {
        if self.is_us() {
            value / factors::M3_M2_DAY_TO_GPD_FT2
        } else {
            value
        }
    }

    pub fn sor_label(self) -> &'static str {
        if self.is_us() { "gpd/ft²" } else { "m³/m²/day" }
    }

    pub fn pump_rate(self, m3_hr: f64) -> f64 {
        if self.is_us() { m3_hr * factors::M3_HR_TO_GPM } else { m3_hr }
    }

    pub fn pump_rate_to_canonical(self, value: f64) -> f64 {
        if self.is_us() { value / factors::M3_HR_TO_GPM } else { value }
    }

    pub fn pump_rate_label(self) -> &'static str {
        if self.is_us() { "gpm" } else { "m³/h" }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "Metric (m³/day)"),
            UnitSystem::UsCustomary => write!(f, "US Customary (MGD)"),
            UnitSystem::Si => write!(f, "SI (MLD)"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "m3_day" => Ok(UnitSystem::Metric),
            "us" | "us_customary" | "mgd" => Ok(UnitSystem::UsCustomary),
            "si" | "mld" => Ok(UnitSystem::Si),
            other => Err(format!(
                "unknown unit system '{other}' (expected metric, us or si)"
            )),
        }
    }
}
