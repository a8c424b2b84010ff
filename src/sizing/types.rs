//! Sizing inputs and outputs: requirements, grid type, and configurations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{BatteryModel, Inverter};
use crate::load::LoadProfile;

/// Grid connection of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridType {
    #[default]
    SinglePhase,
    ThreePhase,
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePhase => f.write_str("Single Phase"),
            Self::ThreePhase => f.write_str("Three Phase"),
        }
    }
}

/// What the customer needs to keep running during an outage.
///
/// # Examples
///
/// ```
/// use backup_sizer::sizing::types::{GridType, Requirements};
///
/// let reqs = Requirements::new(8.0, 4.0, GridType::SinglePhase);
/// assert_eq!(reqs.energy_target_kwh(), 32.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirements {
    /// Power to sustain during the outage (kW).
    pub peak_load_kw: f64,
    /// Desired backup duration at peak load (hours).
    pub backup_hours: f64,
    /// Grid connection type.
    #[serde(default)]
    pub grid_type: GridType,
    /// Itemized energy need (kWh). Overrides `peak_load_kw * backup_hours`
    /// whenever present, zero included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_req_kwh: Option<f64>,
}

impl Requirements {
    pub fn new(peak_load_kw: f64, backup_hours: f64, grid_type: GridType) -> Self {
        Self {
            peak_load_kw,
            backup_hours,
            grid_type,
            energy_req_kwh: None,
        }
    }

    /// Returns a copy whose peak load and energy need come from an
    /// aggregated appliance profile.
    pub fn with_load_profile(&self, profile: LoadProfile) -> Self {
        Self {
            peak_load_kw: profile.peak_kw,
            energy_req_kwh: Some(profile.energy_kwh),
            ..self.clone()
        }
    }

    /// Energy the battery bank must deliver (kWh), before derating.
    pub fn energy_target_kwh(&self) -> f64 {
        self.energy_req_kwh
            .unwrap_or(self.peak_load_kw * self.backup_hours)
    }

    /// Whether the energy target comes from an itemized appliance profile.
    pub fn is_itemized(&self) -> bool {
        self.energy_req_kwh.is_some()
    }
}

impl Default for Requirements {
    fn default() -> Self {
        Self::new(8.0, 4.0, GridType::SinglePhase)
    }
}

/// Sizing result for one battery model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemConfiguration {
    /// Number of paralleled inverters (>= 1).
    pub inverter_count: u32,
    pub inverter: Inverter,
    /// Number of battery units (>= 1).
    pub battery_count: u32,
    pub battery: BatteryModel,
    /// `battery_count * battery.capacity_kwh`.
    pub total_capacity_kwh: f64,
    /// `inverter_count * inverter.capacity_kw`.
    pub total_power_kw: f64,
    /// Conservative runtime at full peak load (hours).
    pub estimated_autonomy_hours: f64,
}

impl fmt::Display for SystemConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Inverters: {} x {} ({:.1} kW total)",
            self.inverter_count, self.inverter.name, self.total_power_kw
        )?;
        writeln!(
            f,
            "Batteries: {} x {} ({:.1} kWh total)",
            self.battery_count, self.battery.name, self.total_capacity_kwh
        )?;
        write!(
            f,
            "Autonomy:  {:.1} h at full backup load",
            self.estimated_autonomy_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_target_prefers_itemized_value() {
        let mut reqs = Requirements::new(8.0, 4.0, GridType::SinglePhase);
        assert_eq!(reqs.energy_target_kwh(), 32.0);
        assert!(!reqs.is_itemized());

        reqs.energy_req_kwh = Some(0.0);
        assert_eq!(reqs.energy_target_kwh(), 0.0);
        assert!(reqs.is_itemized());
    }

    #[test]
    fn load_profile_overrides_peak_and_energy() {
        let reqs = Requirements::new(8.0, 6.0, GridType::ThreePhase);
        let applied = reqs.with_load_profile(LoadProfile {
            peak_kw: 2.5,
            energy_kwh: 9.75,
        });
        assert_eq!(applied.peak_load_kw, 2.5);
        assert_eq!(applied.energy_req_kwh, Some(9.75));
        assert_eq!(applied.backup_hours, 6.0);
        assert_eq!(applied.grid_type, GridType::ThreePhase);
    }

    #[test]
    fn grid_type_parses_snake_case() {
        let reqs: Requirements = toml::from_str(
            r#"
peak_load_kw = 3.0
backup_hours = 2.0
grid_type = "three_phase"
"#,
        )
        .expect("requirements should parse");
        assert_eq!(reqs.grid_type, GridType::ThreePhase);
        assert_eq!(reqs.energy_req_kwh, None);
    }

    #[test]
    fn grid_type_display() {
        assert_eq!(GridType::SinglePhase.to_string(), "Single Phase");
        assert_eq!(GridType::ThreePhase.to_string(), "Three Phase");
    }
}
