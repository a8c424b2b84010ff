//! Required-versus-provided comparison for one configuration.

use std::fmt;

use serde::Serialize;

use super::types::{Requirements, SystemConfiguration};

/// How well a configuration covers the stated power and energy need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    /// Stated peak load (kW).
    pub required_power_kw: f64,
    /// Combined inverter output (kW).
    pub provided_power_kw: f64,
    /// Energy target before depth-of-discharge derating (kWh).
    pub required_energy_kwh: f64,
    /// Rated storage of the battery bank (kWh).
    pub provided_storage_kwh: f64,
    /// Share of peak load the inverter array can carry, capped at 100.
    pub peak_coverage_pct: f64,
}

impl FitSummary {
    pub fn new(config: &SystemConfiguration, reqs: &Requirements) -> Self {
        let peak_coverage_pct = if config.total_power_kw >= reqs.peak_load_kw {
            100.0
        } else {
            (config.total_power_kw / reqs.peak_load_kw * 100.0).round()
        };

        Self {
            required_power_kw: reqs.peak_load_kw,
            provided_power_kw: config.total_power_kw,
            required_energy_kwh: reqs.energy_target_kwh(),
            provided_storage_kwh: config.total_capacity_kwh,
            peak_coverage_pct,
        }
    }

    /// Whether the inverter array carries the full peak load.
    pub fn covers_peak(&self) -> bool {
        self.peak_coverage_pct >= 100.0
    }
}

impl fmt::Display for FitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Fit ---")?;
        writeln!(
            f,
            "Power:    need {:.2} kW, provided {:.2} kW",
            self.required_power_kw, self.provided_power_kw
        )?;
        writeln!(
            f,
            "Storage:  need {:.2} kWh, provided {:.2} kWh",
            self.required_energy_kwh, self.provided_storage_kwh
        )?;
        write!(f, "Handles {:.0}% of peak load", self.peak_coverage_pct)
    }
}
