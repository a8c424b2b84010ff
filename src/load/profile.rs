//! Aggregate load profile from a set of selected appliances.

use std::fmt;

use serde::Serialize;

use super::selection::SelectedAppliance;

/// Combined peak power and energy of an appliance selection, rounded to
/// two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoadProfile {
    pub peak_kw: f64,
    pub energy_kwh: f64,
}

impl fmt::Display for LoadProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Peak load {:.2} kW, energy {:.2} kWh",
            self.peak_kw, self.energy_kwh
        )
    }
}

/// Rounds the exact binary value to two decimals, ties away from zero.
///
/// `0.015` is stored just below the half and rounds down to `0.01`; scaling
/// by 100 first would push it onto the half and round up.
pub(crate) fn round2(x: f64) -> f64 {
    // Only odd multiples of 1/8 sit exactly on a half at two decimals.
    let eighths = x * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        // x * 100 is exact here
        return (x * 100.0).round() / 100.0;
    }
    format!("{x:.2}").parse().unwrap_or(x)
}

/// Sums peak power and energy over `items`.
///
/// An empty slice yields a zero profile.
///
/// # Examples
///
/// ```
/// use backup_sizer::load::aggregate;
///
/// let profile = aggregate(&[]);
/// assert_eq!(profile.peak_kw, 0.0);
/// assert_eq!(profile.energy_kwh, 0.0);
/// ```
pub fn aggregate(items: &[SelectedAppliance]) -> LoadProfile {
    let peak_watts: f64 = items.iter().map(SelectedAppliance::peak_watts).sum();
    let energy_wh: f64 = items.iter().map(SelectedAppliance::energy_wh).sum();

    LoadProfile {
        peak_kw: round2(peak_watts / 1000.0),
        energy_kwh: round2(energy_wh / 1000.0),
    }
}
