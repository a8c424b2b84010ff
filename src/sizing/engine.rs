//! Equipment count calculation and configuration selection.
//!
//! Everything here is total: non-positive or non-finite inputs are absorbed
//! by flooring counts at one rather than rejected, so a live-updating caller
//! always gets a displayable result.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::types::{GridType, Requirements, SystemConfiguration};
use crate::catalog::{BatteryModel, Catalog, Inverter};

/// Usable fraction of rated battery capacity.
pub const DEPTH_OF_DISCHARGE: f64 = 0.8;

/// Three-phase inverter arrays are built in multiples of this.
pub const PHASES: u32 = 3;

/// Floor applied to peak load when estimating autonomy (kW).
const MIN_AUTONOMY_LOAD_KW: f64 = 1.0;

/// `ceil(x)` as a unit count, never below one.
fn unit_count(x: f64) -> u32 {
    // `as` saturates: NaN and negatives land on 0.
    (x.ceil() as u32).max(1)
}

/// Rounds an inverter count up to a balanced three-phase array.
fn balance_phases(count: u32, grid_type: GridType) -> u32 {
    match grid_type {
        GridType::SinglePhase => count,
        GridType::ThreePhase if count < PHASES => PHASES,
        // u32::MAX is itself a multiple of 3, so this cannot overflow.
        GridType::ThreePhase => count.next_multiple_of(PHASES),
    }
}

/// Inverter count before phase balancing.
pub fn raw_inverter_count(peak_load_kw: f64, inverter: &Inverter) -> u32 {
    unit_count(peak_load_kw / inverter.capacity_kw)
}

/// Computes the system configuration for one battery model.
///
/// # Arguments
///
/// * `reqs` - Customer requirements
/// * `inverter` - The inverter model used for every configuration
/// * `battery` - Battery model to size the bank with
///
/// # Examples
///
/// ```
/// use backup_sizer::catalog::defaults;
/// use backup_sizer::sizing::engine::compute_configuration;
/// use backup_sizer::sizing::types::{GridType, Requirements};
///
/// let reqs = Requirements::new(8.0, 4.0, GridType::SinglePhase);
/// let cfg = compute_configuration(&reqs, &defaults::inverter(), &defaults::battery_200ah());
/// assert_eq!(cfg.inverter_count, 2);
/// assert_eq!(cfg.battery_count, 4);
/// ```
pub fn compute_configuration(
    reqs: &Requirements,
    inverter: &Inverter,
    battery: &BatteryModel,
) -> SystemConfiguration {
    let inverter_count = balance_phases(
        raw_inverter_count(reqs.peak_load_kw, inverter),
        reqs.grid_type,
    );
    let total_power_kw = f64::from(inverter_count) * inverter.capacity_kw;

    let target_storage_kwh = reqs.energy_target_kwh() / DEPTH_OF_DISCHARGE;
    let battery_count = unit_count(target_storage_kwh / battery.capacity_kwh);
    let total_capacity_kwh = f64::from(battery_count) * battery.capacity_kwh;

    let estimated_autonomy_hours = (total_capacity_kwh * DEPTH_OF_DISCHARGE)
        / reqs.peak_load_kw.max(MIN_AUTONOMY_LOAD_KW);

    if inverter_count > inverter.max_parallel {
        warn!(
            inverter = %inverter.id,
            inverter_count,
            max_parallel = inverter.max_parallel,
            "inverter array exceeds parallel limit"
        );
    }

    debug!(
        battery = %battery.id,
        inverter_count,
        battery_count,
        total_power_kw,
        total_capacity_kwh,
        estimated_autonomy_hours,
        "computed configuration"
    );

    SystemConfiguration {
        inverter_count,
        inverter: inverter.clone(),
        battery_count,
        battery: battery.clone(),
        total_capacity_kwh,
        total_power_kw,
        estimated_autonomy_hours,
    }
}

/// Picks the configuration with fewer batteries, preferring `b` on a tie.
///
/// Callers pass candidates in catalog order (smaller units first), so ties
/// resolve toward fewer, larger battery units.
pub fn select_best(a: SystemConfiguration, b: SystemConfiguration) -> SystemConfiguration {
    if prefers_second(&a, &b) { b } else { a }
}

/// Whether `b` wins over `a`: no more battery units than `a`.
fn prefers_second(a: &SystemConfiguration, b: &SystemConfiguration) -> bool {
    b.battery_count <= a.battery_count
}

/// Outcome of sizing against every battery model in a catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// The selected configuration.
    pub best: SystemConfiguration,
    /// The remaining configurations, in catalog order.
    pub alternatives: Vec<SystemConfiguration>,
}

impl Recommendation {
    /// Best first, then alternatives.
    pub fn all(&self) -> impl Iterator<Item = &SystemConfiguration> {
        std::iter::once(&self.best).chain(&self.alternatives)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Recommended System ---")?;
        writeln!(f, "{}", self.best)?;
        for alt in &self.alternatives {
            writeln!(f, "\n--- Alternative ---")?;
            writeln!(f, "{alt}")?;
        }
        Ok(())
    }
}

/// Sizes one configuration per battery model and selects the best.
///
/// Candidates are compared left to right with the [`select_best`] rule, so
/// with the reference catalog the winner is that of
/// `select_best(config_100ah, config_200ah)`.
pub fn size_system(reqs: &Requirements, catalog: &Catalog) -> Recommendation {
    let configs: Vec<SystemConfiguration> = catalog
        .batteries()
        .iter()
        .map(|bat| compute_configuration(reqs, catalog.inverter(), bat))
        .collect();

    let best_idx = (1..configs.len()).fold(0, |best, i| {
        if prefers_second(&configs[best], &configs[i]) {
            i
        } else {
            best
        }
    });

    let mut alternatives = configs;
    let best = alternatives.remove(best_idx);
    debug!(battery = %best.battery.id, "selected best configuration");

    Recommendation { best, alternatives }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults;

    fn reqs(peak: f64, hours: f64, grid_type: GridType) -> Requirements {
        Requirements::new(peak, hours, grid_type)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_single_phase_example() {
        let r = reqs(8.0, 4.0, GridType::SinglePhase);
        let inv = defaults::inverter();

        let small = compute_configuration(&r, &inv, &defaults::battery_100ah());
        assert_eq!(small.inverter_count, 2);
        assert!(approx(small.total_power_kw, 11.0));
        assert_eq!(small.battery_count, 8);
        assert!(approx(small.total_capacity_kwh, 40.96));
        assert!(approx(small.estimated_autonomy_hours, 4.096));

        let large = compute_configuration(&r, &inv, &defaults::battery_200ah());
        assert_eq!(large.battery_count, 4);
        assert!(approx(large.total_capacity_kwh, 40.96));
        assert!(approx(large.estimated_autonomy_hours, 4.096));

        let best = select_best(small, large);
        assert_eq!(best.battery.id, "bat-200");
    }

    #[test]
    fn three_phase_forces_minimum_of_three() {
        let r = reqs(8.0, 4.0, GridType::ThreePhase);
        let cfg = compute_configuration(&r, &defaults::inverter(), &defaults::battery_100ah());
        assert_eq!(cfg.inverter_count, 3);
        assert!(approx(cfg.total_power_kw, 16.5));
    }

    #[test]
    fn three_phase_rounds_up_to_multiple_of_three() {
        let inv = defaults::inverter();
        let bat = defaults::battery_100ah();
        // raw counts 4, 6, 7 -> 6, 6, 9
        for (peak, expected) in [(20.0, 6), (33.0, 6), (35.0, 9)] {
            let cfg = compute_configuration(&reqs(peak, 1.0, GridType::ThreePhase), &inv, &bat);
            assert_eq!(cfg.inverter_count, expected, "peak {peak}");
        }
    }

    #[test]
    fn three_phase_count_always_balanced() {
        let inv = defaults::inverter();
        let bat = defaults::battery_200ah();
        let mut peak = -2.0;
        while peak < 120.0 {
            let cfg = compute_configuration(&reqs(peak, 2.0, GridType::ThreePhase), &inv, &bat);
            assert!(cfg.inverter_count >= 3, "peak {peak}");
            assert_eq!(cfg.inverter_count % 3, 0, "peak {peak}");
            assert!(approx(
                cfg.total_power_kw,
                f64::from(cfg.inverter_count) * inv.capacity_kw
            ));
            peak += 0.7;
        }
    }

    #[test]
    fn single_phase_matches_raw_ceiling() {
        let inv = defaults::inverter();
        let bat = defaults::battery_100ah();
        for peak in [0.1, 5.5, 5.6, 11.0, 11.01, 40.0] {
            let cfg = compute_configuration(&reqs(peak, 1.0, GridType::SinglePhase), &inv, &bat);
            assert_eq!(cfg.inverter_count, (peak / 5.5_f64).ceil() as u32, "peak {peak}");
        }
    }

    #[test]
    fn non_positive_inputs_floor_counts_at_one() {
        let inv = defaults::inverter();
        let bat = defaults::battery_100ah();
        for peak in [0.0, -3.0, f64::NAN] {
            let cfg = compute_configuration(&reqs(peak, 4.0, GridType::SinglePhase), &inv, &bat);
            assert_eq!(cfg.inverter_count, 1);
            assert_eq!(cfg.battery_count, 1);
            assert!(approx(cfg.total_capacity_kwh, 5.12));
            // peak floored at 1 kW for autonomy
            assert!(approx(cfg.estimated_autonomy_hours, 5.12 * 0.8));
        }
    }

    #[test]
    fn itemized_energy_overrides_estimate() {
        let mut r = reqs(8.0, 4.0, GridType::SinglePhase);
        r.energy_req_kwh = Some(10.0);
        let cfg = compute_configuration(&r, &defaults::inverter(), &defaults::battery_100ah());
        // 10 / 0.8 = 12.5 -> ceil(12.5 / 5.12) = 3
        assert_eq!(cfg.battery_count, 3);
        // autonomy still divides by peak load
        assert!(approx(cfg.estimated_autonomy_hours, 3.0 * 5.12 * 0.8 / 8.0));
    }

    #[test]
    fn zero_itemized_energy_still_yields_one_battery() {
        let mut r = reqs(2.0, 4.0, GridType::SinglePhase);
        r.energy_req_kwh = Some(0.0);
        let cfg = compute_configuration(&r, &defaults::inverter(), &defaults::battery_200ah());
        assert_eq!(cfg.battery_count, 1);
    }

    #[test]
    fn battery_count_formula_holds() {
        let inv = defaults::inverter();
        for bat in defaults::batteries() {
            for energy in [0.5, 4.0, 4.096, 17.3, 64.0, 200.0] {
                let mut r = reqs(5.0, 1.0, GridType::SinglePhase);
                r.energy_req_kwh = Some(energy);
                let cfg = compute_configuration(&r, &inv, &bat);
                let expected = ((energy / 0.8) / bat.capacity_kwh).ceil().max(1.0) as u32;
                assert_eq!(cfg.battery_count, expected, "{} @ {energy}", bat.id);
            }
        }
    }

    #[test]
    fn select_best_prefers_second_on_tie() {
        let r = reqs(1.0, 1.0, GridType::SinglePhase);
        let inv = defaults::inverter();
        let a = compute_configuration(&r, &inv, &defaults::battery_100ah());
        let b = compute_configuration(&r, &inv, &defaults::battery_200ah());
        assert_eq!(a.battery_count, 1);
        assert_eq!(b.battery_count, 1);
        assert_eq!(select_best(a.clone(), b.clone()).battery.id, "bat-200");
        assert_eq!(select_best(b, a).battery.id, "bat-100");
    }

    #[test]
    fn select_best_prefers_fewer_batteries() {
        let inv = defaults::inverter();
        let mut a = compute_configuration(
            &reqs(1.0, 1.0, GridType::SinglePhase),
            &inv,
            &defaults::battery_100ah(),
        );
        let b = compute_configuration(
            &reqs(8.0, 4.0, GridType::SinglePhase),
            &inv,
            &defaults::battery_200ah(),
        );
        assert_eq!(select_best(a.clone(), b.clone()).battery_count, 1);
        a.battery_count = 9;
        assert_eq!(select_best(a, b).battery_count, 4);
    }

    #[test]
    fn size_system_matches_pairwise_selection() {
        let catalog = Catalog::reference();
        let r = reqs(8.0, 4.0, GridType::SinglePhase);
        let rec = size_system(&r, &catalog);
        assert_eq!(rec.best.battery.id, "bat-200");
        assert_eq!(rec.alternatives.len(), 1);
        assert_eq!(rec.alternatives[0].battery.id, "bat-100");
        assert_eq!(rec.all().count(), 2);

        let pairwise = select_best(
            compute_configuration(&r, catalog.inverter(), &catalog.batteries()[0]),
            compute_configuration(&r, catalog.inverter(), &catalog.batteries()[1]),
        );
        assert_eq!(rec.best, pairwise);
    }

    #[test]
    fn size_system_folds_select_best_over_longer_catalogs() {
        let mut batteries = defaults::batteries();
        // same unit count as the 200 Ah bank, listed last
        batteries.push(BatteryModel {
            id: "bat-220".to_string(),
            name: "51.2V 220Ah".to_string(),
            capacity_kwh: 11.264,
            voltage: 51.2,
            amp_hours: 220.0,
        });
        let catalog = Catalog::new(defaults::inverter(), batteries, defaults::appliances())
            .expect("catalog should be valid");

        for peak in [0.5, 3.0, 8.0, 17.5, 42.0] {
            let r = reqs(peak, 4.0, GridType::SinglePhase);
            let folded = catalog
                .batteries()
                .iter()
                .map(|bat| compute_configuration(&r, catalog.inverter(), bat))
                .reduce(select_best)
                .expect("catalog has batteries");
            let rec = size_system(&r, &catalog);
            assert_eq!(rec.best, folded, "peak={peak}");
            assert_eq!(rec.alternatives.len(), 2);
        }
    }

    #[test]
    fn recommendation_display_lists_alternatives() {
        let rec = size_system(&reqs(8.0, 4.0, GridType::SinglePhase), &Catalog::reference());
        let text = rec.to_string();
        assert!(text.contains("--- Recommended System ---"));
        assert!(text.contains("4 x LSHE MSP 51.2V 200Ah"));
        assert!(text.contains("--- Alternative ---"));
        assert!(text.contains("8 x LSHE MSP 51.2V 100Ah"));
    }
}
