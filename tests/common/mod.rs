//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use backup_sizer::catalog::Catalog;
use backup_sizer::sizing::{GridType, Requirements};

/// Reference catalog (5.5 kW inverter, 100 Ah and 200 Ah batteries).
pub fn reference_catalog() -> Catalog {
    Catalog::reference()
}

/// Single-phase requirements.
pub fn single(peak_kw: f64, hours: f64) -> Requirements {
    Requirements::new(peak_kw, hours, GridType::SinglePhase)
}

/// Three-phase requirements.
pub fn three(peak_kw: f64, hours: f64) -> Requirements {
    Requirements::new(peak_kw, hours, GridType::ThreePhase)
}

/// Peak loads swept by property tests (kW), including pathological values.
pub fn peak_sweep() -> Vec<f64> {
    let mut peaks = vec![-3.0, 0.0, 0.1, 0.5, 1.0];
    peaks.extend((1..=80).map(|i| f64::from(i) * 0.75));
    peaks
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
