//! Inverter and battery sizing for a set of requirements.

pub mod engine;
pub mod fit;
pub mod types;

pub use engine::{Recommendation, compute_configuration, select_best, size_system};
pub use fit::FitSummary;
pub use types::{GridType, Requirements, SystemConfiguration};
