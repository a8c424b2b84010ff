//! Appliance-by-appliance load estimation.
//!
//! A [`LoadSelection`] produces a [`LoadProfile`] that replaces the simple
//! peak-times-hours estimate in [`Requirements`](crate::sizing::Requirements).

pub mod profile;
pub mod selection;

pub use profile::{LoadProfile, aggregate};
pub use selection::{ApplianceUpdate, InstanceId, LoadSelection, SelectedAppliance};
