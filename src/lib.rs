//! Solar backup system sizing: inverter and battery counts from a peak
//! load, backup duration, and grid type.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod consultant;
pub mod io;
pub mod load;
pub mod sizing;
