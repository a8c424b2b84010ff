//! Inverter and battery product definitions.

use serde::{Deserialize, Serialize};

/// A hybrid inverter model.
///
/// Inverters are paralleled to reach the required output power; a single
/// unit contributes `capacity_kw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Inverter {
    /// Stable catalog identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Continuous output power of one unit (kW).
    pub capacity_kw: f64,
    /// Maximum number of units that can run in parallel.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: u32,
}

fn default_max_parallel() -> u32 {
    12
}

/// A rack-mount battery model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatteryModel {
    /// Stable catalog identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rated energy of one unit (kWh).
    pub capacity_kwh: f64,
    /// Nominal voltage (V).
    pub voltage: f64,
    /// Rated charge (Ah).
    pub amp_hours: f64,
}

impl BatteryModel {
    /// Rated energy derived from voltage and charge, `V * Ah / 1000`.
    ///
    /// The catalog stores `capacity_kwh` explicitly; this is what it should
    /// agree with.
    pub fn nominal_capacity_kwh(&self) -> f64 {
        self.voltage * self.amp_hours / 1000.0
    }
}

/// A catalog entry, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Product {
    Inverter(Inverter),
    Battery(BatteryModel),
}

impl Product {
    pub fn id(&self) -> &str {
        match self {
            Self::Inverter(inv) => &inv.id,
            Self::Battery(bat) => &bat.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Inverter(inv) => &inv.name,
            Self::Battery(bat) => &bat.name,
        }
    }

    /// Human-readable kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inverter(_) => "inverter",
            Self::Battery(_) => "battery",
        }
    }
}

impl From<Inverter> for Product {
    fn from(inv: Inverter) -> Self {
        Self::Inverter(inv)
    }
}

impl From<BatteryModel> for Product {
    fn from(bat: BatteryModel) -> Self {
        Self::Battery(bat)
    }
}
