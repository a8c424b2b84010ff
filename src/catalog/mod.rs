//! Static product and appliance catalog.
//!
//! The catalog is built once at startup and only read afterwards. Sizing
//! functions borrow it; appliance instances copy out of it.

pub mod appliance;
pub mod defaults;
pub mod product;

pub use appliance::{Appliance, ApplianceCategory};
pub use product::{BatteryModel, Inverter, Product};

use tracing::warn;

use crate::config::ConfigError;

/// Allowed gap between a battery's stated and V*Ah capacity (kWh).
const RATING_TOLERANCE_KWH: f64 = 0.01;

/// Read-only product catalog: one inverter model, one or more battery
/// models, and the appliance list.
#[derive(Debug, Clone)]
pub struct Catalog {
    inverter: Inverter,
    batteries: Vec<BatteryModel>,
    appliances: Vec<Appliance>,
}

impl Catalog {
    /// Builds a catalog after checking that every product is usable for sizing.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no battery model is given or any capacity
    /// is not strictly positive.
    pub fn new(
        inverter: Inverter,
        batteries: Vec<BatteryModel>,
        appliances: Vec<Appliance>,
    ) -> Result<Self, ConfigError> {
        if !(inverter.capacity_kw > 0.0) {
            return Err(ConfigError::new(
                "catalog.inverter.capacity_kw",
                format!("must be > 0, got {}", inverter.capacity_kw),
            ));
        }
        if batteries.is_empty() {
            return Err(ConfigError::new(
                "catalog.batteries",
                "at least one battery model is required",
            ));
        }
        if let Some((i, bat)) = batteries
            .iter()
            .enumerate()
            .find(|(_, b)| !(b.capacity_kwh > 0.0))
        {
            return Err(ConfigError::new(
                format!("catalog.batteries[{i}].capacity_kwh"),
                format!("must be > 0, got {}", bat.capacity_kwh),
            ));
        }
        for bat in batteries.iter().filter(|b| {
            (b.nominal_capacity_kwh() - b.capacity_kwh).abs() > RATING_TOLERANCE_KWH
        }) {
            warn!(
                battery = %bat.id,
                capacity_kwh = bat.capacity_kwh,
                nominal_kwh = bat.nominal_capacity_kwh(),
                "battery rating disagrees with voltage x amp-hours"
            );
        }

        Ok(Self {
            inverter,
            batteries,
            appliances,
        })
    }

    /// The LSHE MSP reference catalog.
    pub fn reference() -> Self {
        Self {
            inverter: defaults::inverter(),
            batteries: defaults::batteries(),
            appliances: defaults::appliances(),
        }
    }

    pub fn inverter(&self) -> &Inverter {
        &self.inverter
    }

    /// Battery models in evaluation order. Never empty.
    pub fn batteries(&self) -> &[BatteryModel] {
        &self.batteries
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    pub fn appliance(&self, id: &str) -> Option<&Appliance> {
        self.appliances.iter().find(|a| a.id == id)
    }

    /// All inverter and battery products as tagged entries.
    pub fn products(&self) -> Vec<Product> {
        std::iter::once(Product::from(self.inverter.clone()))
            .chain(self.batteries.iter().cloned().map(Product::from))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}
