//! Household appliance catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Appliance grouping used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplianceCategory {
    #[serde(rename = "HVAC")]
    Hvac,
    Kitchen,
    Water,
    Electronics,
    Lighting,
    Other,
}

impl fmt::Display for ApplianceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hvac => "HVAC",
            Self::Kitchen => "Kitchen",
            Self::Water => "Water",
            Self::Electronics => "Electronics",
            Self::Lighting => "Lighting",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

/// A catalog appliance with its typical power draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: String,
    pub name: String,
    pub category: ApplianceCategory,
    /// Typical running power (W).
    pub default_power_watts: f64,
}

impl Appliance {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ApplianceCategory,
        default_power_watts: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            default_power_watts,
        }
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}W)", self.name, self.default_power_watts)
    }
}
