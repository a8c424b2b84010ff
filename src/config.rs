//! TOML-based sizing configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Appliance, BatteryModel, Catalog, Inverter, defaults};
use crate::load::{ApplianceUpdate, LoadSelection};
use crate::sizing::{GridType, Requirements};

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults: the reference catalog and an 8 kW / 4 h
/// single-phase requirement. Load from TOML with
/// [`SizerConfig::from_toml_file`] or use [`SizerConfig::home`] for the
/// built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizerConfig {
    /// Customer requirements.
    #[serde(default)]
    pub requirements: Requirements,
    /// Product and appliance catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Itemized appliance load. When non-empty, its aggregate replaces the
    /// peak load and energy target in `requirements`.
    #[serde(default)]
    pub load: Vec<LoadItemConfig>,
}

/// Product and appliance catalog overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// The inverter model used for every configuration.
    pub inverter: Inverter,
    /// Battery models, in evaluation order.
    pub batteries: Vec<BatteryModel>,
    /// Appliances available for itemized load entries.
    pub appliances: Vec<Appliance>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            inverter: defaults::inverter(),
            batteries: defaults::batteries(),
            appliances: defaults::appliances(),
        }
    }
}

/// One appliance line of an itemized load.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadItemConfig {
    /// Catalog appliance id.
    pub appliance: String,
    /// Number of units (must be >= 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Per-unit power override (W). Defaults to the catalog value.
    pub power_watts: Option<f64>,
    /// Hours of use. Defaults to the full backup window and is capped by it.
    pub running_hours: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl LoadItemConfig {
    pub fn new(appliance: &str, quantity: u32, running_hours: Option<f64>) -> Self {
        Self {
            appliance: appliance.to_string(),
            quantity,
            power_watts: None,
            running_hours,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"requirements.backup_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SizerConfig {
    /// Returns the home preset: 8 kW for 4 hours on a single-phase grid.
    pub fn home() -> Self {
        Self {
            requirements: Requirements::default(),
            catalog: CatalogConfig::default(),
            load: Vec::new(),
        }
    }

    /// Returns the three-phase preset: a 20 kW commercial load for 6 hours.
    pub fn three_phase() -> Self {
        Self {
            requirements: Requirements::new(20.0, 6.0, GridType::ThreePhase),
            ..Self::home()
        }
    }

    /// Returns the itemized preset: a household appliance list over a
    /// 6-hour outage.
    pub fn itemized() -> Self {
        Self {
            requirements: Requirements::new(8.0, 6.0, GridType::SinglePhase),
            catalog: CatalogConfig::default(),
            load: vec![
                LoadItemConfig::new("ac-1.5", 2, Some(5.0)),
                LoadItemConfig::new("fridge-std", 1, None),
                LoadItemConfig::new("pump-1.0", 1, Some(1.0)),
                LoadItemConfig::new("lights-10", 2, None),
                LoadItemConfig::new("tv", 1, Some(4.0)),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["home", "three_phase", "itemized"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home" => Ok(Self::home()),
            "three_phase" => Ok(Self::three_phase()),
            "itemized" => Ok(Self::itemized()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let r = &self.requirements;

        if !(r.peak_load_kw > 0.0) {
            errors.push(ConfigError::new("requirements.peak_load_kw", "must be > 0"));
        }
        if !(r.backup_hours > 0.0) {
            errors.push(ConfigError::new("requirements.backup_hours", "must be > 0"));
        }
        if let Some(kwh) = r.energy_req_kwh {
            if !(kwh >= 0.0) {
                errors.push(ConfigError::new("requirements.energy_req_kwh", "must be >= 0"));
            }
        }

        let catalog = match self.catalog() {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        for (i, item) in self.load.iter().enumerate() {
            let known = catalog
                .as_ref()
                .is_none_or(|c| c.appliance(&item.appliance).is_some());
            if !known {
                errors.push(ConfigError::new(
                    format!("load[{i}].appliance"),
                    format!("unknown appliance \"{}\"", item.appliance),
                ));
            }
            if item.quantity == 0 {
                errors.push(ConfigError::new(format!("load[{i}].quantity"), "must be >= 1"));
            }
            if item.power_watts.is_some_and(|w| !(w >= 0.0)) {
                errors.push(ConfigError::new(format!("load[{i}].power_watts"), "must be >= 0"));
            }
            if item.running_hours.is_some_and(|h| !(h > 0.0)) {
                errors.push(ConfigError::new(format!("load[{i}].running_hours"), "must be > 0"));
            }
        }

        errors
    }

    /// Builds the read-only catalog from the `[catalog]` section.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the catalog has no battery models or a
    /// non-positive capacity.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Catalog::new(
            self.catalog.inverter.clone(),
            self.catalog.batteries.clone(),
            self.catalog.appliances.clone(),
        )
    }

    /// Builds the appliance selection described by `[[load]]`, capping run
    /// times at the configured backup duration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an entry names an appliance missing from
    /// `catalog`.
    pub fn load_selection(&self, catalog: &Catalog) -> Result<LoadSelection, ConfigError> {
        build_selection(&self.load, catalog, self.requirements.backup_hours)
    }

    /// Requirements with the itemized load applied, if any.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the load references an unknown appliance.
    pub fn effective_requirements(&self, catalog: &Catalog) -> Result<Requirements, ConfigError> {
        if self.load.is_empty() {
            return Ok(self.requirements.clone());
        }
        let profile = self.load_selection(catalog)?.profile();
        Ok(self.requirements.with_load_profile(profile))
    }
}

/// Turns load entries into an appliance selection.
///
/// # Errors
///
/// Returns a `ConfigError` if an entry names an appliance missing from
/// `catalog`.
pub fn build_selection(
    items: &[LoadItemConfig],
    catalog: &Catalog,
    backup_hours: f64,
) -> Result<LoadSelection, ConfigError> {
    let mut selection = LoadSelection::new();

    for (i, item) in items.iter().enumerate() {
        let appliance = catalog.appliance(&item.appliance).ok_or_else(|| {
            ConfigError::new(
                format!("load[{i}].appliance"),
                format!("unknown appliance \"{}\"", item.appliance),
            )
        })?;
        let id = selection.add(appliance, backup_hours);
        selection.update(id, ApplianceUpdate::Quantity(item.quantity), backup_hours);
        if let Some(w) = item.power_watts {
            selection.update(id, ApplianceUpdate::PowerWatts(w), backup_hours);
        }
        if let Some(h) = item.running_hours {
            selection.update(id, ApplianceUpdate::RunningHours(h), backup_hours);
        }
    }

    Ok(selection)
}

impl Default for SizerConfig {
    fn default() -> Self {
        Self::home()
    }
}
