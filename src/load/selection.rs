//! User-configured appliance instances and the list that owns them.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use super::profile::{LoadProfile, aggregate};
use crate::catalog::{Appliance, ApplianceCategory};

/// Identity of one appliance instance within a [`LoadSelection`].
///
/// The sequence number alone keeps ids unique within a selection; the nonce
/// keeps ids from separate selections from colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceId {
    seq: u64,
    nonce: u32,
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:08x}", self.seq, self.nonce)
    }
}

/// An editable field change for a selected appliance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplianceUpdate {
    Quantity(u32),
    PowerWatts(f64),
    RunningHours(f64),
}

/// An appliance copied out of the catalog with user-editable usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedAppliance {
    pub instance_id: InstanceId,
    pub appliance_id: String,
    pub name: String,
    pub category: ApplianceCategory,
    pub default_power_watts: f64,
    pub quantity: u32,
    /// Per-unit power override (W).
    pub power_watts: f64,
    /// Hours this appliance runs during the backup window.
    pub running_hours: f64,
}

impl SelectedAppliance {
    /// Copies a catalog entry into a new instance running for the whole
    /// backup window.
    ///
    /// # Arguments
    ///
    /// * `appliance` - Catalog entry; not referenced after this call
    /// * `backup_hours` - Current backup-duration ceiling
    /// * `instance_id` - Identity unique among the current selection
    pub fn from_catalog(appliance: &Appliance, backup_hours: f64, instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            appliance_id: appliance.id.clone(),
            name: appliance.name.clone(),
            category: appliance.category,
            default_power_watts: appliance.default_power_watts,
            quantity: 1,
            power_watts: appliance.default_power_watts,
            running_hours: backup_hours,
        }
    }

    /// Applies an edit.
    ///
    /// Running hours above `backup_hours` are clamped down to it; anything
    /// else, including zero or negative values, is stored as given.
    pub fn update(&mut self, update: ApplianceUpdate, backup_hours: f64) {
        match update {
            ApplianceUpdate::Quantity(n) => self.quantity = n,
            ApplianceUpdate::PowerWatts(w) => self.power_watts = w,
            ApplianceUpdate::RunningHours(h) => {
                self.running_hours = if h > backup_hours { backup_hours } else { h };
            }
        }
    }

    /// Combined draw of all units (W).
    pub fn peak_watts(&self) -> f64 {
        self.power_watts * f64::from(self.quantity)
    }

    /// Energy over the running hours (Wh).
    pub fn energy_wh(&self) -> f64 {
        self.peak_watts() * self.running_hours
    }
}

/// Ordered list of selected appliances.
///
/// Lowering the backup-duration ceiling does not touch entries already in
/// the list; only edits made afterwards are clamped to the new ceiling.
#[derive(Debug, Clone)]
pub struct LoadSelection {
    items: Vec<SelectedAppliance>,
    next_seq: u64,
    rng: StdRng,
}

impl LoadSelection {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Selection with a deterministic id nonce stream.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            next_seq: 0,
            rng,
        }
    }

    fn next_id(&mut self) -> InstanceId {
        let id = InstanceId {
            seq: self.next_seq,
            nonce: self.rng.random::<u32>(),
        };
        self.next_seq += 1;
        id
    }

    /// Adds a fresh instance of `appliance` and returns its id.
    pub fn add(&mut self, appliance: &Appliance, backup_hours: f64) -> InstanceId {
        let id = self.next_id();
        self.items
            .push(SelectedAppliance::from_catalog(appliance, backup_hours, id));
        debug!(instance = %id, appliance = %appliance.id, "added appliance");
        id
    }

    /// Edits the instance with the given id. Returns `false` if it is not in
    /// the selection.
    pub fn update(&mut self, id: InstanceId, update: ApplianceUpdate, backup_hours: f64) -> bool {
        match self.items.iter_mut().find(|item| item.instance_id == id) {
            Some(item) => {
                item.update(update, backup_hours);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the instance with the given id.
    pub fn remove(&mut self, id: InstanceId) -> Option<SelectedAppliance> {
        let pos = self.items.iter().position(|item| item.instance_id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: InstanceId) -> Option<&SelectedAppliance> {
        self.items.iter().find(|item| item.instance_id == id)
    }

    pub fn items(&self) -> &[SelectedAppliance] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Aggregate peak power and energy of the current selection.
    pub fn profile(&self) -> LoadProfile {
        aggregate(&self.items)
    }
}

impl Default for LoadSelection {
    fn default() -> Self {
        Self::new()
    }
}
