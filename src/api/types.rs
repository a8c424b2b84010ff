//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::catalog::{Appliance, Product};
use crate::config::LoadItemConfig;
use crate::load::{LoadProfile, SelectedAppliance};
use crate::sizing::{FitSummary, Requirements, SystemConfiguration};

/// Catalog listing.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Inverter first, then battery models in evaluation order.
    pub products: Vec<Product>,
    pub appliances: Vec<Appliance>,
}

/// Sizing outcome for a set of requirements.
#[derive(Debug, Serialize)]
pub struct SizeResponse {
    /// Requirements as received.
    pub requirements: Requirements,
    /// Selected configuration.
    pub best: SystemConfiguration,
    /// How `best` covers the stated need.
    pub fit: FitSummary,
    /// Remaining configurations, in catalog order.
    pub alternatives: Vec<SystemConfiguration>,
}

/// Appliance lines to aggregate.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadRequest {
    /// Backup-duration ceiling for running hours.
    pub backup_hours: f64,
    pub items: Vec<LoadItemConfig>,
}

/// Aggregated load and the resolved appliance instances.
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub profile: LoadProfile,
    pub items: Vec<SelectedAppliance>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_request_defaults_quantity() {
        let req: LoadRequest = serde_json::from_str(
            r#"{ "backup_hours": 4.0, "items": [{ "appliance": "tv" }] }"#,
        )
        .expect("request should parse");
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 1);
        assert!(req.items[0].running_hours.is_none());
    }

    #[test]
    fn load_request_rejects_unknown_fields() {
        let res: Result<LoadRequest, _> =
            serde_json::from_str(r#"{ "backup_hours": 4.0, "items": [], "extra": 1 }"#);
        assert!(res.is_err());
    }
}
