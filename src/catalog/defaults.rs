//! The reference LSHE MSP product line and appliance list.

use super::appliance::{Appliance, ApplianceCategory};
use super::product::{BatteryModel, Inverter};

/// LSHE MSP 5.5 kW hybrid inverter, parallel capable up to 12 units.
pub fn inverter() -> Inverter {
    Inverter {
        id: "inv-5.5".to_string(),
        name: "LSHE MSP 5.5kW Hybrid Inverter".to_string(),
        capacity_kw: 5.5,
        max_parallel: 12,
    }
}

/// Compact 51.2 V 100 Ah battery (5.12 kWh).
pub fn battery_100ah() -> BatteryModel {
    BatteryModel {
        id: "bat-100".to_string(),
        name: "LSHE MSP 51.2V 100Ah".to_string(),
        capacity_kwh: 5.12,
        voltage: 51.2,
        amp_hours: 100.0,
    }
}

/// High-density 51.2 V 200 Ah battery (10.24 kWh).
pub fn battery_200ah() -> BatteryModel {
    BatteryModel {
        id: "bat-200".to_string(),
        name: "LSHE MSP 51.2V 200Ah".to_string(),
        capacity_kwh: 10.24,
        voltage: 51.2,
        amp_hours: 200.0,
    }
}

/// Battery models in evaluation order. Order matters for tie-breaking.
pub fn batteries() -> Vec<BatteryModel> {
    vec![battery_100ah(), battery_200ah()]
}

pub fn appliances() -> Vec<Appliance> {
    use ApplianceCategory::{Electronics, Hvac, Kitchen, Lighting, Water};

    vec![
        Appliance::new("ac-1.0", "Air Conditioner (1.0 HP)", Hvac, 750.0),
        Appliance::new("ac-1.5", "Air Conditioner (1.5 HP)", Hvac, 1100.0),
        Appliance::new("ac-2.0", "Air Conditioner (2.0 HP)", Hvac, 1500.0),
        Appliance::new("fan", "Ceiling Fan", Hvac, 60.0),
        Appliance::new("fridge-std", "Refrigerator (Standard)", Kitchen, 150.0),
        Appliance::new("fridge-lrg", "Refrigerator (Large/SBS)", Kitchen, 250.0),
        Appliance::new("stove-1", "Stove (1 Burner/Induction)", Kitchen, 1500.0),
        Appliance::new("stove-2", "Stove (2 Burner/Induction)", Kitchen, 3000.0),
        Appliance::new("microwave", "Microwave", Kitchen, 1000.0),
        Appliance::new("pump-0.5", "Water Pump (0.5 HP)", Water, 375.0),
        Appliance::new("pump-1.0", "Water Pump (1.0 HP)", Water, 750.0),
        Appliance::new("heater", "Water Heater (Instant)", Water, 3500.0),
        Appliance::new("tv", "TV (LED)", Electronics, 100.0),
        Appliance::new("wifi", "WiFi Router", Electronics, 15.0),
        Appliance::new("computer", "Desktop Computer", Electronics, 200.0),
        Appliance::new("lights-10", "LED Lights (10 pack)", Lighting, 100.0),
    ]
}
