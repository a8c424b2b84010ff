//! Command-line arguments and requirement overrides.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use backup_sizer::sizing::{GridType, Requirements};

/// Sizes inverter and battery counts for a solar backup system.
///
/// With no `--scenario` or `--preset`, the `home` preset is used. Requirement
/// flags override whatever the scenario or preset sets.
#[derive(Debug, Parser)]
#[command(name = "backup-sizer", version)]
pub struct Args {
    /// Load configuration from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (home, three_phase, itemized).
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Peak load to sustain (kW).
    #[arg(long, value_name = "KW")]
    pub peak_kw: Option<f64>,

    /// Desired backup duration (hours).
    #[arg(long, value_name = "HOURS")]
    pub hours: Option<f64>,

    /// Grid connection type.
    #[arg(long, value_enum)]
    pub grid: Option<GridArg>,

    /// Itemized energy need (kWh), replacing peak times hours.
    #[arg(long, value_name = "KWH")]
    pub energy_kwh: Option<f64>,

    /// Write all configurations to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Print the appliance catalog and exit.
    #[arg(long)]
    pub list_appliances: bool,

    /// Print the inverter and battery catalog and exit.
    #[arg(long)]
    pub list_products: bool,

    /// Start the JSON API server.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridArg {
    Single,
    Three,
}

impl From<GridArg> for GridType {
    fn from(arg: GridArg) -> Self {
        match arg {
            GridArg::Single => Self::SinglePhase,
            GridArg::Three => Self::ThreePhase,
        }
    }
}

impl Args {
    /// Applies requirement flags on top of the loaded configuration.
    pub fn apply_overrides(&self, reqs: &mut Requirements) {
        if let Some(kw) = self.peak_kw {
            reqs.peak_load_kw = kw;
        }
        if let Some(hours) = self.hours {
            reqs.backup_hours = hours;
        }
        if let Some(grid) = self.grid {
            reqs.grid_type = grid.into();
        }
        if let Some(kwh) = self.energy_kwh {
            reqs.energy_req_kwh = Some(kwh);
        }
    }
}
