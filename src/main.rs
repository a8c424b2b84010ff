//! Backup sizer entry point: CLI wiring and config-driven sizing.

mod cli;

use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backup_sizer::catalog::Catalog;
use backup_sizer::config::SizerConfig;
use backup_sizer::consultant::{ConsultationRequest, UnavailableConsultant, advise};
use backup_sizer::io::export::export_csv;
use backup_sizer::sizing::{FitSummary, size_system};

use crate::cli::Args;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads config: --scenario takes priority, then --preset, then the home default.
fn load_config(args: &Args) -> Result<SizerConfig, backup_sizer::config::ConfigError> {
    if let Some(ref path) = args.scenario {
        SizerConfig::from_toml_file(path)
    } else if let Some(ref name) = args.preset {
        SizerConfig::from_preset(name)
    } else {
        Ok(SizerConfig::home())
    }
}

fn print_appliances(catalog: &Catalog) {
    println!("{:<12} {:<12} Appliance", "ID", "Category");
    for a in catalog.appliances() {
        println!("{:<12} {:<12} {a}", a.id, a.category.to_string());
    }
}

fn print_products(catalog: &Catalog) {
    println!("{:<10} {:<10} Product", "Kind", "ID");
    for p in catalog.products() {
        println!("{:<10} {:<10} {}", p.kind(), p.id(), p.name());
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    args.apply_overrides(&mut config.requirements);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let catalog = config.catalog().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if args.list_appliances || args.list_products {
        if args.list_products {
            print_products(&catalog);
        }
        if args.list_appliances {
            print_appliances(&catalog);
        }
        return;
    }

    let reqs = config.effective_requirements(&catalog).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    if reqs.is_itemized() && !config.load.is_empty() {
        info!(
            items = config.load.len(),
            peak_kw = reqs.peak_load_kw,
            energy_kwh = reqs.energy_target_kwh(),
            "applied itemized load"
        );
    }

    let rec = size_system(&reqs, &catalog);
    println!(
        "Need: {} kW for {} h ({}), {:.2} kWh\n",
        reqs.peak_load_kw,
        reqs.backup_hours,
        reqs.grid_type,
        reqs.energy_target_kwh()
    );
    println!("{rec}");
    println!("{}", FitSummary::new(&rec.best, &reqs));

    let advice = advise(
        &UnavailableConsultant,
        &ConsultationRequest::new(&rec.best, &reqs),
    );
    println!("\n--- Consultant ---\n{advice}");

    if let Some(ref path) = args.csv_out {
        if let Err(e) = export_csv(&rec, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "configurations written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(backup_sizer::api::AppState { catalog });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(backup_sizer::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
