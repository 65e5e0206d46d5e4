//! Boost command - compute the current boost for a module at a site.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use bifest_core::boost::compute_boost;
use bifest_core::datasheet::{DatasheetParser, ModuleExtractor};
use bifest_core::models::config::BifestConfig;
use bifest_core::models::module::ModuleCandidate;
use bifest_core::models::site::{MountType, ObstructionLevel, SiteParameters};
use bifest_core::pdf::convert_to_text;

/// Arguments for the boost command.
#[derive(Args)]
pub struct BoostArgs {
    /// Ground albedo (0.0 - 1.0)
    #[arg(long)]
    albedo: Decimal,

    /// Mounting arrangement
    #[arg(long, value_enum, default_value = "fixed")]
    mount: MountArg,

    /// Module clearance height above ground, meters
    #[arg(long, default_value = "1.2")]
    clearance: Decimal,

    /// Ground coverage ratio (0.0 - 1.0)
    #[arg(long, default_value = "0.5")]
    gcr: Decimal,

    /// Rear-side obstruction level
    #[arg(long, value_enum, default_value = "clear")]
    obstruction: ObstructionArg,

    /// Module short-circuit current, amperes
    #[arg(long)]
    isc: Option<Decimal>,

    /// Module current at maximum power point, amperes
    #[arg(long)]
    imp: Option<Decimal>,

    /// Sheet maximum series fuse rating, amperes
    #[arg(long)]
    fuse: Option<Decimal>,

    /// Datasheet PDF to pre-fill Isc/Imp/fuse from
    #[arg(long)]
    datasheet: Option<PathBuf>,

    /// Which detected module variant to use (see `bifest extract`)
    #[arg(long, default_value = "0")]
    module: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: BoostOutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum MountArg {
    /// Fixed-tilt racking
    Fixed,
    /// Single-axis tracker
    Tracker,
}

impl From<MountArg> for MountType {
    fn from(arg: MountArg) -> Self {
        match arg {
            MountArg::Fixed => MountType::Fixed,
            MountArg::Tracker => MountType::Tracker,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ObstructionArg {
    /// Open underside
    Clear,
    /// Bulky racking or equipment under the modules
    Bulky,
}

impl From<ObstructionArg> for ObstructionLevel {
    fn from(arg: ObstructionArg) -> Self {
        match arg {
            ObstructionArg::Clear => ObstructionLevel::Clear,
            ObstructionArg::Bulky => ObstructionLevel::Bulky,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum BoostOutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: BoostArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        BifestConfig::from_file(std::path::Path::new(path))?
    } else {
        BifestConfig::default()
    };

    let mut module = if let Some(datasheet) = &args.datasheet {
        select_from_datasheet(datasheet, args.module, &config)?
    } else {
        ModuleCandidate::default()
    };

    // Manual values override anything mined from the sheet
    if args.isc.is_some() {
        module.isc = args.isc;
    }
    if args.imp.is_some() {
        module.imp = args.imp;
    }
    if args.fuse.is_some() {
        module.fuse = args.fuse;
    }

    let site = SiteParameters {
        albedo: args.albedo,
        mount: args.mount.into(),
        clearance_m: args.clearance,
        gcr: args.gcr,
        obstruction: args.obstruction.into(),
    };

    let result = compute_boost(&site, &module)?;

    match args.format {
        BoostOutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        BoostOutputFormat::Text => {
            let pct = result.boost * Decimal::ONE_HUNDRED;
            println!(
                "{} Estimated boost: {} %",
                style("✓").green(),
                pct.round_dp(1)
            );
            println!("  Effective Isc: {} A", result.effective_isc.round_dp(2));
            println!("  Effective Imp: {} A", result.effective_imp.round_dp(2));
            for note in &result.notes {
                println!("  {} {}", style("ℹ").blue(), note);
            }
        }
    }

    Ok(())
}

fn select_from_datasheet(
    path: &PathBuf,
    index: usize,
    config: &BifestConfig,
) -> anyhow::Result<ModuleCandidate> {
    if !path.exists() {
        anyhow::bail!("Datasheet file not found: {}", path.display());
    }

    info!("Pre-filling module specs from {}", path.display());

    let data = fs::read(path)?;
    let text = convert_to_text(&data)?;
    let result = DatasheetParser::with_config(&config.scan).extract_modules(&text);

    if result.mentions_bifacial {
        eprintln!(
            "{} Datasheet mentions bifacial ratings; verify boost assumptions against the sheet.",
            style("⚠").yellow()
        );
    }

    debug!("Datasheet yielded {} variants", result.modules.len());

    if result.modules.is_empty() {
        anyhow::bail!(
            "No module candidates detected in {}; pass --isc/--imp manually",
            path.display()
        );
    }

    result.modules.get(index).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "Module index {} out of range; datasheet has {} variant(s)",
            index,
            result.modules.len()
        )
    })
}
