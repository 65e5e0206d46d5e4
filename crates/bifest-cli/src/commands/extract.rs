//! Extract command - mine module records from a single datasheet PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bifest_core::datasheet::{DatasheetParser, ExtractionResult, ModuleExtractor};
use bifest_core::models::config::BifestConfig;
use bifest_core::pdf::convert_to_text;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input datasheet (PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also show the capped raw-text preview
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BifestConfig::from_file(std::path::Path::new(path))?
    } else {
        BifestConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing datasheet: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Extracting text...");
    pb.set_position(20);

    let data = fs::read(&args.input)?;
    let text = convert_to_text(&data)?;
    debug!("Extracted {} characters of text", text.len());

    if text.len() < config.pdf.min_text_length {
        eprintln!(
            "{} Only {} characters of embedded text; results may be incomplete.",
            style("⚠").yellow(),
            text.len()
        );
    }

    pb.set_message("Scanning fields...");
    pb.set_position(60);

    let parser = DatasheetParser::with_config(&config.scan);
    let result = parser.extract_modules(&text);

    pb.finish_with_message("Done");

    if result.mentions_bifacial {
        eprintln!(
            "{} Datasheet mentions bifacial ratings; verify boost assumptions against the sheet.",
            style("⚠").yellow()
        );
    }

    let output = format_result(&result, args.format, args.raw)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    raw: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["model", "watts", "isc", "imp", "fuse"])?;
            for module in &result.modules {
                writer.write_record([
                    module.model.clone().unwrap_or_default(),
                    module.watts.map(|w| w.to_string()).unwrap_or_default(),
                    module.isc.map(|v| v.to_string()).unwrap_or_default(),
                    module.imp.map(|v| v.to_string()).unwrap_or_default(),
                    module.fuse.map(|v| v.to_string()).unwrap_or_default(),
                ])?;
            }
            Ok(String::from_utf8(writer.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();

            if result.modules.is_empty() {
                out.push_str("No module candidates detected.\n");
            } else {
                if let Some(strategy) = &result.strategy {
                    out.push_str(&format!(
                        "Found {} module variant(s) via {} scan:\n",
                        result.modules.len(),
                        strategy
                    ));
                }
                for (idx, module) in result.modules.iter().enumerate() {
                    out.push_str(&format!(
                        "  [{}] {}  {}  Isc={}  Imp={}  fuse={}\n",
                        idx,
                        module.model.as_deref().unwrap_or("-"),
                        module
                            .watts
                            .map(|w| format!("{} W", w))
                            .unwrap_or_else(|| "-".to_string()),
                        module
                            .isc
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        module
                            .imp
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        module
                            .fuse
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ));
                }
            }

            if raw {
                out.push_str("\n--- raw text preview ---\n");
                out.push_str(&result.raw_preview);
                out.push('\n');
            }

            Ok(out)
        }
    }
}
