//! Batch command - mine module records from multiple datasheet PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use bifest_core::datasheet::{DatasheetParser, ExtractionResult, ModuleExtractor};
use bifest_core::models::config::BifestConfig;
use bifest_core::pdf::convert_to_text;

use super::extract::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single datasheet.
struct FileResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        BifestConfig::from_file(std::path::Path::new(path))?
    } else {
        BifestConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} datasheets to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = DatasheetParser::with_config(&config.scan);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let outcome = process_single_file(&path, &parser, &args);

        match outcome {
            Ok(extraction) => {
                debug!(
                    "{}: {} module(s)",
                    path.display(),
                    extraction.modules.len()
                );
                results.push(FileResult {
                    path,
                    extraction: Some(extraction),
                    error: None,
                });
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                if !args.continue_on_error {
                    pb.abandon();
                    return Err(e);
                }
                results.push(FileResult {
                    path,
                    extraction: None,
                    error: Some(e.to_string()),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if args.summary {
        write_summary(&results, args.output_dir.as_deref())?;
    }

    let processed = results.iter().filter(|r| r.extraction.is_some()).count();
    let failed = results.len() - processed;
    println!(
        "{} Processed {} datasheet(s), {} failed in {:.1?}",
        style("✓").green(),
        processed,
        failed,
        start.elapsed()
    );

    Ok(())
}

fn process_single_file(
    path: &PathBuf,
    parser: &DatasheetParser,
    args: &BatchArgs,
) -> anyhow::Result<ExtractionResult> {
    let data = fs::read(path)?;
    let text = convert_to_text(&data)?;
    let result = parser.extract_modules(&text);

    if let Some(ref output_dir) = args.output_dir {
        let extension = match args.format {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        };
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("datasheet");
        let out_path = output_dir.join(format!("{}.{}", stem, extension));
        fs::write(&out_path, format_result(&result, args.format, false)?)?;
    }

    Ok(result)
}

fn write_summary(results: &[FileResult], output_dir: Option<&std::path::Path>) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["file", "modules", "strategy", "mentions_bifacial", "error"])?;

    for result in results {
        let (modules, strategy, bifacial) = match &result.extraction {
            Some(e) => (
                e.modules.len().to_string(),
                e.strategy.clone().unwrap_or_default(),
                e.mentions_bifacial.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writer.write_record([
            result.path.display().to_string(),
            modules,
            strategy,
            bifacial,
            result.error.clone().unwrap_or_default(),
        ])?;
    }

    let summary = String::from_utf8(writer.into_inner()?)?;

    if let Some(dir) = output_dir {
        let path = dir.join("summary.csv");
        fs::write(&path, summary)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            path.display()
        );
    } else {
        println!("{}", summary);
    }

    Ok(())
}
