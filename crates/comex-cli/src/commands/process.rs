//! Process command - extract data from an order's files and generate its
//! documents.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use comex_core::assembly::{download_listing, AssembledDocument, DocumentAssembler};
use comex_core::confidence;
use comex_core::models::config::ExtractionProfile;
use comex_core::sample::sample_extracted_data;
use comex_core::{DocumentProcessor, ExtractedData, ProcessingResult, UploadedFile};

use super::Context;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Client identifier
    client_id: String,

    /// Order identifier
    order_id: String,

    /// Input files or glob patterns
    inputs: Vec<String>,

    /// Use the built-in sample extraction instead of reading files
    #[arg(long, conflicts_with = "inputs")]
    sample: bool,

    /// Rule set for PDF text (overrides the config file)
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Skip failing files instead of aborting the batch
    #[arg(long)]
    isolate_failures: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Report missing or malformed fields
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ProfileArg {
    Generic,
    Shipping,
}

impl From<ProfileArg> for ExtractionProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Generic => ExtractionProfile::Generic,
            ProfileArg::Shipping => ExtractionProfile::Shipping,
        }
    }
}

/// Everything one processing run produced.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessReport<'a> {
    order_number: &'a str,
    result: &'a ProcessingResult,
    documents: &'a [AssembledDocument],
    downloads: Vec<String>,
}

pub async fn run(args: ProcessArgs, mut ctx: Context) -> anyhow::Result<()> {
    let start = Instant::now();

    let client = ctx
        .store
        .get_client(&args.client_id)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", args.client_id))?
        .clone();
    if client.order(&args.order_id).is_none() {
        anyhow::bail!(
            "Order {} not found for client {}",
            args.order_id,
            args.client_id
        );
    }

    let mut extraction = ctx.config.extraction.clone();
    if let Some(profile) = args.profile {
        extraction.profile = profile.into();
    }
    extraction.isolate_failures |= args.isolate_failures;

    let (files, result) = if args.sample {
        info!("Using sample extraction");
        (Vec::new(), sample_result(start))
    } else {
        let files = read_inputs(&args.inputs)?;
        let processor = DocumentProcessor::new(&extraction);
        let result = processor.process_documents(&files).await;
        (files, result)
    };

    if !result.success {
        for error in &result.errors {
            eprintln!("{} {}", style("✗").red(), error);
        }
        anyhow::bail!("Processing failed, order left unchanged");
    }
    for error in &result.errors {
        warn!("{}", error);
        eprintln!("{} Skipped {}", style("!").yellow(), error);
    }

    if args.validate {
        let report = result.extracted_data.validate();
        if !report.is_valid {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &report.errors {
                eprintln!("  - {}", issue);
            }
        }
    }

    let assembler = DocumentAssembler::new(ctx.config.assembly.clone());
    let documents = assembler.assemble(&client, &result.extracted_data, result.confidence);

    let order = ctx.store.apply_processing(
        &args.client_id,
        &args.order_id,
        &files,
        &result,
        &documents,
    )?;
    ctx.save()?;

    let report = ProcessReport {
        order_number: &order.number,
        result: &result,
        documents: &documents,
        downloads: download_listing(&documents, &order),
    };
    let output = format_report(&report, args.format)?;

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

fn sample_result(start: Instant) -> ProcessingResult {
    let data = sample_extracted_data();
    ProcessingResult {
        success: true,
        confidence: confidence::score(&data),
        extracted_data: data,
        errors: Vec::new(),
        processing_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

/// Expand glob patterns and read every matching file.
fn read_inputs(inputs: &[String]) -> anyhow::Result<Vec<UploadedFile>> {
    let mut paths = Vec::new();
    for input in inputs {
        let matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
        if matched.is_empty() {
            anyhow::bail!("No files match {}", input);
        }
        paths.extend(matched);
    }

    if paths.is_empty() {
        anyhow::bail!("No input files given. Pass files or use --sample.");
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        pb.set_message(path.display().to_string());
        files.push(UploadedFile::from_path(path)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Read {} files", files.len());
    Ok(files)
}

fn format_report(report: &ProcessReport<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(&report.result.extracted_data),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(data: &ExtractedData) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["field", "value"])?;

    for (key, value) in data.text_fields() {
        if let Some(value) = value {
            wtr.write_record([key, value.as_str()])?;
        }
    }
    for product in data.products.iter().flatten() {
        let line = product_line(product);
        wtr.write_record(["product", line.as_str()])?;
    }
    for standard in data.standards_compliance.iter().flatten() {
        wtr.write_record(["standardsCompliance", standard.as_str()])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn product_line(product: &comex_core::ProductInfo) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        product.description, product.quantity, product.weight, product.unit_price, product.total
    )
}

fn format_text(report: &ProcessReport<'_>) -> String {
    let data = &report.result.extracted_data;
    let mut output = String::new();

    output.push_str(&format!("Order: {}\n", report.order_number));
    output.push_str(&format!(
        "Confidence: {:.1}% ({} ms)\n\n",
        report.result.confidence, report.result.processing_time_ms
    ));

    output.push_str("Extracted fields:\n");
    for (key, value) in data.text_fields() {
        if let Some(value) = value {
            output.push_str(&format!("  {:<20} {}\n", key, value));
        }
    }
    for product in data.products.iter().flatten() {
        output.push_str(&format!("  {:<20} {}\n", "product", product_line(product)));
    }

    output.push_str("\nDocuments:\n");
    for (doc, file) in report.documents.iter().zip(&report.downloads) {
        output.push_str(&format!(
            "  {:<22} {:>5.1}%  {}\n",
            doc.name, doc.confidence, file
        ));
    }

    output
}
