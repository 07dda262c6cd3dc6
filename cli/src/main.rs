//! eobscan CLI - EOB field extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use eobscan::pipeline::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_PAGES_DIR};
use eobscan::render::to_json;
use eobscan::{
    extract_response_file, DocumentAnalyzer, JsonFormat, Pipeline, PipelineEvent,
    PipelineOptions, Record, ResponseFileAnalyzer, TextractAnalyzer,
};

#[derive(Parser)]
#[command(name = "eobscan")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract payment and patient fields from EOB PDFs", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Input PDF file
    #[arg(value_name = "FILE", env = "EOBSCAN_INPUT")]
    input: Option<PathBuf>,

    /// Directory for single-page PDFs (cleared on every run)
    #[arg(long, value_name = "DIR", env = "EOBSCAN_PAGES_DIR", default_value = DEFAULT_PAGES_DIR)]
    pages_dir: PathBuf,

    /// Output JSON file
    #[arg(short, long, value_name = "FILE", env = "EOBSCAN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Replay saved analysis responses from DIR instead of calling Textract
    #[arg(long, value_name = "DIR", env = "EOBSCAN_RESPONSES")]
    responses: Option<PathBuf>,

    /// AWS region for Textract
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Analyze pages concurrently
    #[arg(long)]
    parallel: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, analyze and merge a PDF (the default)
    Run(RunArgs),

    /// Split a PDF into single-page files only
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Directory for single-page PDFs (cleared first)
        #[arg(long, value_name = "DIR", default_value = DEFAULT_PAGES_DIR)]
        pages_dir: PathBuf,
    },

    /// Extract fields from one saved analysis response (JSON)
    Parse {
        /// Saved response file
        #[arg(value_name = "FILE")]
        response: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Split { input, pages_dir }) => cmd_split(&input, &pages_dir),
        Some(Commands::Parse {
            response,
            output,
            compact,
        }) => cmd_parse(&response, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&cli.run),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn build_analyzer(args: &RunArgs) -> Result<Arc<dyn DocumentAnalyzer>, Box<dyn std::error::Error>> {
    if let Some(ref dir) = args.responses {
        return Ok(Arc::new(ResponseFileAnalyzer::new(dir)));
    }

    let analyzer = match args.region {
        Some(ref region) => TextractAnalyzer::with_region(region)?,
        None => TextractAnalyzer::new()?,
    };
    Ok(Arc::new(analyzer))
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    let options = PipelineOptions::new()
        .with_input(&input)
        .with_pages_dir(&args.pages_dir)
        .with_output(&args.output)
        .with_parallel(args.parallel)
        .with_json_format(json_format(args.compact));

    let pipeline = Pipeline::new(build_analyzer(args)?, options)?;

    println!(
        "{} {} ({})",
        "Extracting".cyan().bold(),
        input.display(),
        pipeline.analyzer_name()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let record = pipeline.run_with_progress(|event| match event {
        PipelineEvent::WorkspaceReset { dir } => {
            pb.set_message(format!("Preparing {}", dir.display()));
        }
        PipelineEvent::Split { pages } => {
            pb.set_length(pages as u64);
            pb.set_message("Analyzing pages...");
        }
        PipelineEvent::PageAnalyzed { page, total, record } => {
            pb.inc(1);
            log::debug!("Page {}/{}: {} fields", page, total, record.filled_count());
        }
        PipelineEvent::Merged { .. } => pb.set_message("Merging..."),
        PipelineEvent::Saved { .. } => pb.finish_with_message("Done!"),
    });

    let record = match record {
        Ok(record) => record,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    print_record(&record);
    println!("\n{} {}", "Saved to".green(), args.output.display());

    Ok(())
}

fn cmd_split(input: &Path, pages_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eobscan::reset_workspace(pages_dir)?;
    let pages = eobscan::split_pdf(input, pages_dir)?;

    let last = pages.len().saturating_sub(1);
    for (i, page) in pages.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), page.display());
    }
    println!("\n{} {} pages written", "Done!".green().bold(), pages.len());

    Ok(())
}

fn cmd_parse(
    response: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = extract_response_file(response)?;
    let json = to_json(&record, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_record(record: &Record) {
    println!("\n{}", "Extraction Result".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (field, value) in record.iter() {
        match value {
            Some(value) => println!("{}: {}", field.name().bold(), value),
            None => println!("{}: {}", field.name().bold(), "null".dimmed()),
        }
    }
}

fn cmd_version() {
    println!("{} {}", "eobscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("EOB field extraction tool");
    println!();
    println!("License: MIT");
}
