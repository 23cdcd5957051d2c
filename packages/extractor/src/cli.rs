//! Command-line interface for the extractor.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::assembler::extract_document;
use crate::config::ExtractorConfig;
use crate::error::{DocumentError, Result};
use crate::export::{file_timestamp, save_extraction, ExportFormat};
use crate::reader::{parse_document, read_document_source};
use crate::report::CollectingReporter;
use crate::selection::{discover_schedules, ScheduleSelection, ScheduleSummary};

/// UKSI Extractor - Flatten UK statutory instrument XML into provision records.
#[derive(Parser)]
#[command(name = "uksi-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract provision records from a legislation.gov.uk XML file.
    Extract {
        /// Path to the XML document
        file: PathBuf,

        #[command(flatten)]
        schedules: ScheduleArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,

        /// Output directory (default: extracted/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Authority for canonical links (default: https://www.legislation.gov.uk)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List the schedules of a legislation.gov.uk XML file.
    Schedules {
        /// Path to the XML document
        file: PathBuf,
    },
}

/// How the schedule selection is obtained. Without a flag the user is
/// asked about each schedule.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct ScheduleArgs {
    /// Extract every schedule without asking
    #[arg(long)]
    pub all_schedules: bool,

    /// Extract the body only
    #[arg(long)]
    pub no_schedules: bool,

    /// Read the schedule selection from a YAML file
    #[arg(long, value_name = "FILE")]
    pub selection: Option<PathBuf>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            schedules,
            format,
            output,
            base_url,
        } => extract_command(
            &file,
            &schedules,
            format,
            output.as_deref(),
            base_url.as_deref(),
        ),
        Commands::Schedules { file } => schedules_command(&file),
    }
}

/// Execute the extract command.
fn extract_command(
    file: &Path,
    schedule_args: &ScheduleArgs,
    format: ExportFormat,
    output: Option<&Path>,
    base_url: Option<&str>,
) -> Result<()> {
    // Validate inputs before reading the document
    let config = match base_url {
        Some(url) => ExtractorConfig::with_base_url(url)?,
        None => ExtractorConfig::default(),
    };

    if let Some(output_dir) = output {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(DocumentError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    let source = read_document_source(file)?;
    let doc = parse_document(&source)?;

    let selection = resolve_selection(schedule_args, &discover_schedules(&doc))?;

    println!(
        "{} {}",
        style("Extracting").bold(),
        style(file.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting provisions...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut reporter = CollectingReporter::new();
    let extraction = match extract_document(&doc, &selection, &config, &mut reporter) {
        Ok(extraction) => extraction,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving...");
    let output_path = match save_extraction(&extraction, format, output, &file_timestamp()) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    println!("  Title: {}", style(&extraction.metadata.title).green());
    println!("  Year/Number: {}", extraction.uid());
    println!("  Body provisions: {}", extraction.body_records().count());
    println!(
        "  Schedule provisions: {}",
        extraction.schedule_records().count()
    );
    if !reporter.events().is_empty() {
        println!("  Skipped: {}", reporter.events().len());
    }

    let warnings: Vec<_> = reporter.warnings().collect();
    if !warnings.is_empty() {
        println!("  Warnings: {}", style(warnings.len()).yellow().bold());
        for warning in warnings {
            println!("    {} {warning}", style("-").yellow());
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the schedules command.
fn schedules_command(file: &Path) -> Result<()> {
    let source = read_document_source(file)?;
    let doc = parse_document(&source)?;
    let schedules = discover_schedules(&doc);

    if schedules.is_empty() {
        println!("{}", style("No schedules found").yellow());
        return Ok(());
    }

    println!("{}", style("Schedules:").bold());
    for schedule in &schedules {
        println!(
            "  {} {}",
            style(format!("{:>4}", schedule.number)).cyan(),
            schedule.title
        );
    }

    Ok(())
}

/// Build the schedule selection from the command-line flags, asking the
/// user when no flag was given.
fn resolve_selection(
    args: &ScheduleArgs,
    schedules: &[ScheduleSummary],
) -> Result<ScheduleSelection> {
    if args.all_schedules {
        return Ok(ScheduleSelection::select_all(schedules));
    }
    if args.no_schedules {
        return Ok(ScheduleSelection::new());
    }
    if let Some(path) = &args.selection {
        return ScheduleSelection::load(path);
    }
    if schedules.is_empty() {
        return Ok(ScheduleSelection::new());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt_selection(schedules, &mut stdin.lock(), &mut stdout.lock())
}

/// Ask Y/N for each schedule, repeating the question on invalid answers.
///
/// # Errors
/// Fails when the input ends before every schedule has an answer.
pub fn prompt_selection<R: BufRead, W: Write>(
    schedules: &[ScheduleSummary],
    input: &mut R,
    output: &mut W,
) -> Result<ScheduleSelection> {
    writeln!(output, "{}", style("Schedules found:").bold())?;
    for schedule in schedules {
        writeln!(output, "  Schedule {}: {}", schedule.number, schedule.title)?;
    }
    writeln!(output)?;

    let mut selection = ScheduleSelection::new();
    for schedule in schedules {
        let include = loop {
            write!(
                output,
                "Include Schedule {} ({})? (Y/N): ",
                schedule.number, schedule.title
            )?;
            output.flush()?;

            let mut answer = String::new();
            if input.read_line(&mut answer)? == 0 {
                return Err(DocumentError::InvalidSelection(format!(
                    "input ended before a decision for schedule {}",
                    schedule.number
                )));
            }

            match answer.trim().to_ascii_uppercase().as_str() {
                "Y" | "YES" => break true,
                "N" | "NO" => break false,
                _ => writeln!(output, "Please enter Y or N.")?,
            }
        };
        selection.insert(schedule.number.clone(), include);
    }

    Ok(selection)
}
