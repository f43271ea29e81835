//! unrtf CLI - RTF listing to JSON extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unrtf::{
    convert, detect, BatchEntry, ConversionOutcome, ConvertOptions, JsonFormat, ParseOptions, RtfConverter,
    RtfParser, TrailingRowPolicy,
};

#[derive(Parser)]
#[command(name = "unrtf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract clinical listing tables from RTF to JSON", long_about = None)]
struct Cli {
    /// Input RTF file or directory of RTF files
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Keep pages whose rows do not fit the column headers
    #[arg(long, global = true)]
    lenient: bool,

    /// Treatment of the last row of each table body
    #[arg(long, value_enum, global = true, default_value = "keep-together")]
    trailing_row: TrailingRow,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one RTF file to JSON
    Convert {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert every RTF file in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (default: <DIR>/Output)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the JSON of one RTF file
    Json {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Check that a file has every required control word
    Check {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information
    Info {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TrailingRow {
    /// Leave a last row marked keep-with-next for the footnotes
    KeepTogether,
    /// Always leave the last row for the footnotes
    Always,
    /// Read every row as data
    Never,
}

impl From<TrailingRow> for TrailingRowPolicy {
    fn from(mode: TrailingRow) -> Self {
        match mode {
            TrailingRow::KeepTogether => TrailingRowPolicy::KeepTogether,
            TrailingRow::Always => TrailingRowPolicy::Always,
            TrailingRow::Never => TrailingRowPolicy::Never,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut parse_options = ParseOptions::new().with_trailing_row(cli.trailing_row.into());
    if cli.lenient {
        parse_options = parse_options.lenient();
    }

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            compact,
        }) => cmd_convert(&input, output.as_deref(), compact, parse_options),
        Some(Commands::Batch {
            input,
            output,
            sequential,
        }) => cmd_batch(&input, output.as_deref(), sequential, parse_options),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, parse_options),
        Some(Commands::Check { input }) => cmd_check(&input, parse_options),
        Some(Commands::Info { input }) => cmd_info(&input, parse_options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: a directory is a batch, a file a single conversion
            match cli.input {
                Some(input) if input.is_dir() => {
                    cmd_batch(&input, cli.output.as_deref(), false, parse_options)
                }
                Some(input) => cmd_convert(&input, cli.output.as_deref(), false, parse_options),
                None => {
                    println!("{}", "Usage: unrtf <PATH> [OUTPUT]".yellow());
                    println!("       unrtf --help for more information");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    parse_options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.unwrap_or_else(|| Path::new("."));
    log::debug!("Converting {} into {}", input.display(), output_dir.display());

    let mut options = ConvertOptions::new().with_parse_options(parse_options);
    if compact {
        options = options.compact();
    }

    let outcome = RtfConverter::with_options(options).convert(input, output_dir);
    print_outcome(&input.display().to_string(), &outcome);

    if outcome.is_success() {
        Ok(())
    } else {
        Err(outcome.remark.into())
    }
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    sequential: bool,
    parse_options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.join("Output"));

    let options = ConvertOptions::new()
        .with_parse_options(parse_options)
        .with_parallel(!sequential);
    let converter = RtfConverter::with_options(options);

    let total = convert::list_entries(input, &output_dir)?.len() as u64;
    log::debug!("Batch of {} entries from {}", total, input.display());
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let entries = converter.convert_dir_with(input, &output_dir, |entry| {
        pb.set_message(entry.file_name.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_batch(&entries);

    let converted = entries.iter().filter(|e| e.outcome.is_success()).count();
    println!(
        "\n{} {} of {} files converted into {}",
        "Done!".green().bold(),
        converted,
        entries.len(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    parse_options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = RtfParser::open_with_options(input, parse_options)?.parse()?;
    log::debug!("Parsed {} pages from {}", doc.page_count(), input.display());

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unrtf::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_check(input: &Path, parse_options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let is_rtf = detect::is_rtf_bytes(&data);
    let parser = RtfParser::from_bytes_with_options(&data, parse_options);
    let missing = detect::missing_markers(parser.text(), &parser.options().markers);
    log::debug!(
        "{}: rtf header {}, {} markers missing",
        input.display(),
        is_rtf,
        missing.len()
    );

    if is_rtf && missing.is_empty() {
        println!("{} {}", "Conforms".green().bold(), input.display());
        return Ok(());
    }

    println!("{} {}", "Does not conform".red().bold(), input.display());
    if !is_rtf {
        println!("  {} not an RTF document", "└─".dimmed());
    }
    for marker in &missing {
        println!("  {} missing {}", "└─".dimmed(), marker);
    }
    std::process::exit(1);
}

fn cmd_info(input: &Path, parse_options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so that a bad row does not hide the rest of the document
    let parser = RtfParser::open_with_options(input, parse_options.lenient())?;
    let doc = parser.parse()?;
    log::debug!("Parsed {} pages from {}", doc.page_count(), input.display());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Rows".bold(), doc.row_count());
    println!("{}: {}", "Fonts".bold(), serde_json::to_string(&doc.fonts)?);

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (i, page) in doc.pages.iter().enumerate() {
        let title = page.title.first().map(String::as_str).unwrap_or("");
        println!(
            "{:>4}  {:>5} rows  {:>3} columns  {}",
            i + 1,
            page.row_count(),
            page.column_headers.len(),
            title
        );
        for warning in &page.warnings {
            println!("      {} {}", "└─".dimmed(), warning.yellow());
        }
    }

    Ok(())
}

fn print_outcome(name: &str, outcome: &ConversionOutcome) {
    if outcome.is_success() {
        let output = outcome
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("{} {} -> {}", "Successful".green(), name, output);
    } else {
        println!("{} {}: {}", "Failed".red(), name, outcome.remark);
    }
}

fn print_batch(entries: &[BatchEntry]) {
    let width = entries
        .iter()
        .map(|e| e.file_name.len())
        .max()
        .unwrap_or(0)
        .max("File".len());

    let header = format!("{:<width$}  {:<10}  Remarks", "File", "Status");
    println!("{}", header.bold());
    println!("{}", "─".repeat(width + 24).dimmed());

    for entry in entries {
        let status = format!("{:<10}", entry.outcome.status.to_string());
        let status = if entry.outcome.is_success() {
            status.green()
        } else {
            status.red()
        };
        println!(
            "{:<width$}  {}  {}",
            entry.file_name, status, entry.outcome.remark
        );
    }
}

fn cmd_version() {
    println!("{} {}", "unrtf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("RTF listing extraction tool");
    println!();
    println!("License: MIT");
}
