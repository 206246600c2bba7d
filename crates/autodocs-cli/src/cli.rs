//! CLI argument definitions.

use std::path::PathBuf;

use autodocs_model::HeightFormat;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "autodocs",
    version,
    about = "Fill brace order forms from a patient spreadsheet",
    long_about = "Fill back brace and knee brace order forms from a patient CSV.\n\n\
                  One Word document is written per patient and matching template;\n\
                  documents can then be converted to PDF with LibreOffice and zipped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values (names, file names) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate documents for every patient in a CSV file.
    Generate(GenerateArgs),

    /// Convert the documents in a folder to PDF.
    Convert(ConvertArgs),

    /// Show how each patient would be classified, without writing files.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Patient data (.csv, or the first sheet of .xlsx/.xls/.ods).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Back brace template (.docx).
    #[arg(long = "back-template", value_name = "PATH")]
    pub back_template: Option<PathBuf>,

    /// Knee brace template (.docx).
    #[arg(long = "knee-template", value_name = "PATH")]
    pub knee_template: Option<PathBuf>,

    /// Output folder (default: settings, then ./generated_docs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How the Height column is written.
    #[arg(long = "height-format", value_enum)]
    pub height_format: Option<HeightFormatArg>,

    /// Skip documents that fail to render instead of stopping.
    #[arg(long = "continue-on-error")]
    pub continue_on_error: bool,

    /// Fail on template placeholders that have no value.
    #[arg(long = "strict-placeholders")]
    pub strict_placeholders: bool,

    /// Remove earlier .docx/.pdf files from the output folder first.
    #[arg(long = "clean")]
    pub clean: bool,

    /// Date written into the forms, DD/MM/YYYY (default: today).
    #[arg(long = "date", value_name = "DD/MM/YYYY")]
    pub date: Option<String>,

    /// Convert the generated documents to PDF.
    #[arg(long = "pdf")]
    pub pdf: bool,

    /// Zip the results (PDFs when converted, documents otherwise).
    #[arg(long = "zip")]
    pub zip: bool,

    /// LibreOffice executable used for --pdf.
    #[arg(long = "converter", value_name = "BIN")]
    pub converter: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Folder containing .docx files.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// LibreOffice executable.
    #[arg(long = "converter", value_name = "BIN")]
    pub converter: Option<PathBuf>,

    /// Zip the PDFs after conversion.
    #[arg(long = "zip")]
    pub zip: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Patient data (.csv, or the first sheet of .xlsx/.xls/.ods).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// How the Height column is written.
    #[arg(long = "height-format", value_enum)]
    pub height_format: Option<HeightFormatArg>,

    /// Date used for the `date` field, DD/MM/YYYY (default: today).
    #[arg(long = "date", value_name = "DD/MM/YYYY")]
    pub date: Option<String>,

    /// Print full contexts as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HeightFormatArg {
    /// Drop a trailing ".0" (5.0 -> 5).
    TrimSuffix,
    /// Print as a decimal number (5 -> 5.0).
    Decimal,
}

impl From<HeightFormatArg> for HeightFormat {
    fn from(value: HeightFormatArg) -> Self {
        match value {
            HeightFormatArg::TrimSuffix => HeightFormat::TrimSuffix,
            HeightFormatArg::Decimal => HeightFormat::Decimal,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
