use clap::{Args, Parser, Subcommand};
use pdbkit::core::models::document::Section;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pdbkit - Read, normalize and write Protein Data Bank coordinate files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a PDB file and write it back with strictly formatted coordinate records.
    Convert(ConvertArgs),
    /// Build a PDB file from CSV rows of ATOM, HETATM and TER records.
    Tabular(TabularArgs),
    /// Print per-section line counts and record counts of a PDB file.
    Inspect(InspectArgs),
    /// Rename HIS/ASP/GLU by protonation state and OCT terminal oxygens.
    Clean(CleanArgs),
}

/// Read-side policy overrides shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ReadPolicyArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail on unrecognized lines and malformed hydrogen names instead of skipping them.
    #[arg(long)]
    pub strict: bool,

    /// Also file SHEET and TURN records under the secondary-structure section.
    #[arg(long)]
    pub full_secondary: bool,

    /// Fail on four-character atom names that do not follow the hydrogen pattern.
    #[arg(long)]
    pub strict_names: bool,
}

/// Write-side policy overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct WritePolicyArgs {
    /// Copy a section verbatim into the output (e.g. 'title', 'crystallographic').
    /// Can be used multiple times.
    #[arg(long = "keep", value_name = "SECTION")]
    pub keep: Vec<Section>,

    /// Write MODEL and ENDMDL records instead of merging all models.
    #[arg(long)]
    pub keep_models: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub read: ReadPolicyArgs,

    #[command(flatten)]
    pub write: WritePolicyArgs,
}

/// Arguments for the `tabular` subcommand.
#[derive(Args, Debug)]
pub struct TabularArgs {
    /// Path to the input CSV file (no header row).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub read: ReadPolicyArgs,

    #[command(flatten)]
    pub write: WritePolicyArgs,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output PDB file.
    #[arg(short, long, default_value = "new.pdb", value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub read: ReadPolicyArgs,

    #[command(flatten)]
    pub write: WritePolicyArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the PDB file to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadPolicyArgs,
}
