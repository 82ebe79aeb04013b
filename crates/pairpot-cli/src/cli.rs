use crate::utils::parser::{parse_period, parse_supercell};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pairpot::core::forcefield::pair_pot::ElectrostaticMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pairpot CLI - non-bonded pair energies, potential tables and hills-sum free-energy surfaces.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the non-bonded energy of a system.
    Energy(EnergyArgs),
    /// Tabulate every type-pair interaction and write one CSV file per pair.
    Table(TableArgs),
    /// Reconstruct a free-energy surface from metadynamics hills.
    Fes(FesArgs),
}

/// Input shared by the commands that assemble a force field.
#[derive(Args, Debug)]
pub struct SystemArgs {
    /// Path to the system file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub system: PathBuf,

    /// Path to the force-field parameter file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub params: PathBuf,

    /// Replicate a periodic system before evaluation, e.g. '2x2x2'.
    #[arg(long, value_name = "AxBxC", value_parser = parse_supercell)]
    pub supercell: Option<[usize; 3]>,

    /// Which electrostatic contributions to evaluate.
    #[arg(long, value_enum, default_value_t = EiMode::Full)]
    pub ei_mode: EiMode,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EiMode {
    /// Screened point charges plus the Gaussian smearing correction.
    Full,
    /// Screened point charges only.
    PointOnly,
    /// Only the Gaussian smearing correction.
    Correction,
}

impl From<EiMode> for ElectrostaticMode {
    fn from(mode: EiMode) -> Self {
        match mode {
            EiMode::Full => ElectrostaticMode::Full,
            EiMode::PointOnly => ElectrostaticMode::PointOnly,
            EiMode::Correction => ElectrostaticMode::SmearingCorrection,
        }
    }
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    #[command(flatten)]
    pub input: SystemArgs,

    /// Also compute the gradient and report its norm.
    #[arg(short, long)]
    pub gradient: bool,
}

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: SystemArgs,

    /// Directory that receives one CSV file per type pair.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Smallest tabulated distance in angstrom.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.5)]
    pub rmin: f64,

    /// Largest tabulated distance in angstrom. Defaults to the largest cutoff of the
    /// tabulated parts.
    #[arg(long, value_name = "FLOAT")]
    pub rmax: Option<f64>,

    /// Number of rows per table.
    #[arg(short, long, value_name = "INT", default_value_t = 2500)]
    pub nrows: usize,
}

/// Arguments for the `fes` subcommand.
#[derive(Args, Debug)]
pub struct FesArgs {
    /// CSV file with columns 'height', 'q0_<k>' and 'sigma_<k>'.
    #[arg(long, required = true, value_name = "PATH")]
    pub hills: PathBuf,

    /// CSV file with a header row and one column per collective variable.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub grid: PathBuf,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Mark collective variable K as periodic with the given period.
    /// Can be used multiple times. Example: --period 0=6.283185
    #[arg(long = "period", value_name = "K=PERIOD", value_parser = parse_period)]
    pub periods: Vec<(usize, f64)>,
}
