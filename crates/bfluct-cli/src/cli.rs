use clap::{Args, Parser, Subcommand};
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
    about = "bfluct - Computes per-residue RMS fluctuation from a molecular dynamics trajectory and estimates crystallographic B-factors for comparison against an annotated structure.",
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
    /// Compute the RMSF and B-factor estimate for a trajectory.
    Run(RunArgs),
    /// Only extract per-frame snapshots from a compressed trajectory.
    Extract(ExtractArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the compressed trajectory file (e.g., traj.xtc).
    /// Requires --topology; mutually exclusive with --frames-dir.
    #[arg(
        short = 'f',
        long,
        value_name = "PATH",
        requires = "topology",
        conflicts_with = "frames_dir"
    )]
    pub trajectory: Option<PathBuf>,

    /// Path to the run-input topology file (e.g., topol.tpr).
    #[arg(short = 's', long, value_name = "PATH", requires = "trajectory")]
    pub topology: Option<PathBuf>,

    /// Directory of pre-extracted snapshot files, one .pdb per frame.
    #[arg(short = 'p', long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,

    /// Experimentally annotated structure (.pdb) for B-factor comparison.
    #[arg(short = 'r', long, value_name = "PATH")]
    pub reference_pdb: Option<PathBuf>,

    /// Destination directory for results.
    /// Defaults to the first free Results_<N> in the working directory.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the configuration file in TOML format.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip SVG figure generation, writing only the xvg tables.
    #[arg(long)]
    pub no_figures: bool,

    #[command(flatten)]
    pub frame_cleanup: FrameCleanup,
}

/// A group to handle mutually exclusive flags for cleaning up generated snapshots.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct FrameCleanup {
    /// Delete extraction-generated snapshots without prompting.
    #[arg(long)]
    pub delete_frames: bool,
    /// Keep extraction-generated snapshots without prompting.
    #[arg(long)]
    pub keep_frames: bool,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the compressed trajectory file (e.g., traj.xtc).
    #[arg(short = 'f', long, required = true, value_name = "PATH")]
    pub trajectory: PathBuf,

    /// Path to the run-input topology file (e.g., topol.tpr).
    #[arg(short = 's', long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Directory to write one snapshot file per frame into.
    #[arg(short = 'o', long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to the configuration file in TOML format.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
