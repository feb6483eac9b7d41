use crate::cli::ExtractArgs;
use crate::config::{AppSettings, FileConfig};
use crate::error::Result;
use crate::extraction::{self, ExtractionRequest};
use crate::utils::path::ensure_extension;
use tracing::info;

pub fn run(args: ExtractArgs) -> Result<()> {
    ensure_extension(&args.trajectory, "xtc")?;
    ensure_extension(&args.topology, "tpr")?;

    let file_config = args
        .config
        .as_deref()
        .map(FileConfig::from_file)
        .transpose()?;
    let settings = AppSettings::resolve(false, file_config);

    println!("Extracting per-frame snapshots...");
    let frames = extraction::extract_frames(&ExtractionRequest {
        trajectory: &args.trajectory,
        topology: &args.topology,
        output_dir: &args.output_dir,
        command: &settings.extraction_command,
        group: &settings.extraction_group,
    })?;
    info!(frames, "Extraction complete.");

    println!(
        "✓ Extracted {} snapshot(s) to: {}",
        frames,
        args.output_dir.display()
    );
    Ok(())
}
