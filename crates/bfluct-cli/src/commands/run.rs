use crate::cli::RunArgs;
use crate::config::{AppSettings, FileConfig};
use crate::error::{CliError, Result};
use crate::extraction::{self, ExtractionRequest};
use crate::utils::path::{ensure_extension, next_results_dir};
use crate::utils::progress::CliProgressHandler;
use crate::utils::prompt;
use bfluct::core::io::xvg::{self, XvgHeader};
use bfluct::engine::config::FluctuationConfig;
use bfluct::engine::error::EngineError;
use bfluct::engine::progress::ProgressReporter;
use bfluct::report::figures;
use bfluct::workflows::fluctuation::{self, FluctuationResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const RMSF_REPORT: &str = "rmsf_result.xvg";
const BFACTOR_REPORT: &str = "bfactor_result.xvg";
const RMSF_FIGURE: &str = "rmsf.svg";
const BFACTOR_FIGURE: &str = "bfactor_compare.svg";

const RMSF_DECIMALS: usize = 4;
const BFACTOR_DECIMALS: usize = 6;

pub fn run(args: RunArgs) -> Result<()> {
    validate_extensions(&args)?;

    let file_config = args
        .config
        .as_deref()
        .map(FileConfig::from_file)
        .transpose()?;
    let settings = AppSettings::resolve(args.no_figures, file_config);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| next_results_dir(Path::new(".")));
    fs::create_dir_all(&output_dir)?;
    info!("Writing results to {:?}", output_dir);

    let (frames_dir, frames_were_generated) = resolve_frames_dir(&args, &settings, &output_dir)?;

    let mut builder = FluctuationConfig::builder().frames_dir(&frames_dir);
    if let Some(reference) = &args.reference_pdb {
        builder = builder.reference_pdb(reference);
    }
    let config = builder.build().map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting fluctuation analysis...");
    let result = fluctuation::run(&config, &reporter)?;
    info!(
        atoms = result.fluctuation.len(),
        frames = result.frame_count,
        "Analysis finished."
    );

    write_reports(&output_dir, &result, settings.figures)?;

    if frames_were_generated {
        cleanup_generated_frames(&frames_dir, &args)?;
    }

    println!("\nDone! Your results are in: {}", output_dir.display());
    Ok(())
}

fn validate_extensions(args: &RunArgs) -> Result<()> {
    if let Some(trajectory) = &args.trajectory {
        ensure_extension(trajectory, "xtc")?;
    }
    if let Some(topology) = &args.topology {
        ensure_extension(topology, "tpr")?;
    }
    if let Some(reference) = &args.reference_pdb {
        ensure_extension(reference, "pdb")?;
    }
    Ok(())
}

/// Resolves where the snapshot files live, running the extraction
/// collaborator first when a trajectory was supplied. The second element is
/// true when the frames were generated by this invocation and are therefore
/// candidates for cleanup.
fn resolve_frames_dir(
    args: &RunArgs,
    settings: &AppSettings,
    output_dir: &Path,
) -> Result<(PathBuf, bool)> {
    match (&args.frames_dir, &args.trajectory, &args.topology) {
        (Some(dir), _, _) => Ok((dir.clone(), false)),
        (None, Some(trajectory), Some(topology)) => {
            let dir = output_dir.join("frames");
            println!("Extracting per-frame snapshots...");
            let frames = extraction::extract_frames(&ExtractionRequest {
                trajectory,
                topology,
                output_dir: &dir,
                command: &settings.extraction_command,
                group: &settings.extraction_group,
            })?;
            println!("✓ Extracted {} snapshot(s) to: {}", frames, dir.display());
            Ok((dir, true))
        }
        _ => Err(CliError::Argument(
            "either --frames-dir or --trajectory together with --topology is required".into(),
        )),
    }
}

fn write_reports(
    output_dir: &Path,
    result: &FluctuationResult,
    figures_enabled: bool,
) -> Result<()> {
    let rmsf_path = output_dir.join(RMSF_REPORT);
    let rmsf_header = XvgHeader {
        title: "rms fluctuation",
        x_label: "C-alpha atoms",
        y_label: "nm",
    };
    xvg::write_table_to_path(&rmsf_path, &rmsf_header, &result.fluctuation, RMSF_DECIMALS)
        .map_err(|e| CliError::Report {
            path: rmsf_path.clone(),
            source: e.into(),
        })?;
    println!("✓ Fluctuation table written to: {}", rmsf_path.display());

    let bfactor_path = output_dir.join(BFACTOR_REPORT);
    let bfactor_header = XvgHeader {
        title: "B-Factor",
        x_label: "C-alpha atoms",
        y_label: "B-factor",
    };
    xvg::write_table_to_path(&bfactor_path, &bfactor_header, &result.bfactor, BFACTOR_DECIMALS)
        .map_err(|e| CliError::Report {
            path: bfactor_path.clone(),
            source: e.into(),
        })?;
    println!("✓ B-factor table written to: {}", bfactor_path.display());

    if !figures_enabled {
        return Ok(());
    }

    let rmsf_figure = output_dir.join(RMSF_FIGURE);
    figures::plot_fluctuation(&rmsf_figure, &result.fluctuation).map_err(|e| {
        CliError::Report {
            path: rmsf_figure.clone(),
            source: e.into(),
        }
    })?;
    println!("✓ Fluctuation plot written to: {}", rmsf_figure.display());

    if let Some(reference) = &result.reference_bfactor {
        if reference.len() != result.bfactor.len() {
            warn!(
                computed = result.bfactor.len(),
                reference = reference.len(),
                "Computed and reference B-factor tables differ in length; each series is drawn as-is."
            );
        }
        let compare_figure = output_dir.join(BFACTOR_FIGURE);
        figures::plot_bfactor_comparison(&compare_figure, &result.bfactor, reference).map_err(
            |e| CliError::Report {
                path: compare_figure.clone(),
                source: e.into(),
            },
        )?;
        println!(
            "✓ B-factor comparison plot written to: {}",
            compare_figure.display()
        );
    }
    Ok(())
}

fn cleanup_generated_frames(frames_dir: &Path, args: &RunArgs) -> Result<()> {
    let delete = if args.frame_cleanup.delete_frames {
        true
    } else if args.frame_cleanup.keep_frames {
        false
    } else {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        prompt::confirm(
            "Delete the generated snapshots?",
            &mut input,
            &mut output,
        )?
    };

    if delete {
        fs::remove_dir_all(frames_dir)?;
        info!("Removed generated snapshots at {:?}", frames_dir);
    } else {
        info!("Keeping generated snapshots at {:?}", frames_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["bfluct"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Run(args) => args,
            _ => panic!("expected the run subcommand"),
        }
    }

    fn atom_line(serial: usize, x: f64, y: f64, z: f64) -> String {
        format!(
            "ATOM  {serial:>5} CA   GLY A{serial:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{occupancy:>6.2}{bfactor:>6.2}",
            occupancy = 1.0,
            bfactor = 0.0,
        )
    }

    fn write_frames(dir: &Path) {
        for (name, x) in [("frame0.pdb", 0.0), ("frame1.pdb", 1.0), ("frame2.pdb", -1.0)] {
            let content = format!(
                "{}\n{}\nEND\n",
                atom_line(1, x, 0.0, 0.0),
                atom_line(2, 5.0, 5.0, 5.0),
            );
            fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn full_run_writes_tables_and_figures() {
        let workspace = tempfile::tempdir().unwrap();
        let frames = workspace.path().join("frames");
        fs::create_dir(&frames).unwrap();
        write_frames(&frames);
        let output = workspace.path().join("results");

        let args = run_args(&[
            "run",
            "-p",
            frames.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        run(args).unwrap();

        let rmsf = fs::read_to_string(output.join(RMSF_REPORT)).unwrap();
        assert!(rmsf.contains("1\t0.0816"));
        assert!(rmsf.contains("2\t0.0000"));
        assert!(output.join(BFACTOR_REPORT).exists());
        assert!(output.join(RMSF_FIGURE).exists());
        assert!(!output.join(BFACTOR_FIGURE).exists());
    }

    #[test]
    fn no_figures_flag_skips_the_plots() {
        let workspace = tempfile::tempdir().unwrap();
        let frames = workspace.path().join("frames");
        fs::create_dir(&frames).unwrap();
        write_frames(&frames);
        let output = workspace.path().join("results");

        let args = run_args(&[
            "run",
            "-p",
            frames.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--no-figures",
        ]);
        run(args).unwrap();

        assert!(output.join(RMSF_REPORT).exists());
        assert!(!output.join(RMSF_FIGURE).exists());
    }

    #[test]
    fn wrong_trajectory_extension_fails_before_any_work() {
        let args = run_args(&["run", "-f", "traj.trr", "-s", "topol.tpr"]);
        assert!(matches!(run(args), Err(CliError::Argument(_))));
    }

    #[test]
    fn empty_frames_directory_aborts_without_reports() {
        let workspace = tempfile::tempdir().unwrap();
        let frames = workspace.path().join("frames");
        fs::create_dir(&frames).unwrap();
        let output = workspace.path().join("results");

        let args = run_args(&[
            "run",
            "-p",
            frames.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(matches!(
            run(args),
            Err(CliError::Engine(EngineError::EmptyInput(_)))
        ));
        assert!(!output.join(RMSF_REPORT).exists());
    }
}
