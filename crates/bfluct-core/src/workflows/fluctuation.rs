use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::snapshot::ReferenceStructure;
use crate::engine::bfactor;
use crate::engine::config::FluctuationConfig;
use crate::engine::error::EngineError;
use crate::engine::fluctuation::FluctuationAccumulator;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const SNAPSHOT_EXTENSION: &str = "pdb";

/// The tables produced by one run of the fluctuation pipeline.
///
/// Each table is indexed by atom position. `reference_bfactor` is present only
/// when an annotated structure was supplied; its length is taken from that
/// file and is not reconciled with the computed tables.
#[derive(Debug, Clone, PartialEq)]
pub struct FluctuationResult {
    pub reference: ReferenceStructure,
    pub fluctuation: Vec<f64>,
    pub bfactor: Vec<f64>,
    pub reference_bfactor: Option<Vec<f64>>,
    pub frame_count: usize,
}

/// Runs the complete pipeline over a directory of snapshot files.
///
/// Frames are streamed one at a time through the single-pass accumulator, so
/// each file is parsed exactly once and no snapshot is retained after its
/// contribution. Any parse failure or shape mismatch aborts the whole
/// computation; there is no partial-result mode.
#[instrument(skip_all, name = "fluctuation_workflow")]
pub fn run(
    config: &FluctuationConfig,
    reporter: &ProgressReporter,
) -> Result<FluctuationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Scanning Frames",
    });
    let frame_paths = collect_frame_paths(&config.frames_dir)?;
    info!(
        frames = frame_paths.len(),
        dir = %config.frames_dir.display(),
        "Discovered snapshot files."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Accumulating Fluctuations",
    });
    reporter.report(Progress::FrameCount {
        total: frame_paths.len() as u64,
    });

    let mut accumulator = FluctuationAccumulator::new();
    for path in &frame_paths {
        let snapshot = PdbFile::read_from_path(path).map_err(|source| EngineError::Snapshot {
            path: path.clone(),
            source,
        })?;
        accumulator
            .push(&snapshot)
            .map_err(|error| name_offending_file(error, path))?;
        reporter.report(Progress::FrameDone);
    }
    let frame_count = accumulator.frames();
    let (reference, fluctuation) = accumulator.finalize()?;
    reporter.report(Progress::PhaseFinish);

    let bfactor = bfactor::convert_table(&fluctuation);

    let reference_bfactor = match &config.reference_pdb {
        Some(path) => {
            reporter.report(Progress::PhaseStart {
                name: "Reading Reference B-Factors",
            });
            let table = PdbFile::read_alpha_carbon_bfactors_from_path(path).map_err(|source| {
                EngineError::Reference {
                    path: path.clone(),
                    source,
                }
            })?;
            info!(entries = table.len(), "Extracted reference B-factors.");
            reporter.report(Progress::PhaseFinish);
            Some(table)
        }
        None => None,
    };

    info!(
        atoms = fluctuation.len(),
        frames = frame_count,
        "Fluctuation workflow complete."
    );
    Ok(FluctuationResult {
        reference,
        fluctuation,
        bfactor,
        reference_bfactor,
        frame_count,
    })
}

/// Enumerates the snapshot files of a frames directory, sorted by file name.
///
/// The aggregates are order-invariant; sorting only stabilises progress
/// output and error attribution across platforms.
fn collect_frame_paths(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(EngineError::EmptyInput(format!(
            "no snapshot files found in '{}'",
            dir.display()
        )));
    }
    Ok(paths)
}

fn name_offending_file(error: EngineError, path: &Path) -> EngineError {
    match error {
        EngineError::ShapeMismatch {
            expected, found, ..
        } => EngineError::ShapeMismatch {
            frame: format!("'{}'", path.display()),
            expected,
            found,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn atom_line(serial: usize, x: f64, y: f64, z: f64, bfactor: f64) -> String {
        format!(
            "ATOM  {serial:>5} CA   GLY A{serial:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{occupancy:>6.2}{bfactor:>6.2}",
            occupancy = 1.0,
        )
    }

    fn write_frame(dir: &Path, name: &str, atoms: &[(f64, f64, f64)]) {
        let mut content = String::new();
        for (i, &(x, y, z)) in atoms.iter().enumerate() {
            content.push_str(&atom_line(i + 1, x, y, z, 0.0));
            content.push('\n');
        }
        content.push_str("END\n");
        fs::write(dir.join(name), content).unwrap();
    }

    fn two_atom_fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame0.pdb", &[(0.0, 0.0, 0.0), (5.0, 5.0, 5.0)]);
        write_frame(dir.path(), "frame1.pdb", &[(1.0, 0.0, 0.0), (5.0, 5.0, 5.0)]);
        write_frame(dir.path(), "frame2.pdb", &[(-1.0, 0.0, 0.0), (5.0, 5.0, 5.0)]);
        dir
    }

    #[test]
    fn end_to_end_three_frames_of_two_atoms() {
        let dir = two_atom_fixture();
        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.frame_count, 3);
        assert!((result.reference[0] - nalgebra::Point3::new(0.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((result.reference[1] - nalgebra::Point3::new(5.0, 5.0, 5.0)).norm() < 1e-9);
        assert_eq!(result.fluctuation, vec![0.0816, 0.0]);
        assert_eq!(result.bfactor[1], 0.0);
        assert!(result.bfactor[0] > 0.0);
        assert!(result.reference_bfactor.is_none());
    }

    #[test]
    fn reference_pdb_contributes_the_comparison_table() {
        let dir = two_atom_fixture();
        let reference_path = dir.path().join("annotated.ref");
        fs::write(
            &reference_path,
            format!(
                "{}\n{}\n",
                atom_line(1, 0.0, 0.0, 0.0, 12.34),
                atom_line(2, 5.0, 5.0, 5.0, 56.78),
            ),
        )
        .unwrap();

        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .reference_pdb(&reference_path)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.reference_bfactor, Some(vec![12.34, 56.78]));
    }

    #[test]
    fn empty_directory_is_an_empty_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::EmptyInput(_))));
    }

    #[test]
    fn mismatched_frame_is_reported_with_its_file_name() {
        let dir = two_atom_fixture();
        write_frame(dir.path(), "frame3.pdb", &[(0.0, 0.0, 0.0)]);

        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();
        match run(&config, &ProgressReporter::new()) {
            Err(EngineError::ShapeMismatch {
                frame,
                expected,
                found,
            }) => {
                assert!(frame.contains("frame3.pdb"));
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn malformed_frame_names_the_offending_file() {
        let dir = two_atom_fixture();
        fs::write(
            dir.path().join("frame1.pdb"),
            "ATOM      1 CA   GLY A   1      banana   0.000   0.000  1.00  0.00\n",
        )
        .unwrap();

        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();
        match run(&config, &ProgressReporter::new()) {
            Err(EngineError::Snapshot { path, .. }) => {
                assert!(path.to_string_lossy().ends_with("frame1.pdb"));
            }
            other => panic!("expected Snapshot error, got {:?}", other.err()),
        }
    }

    #[test]
    fn non_snapshot_files_in_the_directory_are_ignored() {
        let dir = two_atom_fixture();
        fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();

        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.frame_count, 3);
    }

    #[test]
    fn progress_ticks_once_per_frame() {
        let dir = two_atom_fixture();
        let config = FluctuationConfig::builder()
            .frames_dir(dir.path())
            .build()
            .unwrap();

        let ticks = Mutex::new(0u64);
        let total = Mutex::new(0u64);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::FrameDone => *ticks.lock().unwrap() += 1,
            Progress::FrameCount { total: t } => *total.lock().unwrap() = t,
            _ => {}
        }));
        run(&config, &reporter).unwrap();

        assert_eq!(*ticks.lock().unwrap(), 3);
        assert_eq!(*total.lock().unwrap(), 3);
    }
}
