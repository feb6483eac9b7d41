use crate::core::models::snapshot::{ReferenceStructure, Snapshot};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::error::EngineError;

/// Source files carry Ångström coordinates; fluctuation tables are reported
/// in nanometers.
const ANGSTROMS_PER_NANOMETER: f64 = 10.0;

/// Reported fluctuation values are fixed to 4 decimal places.
fn round_to_report_precision(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Computes the root-mean-square fluctuation of every atom around the
/// reference structure.
///
/// For each atom index the squared Euclidean distance to the reference
/// coordinate is averaged over all snapshots; the square root of that mean,
/// converted to nanometers and rounded to 4 decimal places, is the table
/// entry. Atoms are independent, so the per-atom accumulation runs in
/// parallel across the atom axis.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] for zero snapshots and
/// [`EngineError::ShapeMismatch`] if any snapshot's atom count differs from
/// the reference structure's length.
pub fn compute(
    snapshots: &[Snapshot],
    reference: &ReferenceStructure,
) -> Result<Vec<f64>, EngineError> {
    if snapshots.is_empty() {
        return Err(EngineError::EmptyInput("no snapshots to measure".into()));
    }
    let atom_count = reference.len();
    for (index, snapshot) in snapshots.iter().enumerate() {
        if snapshot.atom_count() != atom_count {
            return Err(EngineError::ShapeMismatch {
                frame: format!("frame {}", index + 1),
                expected: atom_count,
                found: snapshot.atom_count(),
            });
        }
    }

    let frame_count = snapshots.len() as f64;
    let table = (0..atom_count)
        .into_par_iter()
        .map(|atom| {
            let sum_sq: f64 = snapshots
                .iter()
                .map(|snapshot| (snapshot.coordinates()[atom] - reference[atom]).norm_squared())
                .sum();
            round_to_report_precision((sum_sq / frame_count).sqrt() / ANGSTROMS_PER_NANOMETER)
        })
        .collect();
    Ok(table)
}

/// Single-pass streaming alternative to [`build`](super::reference::build)
/// followed by [`compute`].
///
/// Folds one snapshot at a time into a per-coordinate online mean and sum of
/// squared deviations (Welford's algorithm), so no snapshot has to be retained
/// after its contribution and every frame file needs to be parsed exactly
/// once. [`finalize`](FluctuationAccumulator::finalize) yields the reference
/// structure together with the fluctuation table; the numbers match the
/// two-pass form within floating-point tolerance.
#[derive(Debug, Default)]
pub struct FluctuationAccumulator {
    mean: Vec<Vector3<f64>>,
    m2: Vec<Vector3<f64>>,
    frames: usize,
}

impl FluctuationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots folded in so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Atom count fixed by the first snapshot, or 0 before any push.
    pub fn atom_count(&self) -> usize {
        self.mean.len()
    }

    /// Folds one snapshot into the running accumulation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] if the snapshot's atom count
    /// differs from the first pushed snapshot's.
    pub fn push(&mut self, snapshot: &Snapshot) -> Result<(), EngineError> {
        if self.frames == 0 {
            self.mean = vec![Vector3::zeros(); snapshot.atom_count()];
            self.m2 = vec![Vector3::zeros(); snapshot.atom_count()];
        } else if snapshot.atom_count() != self.atom_count() {
            return Err(EngineError::ShapeMismatch {
                frame: format!("frame {}", self.frames + 1),
                expected: self.atom_count(),
                found: snapshot.atom_count(),
            });
        }

        self.frames += 1;
        let n = self.frames as f64;
        for (atom, coordinate) in snapshot.iter().enumerate() {
            let mean = &mut self.mean[atom];
            let delta = coordinate.coords - *mean;
            *mean += delta / n;
            let delta2 = coordinate.coords - *mean;
            self.m2[atom] += delta.component_mul(&delta2);
        }
        Ok(())
    }

    /// Consumes the accumulator, yielding the mean reference structure and
    /// the fluctuation table in nanometers, rounded to 4 decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyInput`] if no snapshot was pushed.
    pub fn finalize(self) -> Result<(ReferenceStructure, Vec<f64>), EngineError> {
        if self.frames == 0 {
            return Err(EngineError::EmptyInput("no snapshots accumulated".into()));
        }
        let n = self.frames as f64;
        let reference = self.mean.into_iter().map(Point3::from).collect();
        let fluctuation = self
            .m2
            .into_iter()
            .map(|m2| {
                round_to_report_precision((m2.sum() / n).sqrt() / ANGSTROMS_PER_NANOMETER)
            })
            .collect();
        Ok((reference, fluctuation))
    }
}
