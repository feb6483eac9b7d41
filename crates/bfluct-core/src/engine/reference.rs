use crate::core::models::snapshot::{ReferenceStructure, Snapshot};
use nalgebra::{Point3, Vector3};

use super::error::EngineError;

/// Builds the reference structure: the arithmetic mean, over all snapshots,
/// of each atom's coordinate.
///
/// The accumulated coordinate-wise sum is divided by the exact snapshot count
/// (a true mean, not a variance denominator). Snapshots may arrive in any
/// order; summation is commutative up to floating-point rounding.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] for zero snapshots and
/// [`EngineError::ShapeMismatch`] as soon as a snapshot's atom count differs
/// from the first snapshot's.
pub fn build(snapshots: &[Snapshot]) -> Result<ReferenceStructure, EngineError> {
    let first = snapshots
        .first()
        .ok_or_else(|| EngineError::EmptyInput("no snapshots to average".into()))?;
    let atom_count = first.atom_count();
    let mut sums = vec![Vector3::zeros(); atom_count];

    for (index, snapshot) in snapshots.iter().enumerate() {
        if snapshot.atom_count() != atom_count {
            return Err(EngineError::ShapeMismatch {
                frame: format!("frame {}", index + 1),
                expected: atom_count,
                found: snapshot.atom_count(),
            });
        }
        for (sum, coordinate) in sums.iter_mut().zip(snapshot.iter()) {
            *sum += coordinate.coords;
        }
    }

    let count = snapshots.len() as f64;
    Ok(sums.into_iter().map(|sum| Point3::from(sum / count)).collect())
}
