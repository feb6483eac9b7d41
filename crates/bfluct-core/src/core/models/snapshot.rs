use nalgebra::Point3;

/// Represents one structural sample of a trajectory at a point in simulated time.
///
/// A snapshot is an ordered sequence of atom coordinates, one per atom index,
/// in the order the atoms appear in the source file. The same index refers to
/// the same physical atom in every snapshot of a trajectory; the pipeline
/// trusts this ordering and never reorders or matches atoms by label.
///
/// Snapshots are immutable once built. After a snapshot's contribution has been
/// folded into a running accumulation it does not need to be retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    coordinates: Vec<Point3<f64>>,
}

/// The arithmetic mean, over all snapshots of a trajectory, of each atom's
/// coordinate, in the same order and length as any single snapshot.
pub type ReferenceStructure = Vec<Point3<f64>>;

impl Snapshot {
    /// Creates a snapshot from coordinates in file order.
    pub fn new(coordinates: Vec<Point3<f64>>) -> Self {
        Self { coordinates }
    }

    /// The number of atoms in this snapshot.
    pub fn atom_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The coordinates in file order.
    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.coordinates.iter()
    }
}

impl From<Vec<Point3<f64>>> for Snapshot {
    fn from(coordinates: Vec<Point3<f64>>) -> Self {
        Self::new(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_coordinate_order() {
        let coords = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(4.0, 5.0, 6.0),
            Point3::new(-1.0, 0.0, 2.5),
        ];
        let snapshot = Snapshot::new(coords.clone());

        assert_eq!(snapshot.atom_count(), 3);
        assert_eq!(snapshot.coordinates(), coords.as_slice());
    }

    #[test]
    fn empty_snapshot_reports_zero_atoms() {
        let snapshot = Snapshot::new(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.atom_count(), 0);
    }
}
