use crate::core::io::traits::StructureFile;
use crate::core::models::snapshot::Snapshot;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for an ATOM record (coordinates end at column 54)")]
    LineTooShort,
}

// Record name occupies columns 1-6; coordinates and the temperature factor sit
// in the fixed ranges of the standard PDB layout (1-based column numbers).
const ATOM_NAME: (usize, usize) = (12, 16);
const COORD_X: (usize, usize) = (30, 38);
const COORD_Y: (usize, usize) = (38, 46);
const COORD_Z: (usize, usize) = (46, 54);
const TEMP_FACTOR: (usize, usize) = (60, 66);

const ALPHA_CARBON: &str = "CA";

fn slice_and_trim(line: &str, range: (usize, usize)) -> &str {
    line.get(range.0..range.1).unwrap_or("").trim()
}

fn parse_float(line: &str, line_num: usize, range: (usize, usize)) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, range);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", range.0 + 1, range.1),
            value: value.into(),
        },
    })
}

fn is_atom_record(line: &str) -> bool {
    slice_and_trim(line, (0, 6)) == "ATOM"
}

/// Reader for structure snapshots in the fixed-column PDB format.
///
/// Only `ATOM` records contribute; headers, footers, `HETATM` and connectivity
/// records are ignored. Atoms are returned in file order, without reordering,
/// filtering, or deduplication.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Output = Snapshot;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Snapshot, PdbError> {
        let mut coordinates = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if !is_atom_record(&line) {
                continue;
            }
            if line.len() < COORD_Z.1 {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let x = parse_float(&line, line_num, COORD_X)?;
            let y = parse_float(&line, line_num, COORD_Y)?;
            let z = parse_float(&line, line_num, COORD_Z)?;
            coordinates.push(Point3::new(x, y, z));
        }

        if coordinates.is_empty() {
            return Err(PdbError::MissingRecord("ATOM records".into()));
        }
        Ok(Snapshot::new(coordinates))
    }
}

impl PdbFile {
    /// Extracts the temperature-factor column of every alpha-carbon `ATOM`
    /// record, in file order.
    ///
    /// An annotated structure carries the experimentally measured B-factor in
    /// the temperature-factor field; one alpha carbon per residue makes the
    /// result a per-residue table. A file without alpha-carbon records yields
    /// an empty table, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::Parse`] if the temperature-factor field of a matched
    /// record is not a parseable real number.
    pub fn read_alpha_carbon_bfactors(reader: &mut impl BufRead) -> Result<Vec<f64>, PdbError> {
        let mut bfactors = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if !is_atom_record(&line) || slice_and_trim(&line, ATOM_NAME) != ALPHA_CARBON {
                continue;
            }
            bfactors.push(parse_float(&line, line_num, TEMP_FACTOR)?);
        }
        Ok(bfactors)
    }

    /// Path-based variant of [`PdbFile::read_alpha_carbon_bfactors`].
    pub fn read_alpha_carbon_bfactors_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<f64>, PdbError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_alpha_carbon_bfactors(&mut reader)
    }
}
