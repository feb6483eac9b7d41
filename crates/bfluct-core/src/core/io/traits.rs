use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading fixed-column structure file formats.
///
/// This trait provides a common API for parsing structure files into the
/// pipeline's data model. Implementors handle format-specific column layouts;
/// the trait supplies the path-based entry point so that the file handle is
/// acquired and released in one place, on every exit path.
pub trait StructureFile {
    /// The value produced by parsing one file.
    type Output;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads and parses a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads and parses a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
