//! Provides input/output functionality for the file formats the pipeline touches.
//!
//! This module contains the reader for fixed-column structure snapshots (the
//! per-frame output of a trajectory extraction tool), the extractor for the
//! embedded temperature-factor column of an annotated structure, and the writer
//! for the two-column xvg report tables.

pub mod pdb;
pub mod traits;
pub mod xvg;
