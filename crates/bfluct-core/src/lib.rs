//! # bfluct Core Library
//!
//! A library for estimating per-residue positional mobility from molecular dynamics
//! trajectories: it computes the root-mean-square fluctuation (RMSF) of every atom
//! around its mean position and converts it into a crystallographic B-factor estimate
//! via the Debye-Waller relation, for comparison against experimentally annotated
//! structures.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to keep the numeric
//! pipeline separate from parsing and presentation concerns.
//!
//! - **[`core`]: The Foundation.** Contains the stateless data model (`Snapshot`,
//!   `ReferenceStructure`) and I/O for the fixed-column structure format and the
//!   xvg report tables.
//!
//! - **[`engine`]: The Numeric Core.** The mean-structure builder, the fluctuation
//!   engine (both the two-pass form and a single-pass streaming accumulator), the
//!   B-factor conversion, and the supporting configuration, progress, and error
//!   types.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the
//!   complete snapshot-directory-to-tables pipeline. This is the entry point for
//!   end-users of the library.
//!
//! - **[`report`]: Presentation.** Renders already-computed tables into SVG figures.
//!   Every renderer receives its destination path explicitly; nothing in the library
//!   holds a process-wide output location.

pub mod core;
pub mod engine;
pub mod report;
pub mod workflows;
