//! # Engine Module
//!
//! This module implements the numeric pipeline: building the mean reference
//! structure, measuring each atom's root-mean-square fluctuation around it,
//! and converting fluctuation into a B-factor estimate.
//!
//! ## Architecture
//!
//! - **Reference Builder** ([`reference`]) - Arithmetic mean coordinate per atom
//!   index over all snapshots.
//! - **Fluctuation Engine** ([`fluctuation`]) - Two-pass RMSF over in-memory
//!   snapshots, plus a single-pass streaming accumulator for directory-sized
//!   trajectories.
//! - **B-Factor Conversion** ([`bfactor`]) - The Debye-Waller relation applied
//!   to a fluctuation table.
//! - **Configuration** ([`config`]) - Pipeline inputs with builder validation.
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting.
//! - **Error Handling** ([`error`]) - Engine-specific error types.
//!
//! Every stage is a pure, synchronous transformation: a parse failure on any
//! one snapshot is fatal to the whole computation, because the aggregates are
//! meaningless if a contributing frame is dropped silently.

pub mod bfactor;
pub mod config;
pub mod error;
pub mod fluctuation;
pub mod progress;
pub mod reference;
