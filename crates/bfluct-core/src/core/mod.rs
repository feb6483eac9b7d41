//! # Core Module
//!
//! This module provides the fundamental data structures and I/O routines the
//! fluctuation pipeline is built on.
//!
//! ## Architecture
//!
//! - **Trajectory Representation** ([`models`]) - Per-frame coordinate snapshots
//!   and the mean reference structure derived from them.
//! - **File I/O** ([`io`]) - Reading fixed-column structure snapshots and writing
//!   two-column xvg report tables.

pub mod io;
pub mod models;
