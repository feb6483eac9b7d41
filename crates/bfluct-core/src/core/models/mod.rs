//! Data structures describing trajectory frames.

pub mod snapshot;
