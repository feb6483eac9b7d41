//! Renders computed tables into figures.
//!
//! Renderers operate on already-computed numeric arrays and receive their
//! destination path as an argument; they never derive output locations from
//! shared state.

pub mod figures;
