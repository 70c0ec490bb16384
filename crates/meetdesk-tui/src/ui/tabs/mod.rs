//! Per-tab content rendering.

pub mod athletes;
pub mod meets;
