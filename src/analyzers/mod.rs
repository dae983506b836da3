//! Score aggregation over a filtered view.
//!
//! Produces per-skill gauge values (first row per test/skill pair) and
//! mean percentages per cleaned label, split into skill and non-skill
//! categories.

pub mod aggregate;
pub mod analyzer;
pub mod gauge;
pub mod types;
pub mod utility;
