//! Payslip normalization and computation engine.
//!
//! `extract` discovers the earning/deduction rows in a raw submission,
//! `normalize` fills every remaining field from input or documented
//! defaults and settles the three totals, and `format` keeps amount
//! strings and numbers interchangeable. `handlers` wires the engine to
//! the HTTP surface.

pub mod extract;
pub mod format;
pub mod handlers;
pub mod models;
pub mod normalize;
