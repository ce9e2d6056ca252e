//! Attribute parsing and diagnostics shared by the derives.

pub mod attrs;
pub mod diag;
pub mod utils;
