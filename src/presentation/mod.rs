//! HTML views and display formatting.

pub mod format;
pub mod views;
