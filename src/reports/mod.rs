//! Reports for the expense tracker

pub mod summary;

pub use summary::{CategoryTotal, SummaryReport};
