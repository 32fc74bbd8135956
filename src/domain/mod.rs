//! Core domain types and logic.

pub mod record;
pub mod dataset;
pub mod filter;
pub mod chart;
pub mod dashboard;
pub mod error;
