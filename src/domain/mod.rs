//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod input;
pub mod rounding;
pub mod validation;
pub mod valuation;
