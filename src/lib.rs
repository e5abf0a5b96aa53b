//! kubun-valuation: inheritance-tax valuation of condominium units under the
//! sectional ownership correction rule.
//!
//! Hexagonal architecture: the valuation formula and input rules live in
//! [`domain`], port traits in [`ports`], concrete implementations in
//! [`adapters`], and the command line in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
