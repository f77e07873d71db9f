//! Shared domain logic for the SiteLedger construction back-office.
//!
//! This crate contains the pure, I/O-free parts of the system: the materials
//! stock ledger (status vocabulary, normalization, balance aggregation and
//! the availability gate), the financial report folds, and field validations.
//! The backend crate wires these into HTTP handlers and PostgreSQL queries.

pub mod finance;
pub mod ledger;
pub mod validation;

pub use finance::*;
pub use ledger::*;
pub use validation::*;
