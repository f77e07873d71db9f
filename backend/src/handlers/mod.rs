//! HTTP handlers for the SiteLedger API

pub mod absences;
pub mod auth;
pub mod cash;
pub mod employees;
pub mod expenses;
pub mod finance;
pub mod health;
pub mod invoices;
pub mod items;
pub mod objects;
pub mod parties;
pub mod payments;
pub mod purchases;
pub mod salaries;

pub use absences::*;
pub use auth::*;
pub use cash::*;
pub use employees::*;
pub use expenses::*;
pub use finance::*;
pub use health::*;
pub use invoices::*;
pub use items::*;
pub use objects::*;
pub use parties::*;
pub use payments::*;
pub use purchases::*;
pub use salaries::*;
