//! monedero-domain
//!
//! Pure domain models (Profile, Transaction, BankAccount, Category,
//! Asset, Liability, Loan, persisted state). No I/O, no services.
//! Only data types, core enums, and schema-backfill helpers.

pub mod account;
pub mod category;
pub mod common;
pub mod fixed_expense;
pub mod patrimonio;
pub mod profile;
pub mod transaction;

pub use account::*;
pub use category::*;
pub use common::*;
pub use fixed_expense::*;
pub use patrimonio::*;
pub use profile::*;
pub use transaction::*;
