//! monedero-core
//!
//! Ledger consistency engine and services for Monedero. Depends on
//! monedero-domain. No CLI, no terminal I/O, no direct storage
//! interactions; persistence arrives through the [`storage::StateStorage`]
//! trait.

pub mod account_service;
pub mod balance;
pub mod category_service;
pub mod error;
pub mod export_service;
pub mod fixed_expense_service;
pub mod patrimonio_service;
pub mod profile_store;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;
pub mod validation;

pub use account_service::*;
pub use balance::*;
pub use category_service::*;
pub use error::{CoreError, CoreResult};
pub use export_service::*;
pub use fixed_expense_service::*;
pub use patrimonio_service::*;
pub use profile_store::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
pub use transaction_service::*;
pub use validation::*;
