//! spendlog-core
//!
//! Expense state and derived views for spendlog.
//! Depends on spendlog-domain. No CLI, no terminal I/O, no storage.

pub mod expense_store;
pub mod query_service;
pub mod summary_service;
pub mod time;

pub use expense_store::ExpenseStore;
pub use query_service::QueryService;
pub use summary_service::*;
pub use time::Clock;
