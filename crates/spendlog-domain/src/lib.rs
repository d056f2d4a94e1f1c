//! spendlog-domain
//!
//! Pure domain models for the expense tracker (Expense, NewExpense) plus shared
//! traits and calendar helpers. No I/O, no CLI, no storage.

pub mod common;
pub mod expense;

pub use common::*;
pub use expense::*;
