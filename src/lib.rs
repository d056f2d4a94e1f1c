#![doc(test(attr(deny(warnings))))]

//! spendlog records day-to-day spending, keeps a single-level undo for
//! deletions, and derives summaries and weekly/category charts from the
//! in-memory expense list.

pub mod cli;
pub mod errors;
pub mod form;
pub mod format;
pub mod notice;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("spendlog tracing initialized.");
    });
}
