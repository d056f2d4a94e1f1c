//! The tracker session: the single owner of expense state for one run.
//!
//! `Tracker` calls the store and aggregator and manages the notices a user
//! sees after each action. Store semantics are never altered by notice timing:
//! undo keeps working after its notice has been dismissed.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Weekday};
use spendlog_config::{Config, NoticeSettings};
use spendlog_core::{
    CategoryTotal, Clock, DailyTotal, ExpenseStore, ExpenseSummary, QueryService, SummaryService,
};
use spendlog_domain::{Expense, NewExpense};
use tracing::{debug, info};
use uuid::Uuid;

use crate::form::ExpensePatch;
use crate::notice::{Notice, NoticeBoard, NoticeKind};

pub const ADDED_MESSAGE: &str = "Expense added successfully!";

pub struct Tracker {
    store: ExpenseStore,
    notices: NoticeBoard,
    clock: Arc<dyn Clock>,
    settings: NoticeSettings,
    first_weekday: Weekday,
}

impl Tracker {
    pub fn new(clock: Arc<dyn Clock>, settings: NoticeSettings, first_weekday: Weekday) -> Self {
        Self {
            store: ExpenseStore::new(),
            notices: NoticeBoard::new(),
            clock,
            settings,
            first_weekday,
        }
    }

    pub fn from_config(clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self::new(clock, config.notices, config.first_weekday)
    }

    /// Picks up changed notice timings and week start without touching expenses.
    pub fn apply_config(&mut self, config: &Config) {
        self.settings = config.notices;
        self.first_weekday = config.first_weekday;
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn add(&mut self, input: NewExpense) -> Expense {
        let added = self.store.add(input).clone();
        info!(id = %added.id, amount = added.amount, category = %added.category, "expense recorded");
        let ttl = notice_ttl(self.settings.added_notice_ms);
        self.notices
            .post(NoticeKind::Success, ADDED_MESSAGE, self.clock.now(), ttl);
        added
    }

    /// Applies `patch` over the stored record. Unknown ids leave the store untouched.
    pub fn edit(&mut self, id: Uuid, patch: &ExpensePatch) -> Option<Expense> {
        let Some(current) = self.store.get(id) else {
            debug!(%id, "edit skipped for unknown expense");
            return None;
        };
        let edited = patch.apply(current);
        self.store.update(edited.clone());
        info!(%id, "expense edited");
        Some(edited)
    }

    /// Deletes and offers a timed undo. Any earlier undo offer is withdrawn,
    /// since the store only remembers the latest deletion.
    pub fn delete(&mut self, id: Uuid) -> Option<Expense> {
        let removed = self.store.delete(id)?.clone();
        self.notices.cancel_undo();
        let ttl = notice_ttl(self.settings.undo_window_ms);
        self.notices.post(
            NoticeKind::Undo { expense_id: removed.id },
            deleted_message(&removed),
            self.clock.now(),
            ttl,
        );
        info!(%id, "expense deleted");
        Some(removed)
    }

    pub fn undo(&mut self) -> Option<Expense> {
        self.notices.cancel_undo();
        let restored = self.store.undo()?.clone();
        info!(id = %restored.id, "expense restored");
        Some(restored)
    }

    pub fn summary(&self) -> ExpenseSummary {
        SummaryService::summary(self.store.expenses(), self.clock.today())
    }

    pub fn weekly(&self) -> Vec<DailyTotal> {
        self.weekly_for(self.clock.today())
    }

    pub fn weekly_for(&self, reference: NaiveDate) -> Vec<DailyTotal> {
        SummaryService::weekly_series_starting(
            self.store.expenses(),
            reference,
            self.first_weekday,
        )
    }

    pub fn categories(&self) -> Vec<CategoryTotal> {
        SummaryService::category_series(self.store.expenses())
    }

    /// Newest-first listing filtered by `term`.
    pub fn list(&self, term: &str) -> Vec<&Expense> {
        QueryService::list(self.store.expenses(), term)
    }

    pub fn expire_notices(&mut self) -> Vec<Notice> {
        let expired = self.notices.expire(self.clock.now());
        for notice in &expired {
            debug!(message = %notice.message, "notice dismissed");
        }
        expired
    }

    pub fn active_notices(&self) -> Vec<&Notice> {
        self.notices.active(self.clock.now()).collect()
    }

    pub fn pending_undo(&self) -> Option<&Notice> {
        self.notices.pending_undo(self.clock.now())
    }
}

/// Durations read from a hand-edited config file may exceed what `config set` accepts.
fn notice_ttl(millis: u64) -> Duration {
    Duration::milliseconds(millis.min(NoticeSettings::MAX_MS) as i64)
}

pub fn deleted_message(expense: &Expense) -> String {
    format!(
        "Transaction deleted: \"{}\" has been removed",
        expense.description
    )
}
