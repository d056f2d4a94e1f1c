//! In-memory expense collection with single-level undo.

use spendlog_domain::{Expense, NewExpense};
use tracing::debug;
use uuid::Uuid;

/// Owns the live expense collection and the "recently deleted" slot.
///
/// Lookups that miss are silent no-ops: ids only ever originate here, so a
/// stale id (a duplicated delete, an edit of a record that is already gone)
/// is expected and must not surface as a failure.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    recently_deleted: Option<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh id to `input`, appends it and returns the stored record.
    pub fn add(&mut self, input: NewExpense) -> &Expense {
        let id = self.fresh_id();
        self.expenses.push(input.with_id(id));
        debug!(%id, "expense added");
        &self.expenses[self.expenses.len() - 1]
    }

    /// Replaces the record sharing `record.id`, or inserts it when absent.
    pub fn update(&mut self, record: Expense) {
        let id = record.id;
        match self.position(id) {
            Some(idx) => {
                self.expenses[idx] = record;
                debug!(%id, "expense replaced");
            }
            None => {
                self.expenses.push(record);
                debug!(%id, "expense inserted by update");
            }
        }
    }

    /// Removes the record and stages it for [`ExpenseStore::undo`].
    ///
    /// Any previously staged record is discarded for good.
    pub fn delete(&mut self, id: Uuid) -> Option<&Expense> {
        let Some(idx) = self.position(id) else {
            debug!(%id, "delete ignored for unknown expense");
            return None;
        };
        let removed = self.expenses.remove(idx);
        if let Some(previous) = self.recently_deleted.replace(removed) {
            debug!(id = %previous.id, "undo slot overwritten");
        }
        debug!(%id, "expense deleted");
        self.recently_deleted.as_ref()
    }

    /// Restores the staged record, if any, and clears the slot.
    pub fn undo(&mut self) -> Option<&Expense> {
        let record = self.recently_deleted.take()?;
        let id = record.id;
        self.update(record);
        debug!(%id, "expense restored");
        self.get(id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn recently_deleted(&self) -> Option<&Expense> {
        self.recently_deleted.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.recently_deleted.is_some()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            let staged = self.recently_deleted.as_ref().map(|expense| expense.id);
            if self.position(id).is_none() && staged != Some(id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input(amount: f64, description: &str) -> NewExpense {
        NewExpense::on_day(
            amount,
            description,
            "Food",
            NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        )
    }

    #[test]
    fn add_returns_stored_record() {
        let mut store = ExpenseStore::new();
        let added = store.add(input(50.0, "Groceries")).clone();
        assert!(!added.id.is_nil());
        assert_eq!(store.get(added.id), Some(&added));
        assert_eq!(added.to_new(), input(50.0, "Groceries"));
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = ExpenseStore::new();
        let first = store.add(input(1.0, "a")).clone();
        let second = store.add(input(2.0, "b")).id;

        let mut edited = first.clone();
        edited.amount = 9.0;
        edited.description = "edited".into();
        store.update(edited.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.expenses()[0], edited);
        assert_eq!(store.expenses()[1].id, second);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut store = ExpenseStore::new();
        store.add(input(1.0, "a"));
        assert!(store.delete(Uuid::new_v4()).is_none());
        assert_eq!(store.len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn double_delete_keeps_first_staging() {
        let mut store = ExpenseStore::new();
        let id = store.add(input(1.0, "a")).id;
        assert!(store.delete(id).is_some());
        assert!(store.delete(id).is_none());
        assert_eq!(store.recently_deleted().map(|e| e.id), Some(id));
    }

    #[test]
    fn undo_on_empty_slot_is_a_no_op() {
        let mut store = ExpenseStore::new();
        store.add(input(1.0, "a"));
        assert!(store.undo().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn undo_clears_slot() {
        let mut store = ExpenseStore::new();
        let id = store.add(input(1.0, "a")).id;
        store.delete(id);
        assert_eq!(store.undo().map(|e| e.id), Some(id));
        assert!(!store.can_undo());
        assert!(store.undo().is_none());
    }
}
