//! Read-side helpers for browsing expenses.

use std::cmp::Reverse;

use spendlog_domain::Expense;

pub struct QueryService;

impl QueryService {
    /// Case-insensitive match on description or category. A blank term matches everything.
    pub fn search<'a>(records: &'a [Expense], term: &str) -> Vec<&'a Expense> {
        let needle = term.trim().to_lowercase();
        records
            .iter()
            .filter(|expense| {
                needle.is_empty()
                    || expense.description.to_lowercase().contains(&needle)
                    || expense.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Orders records by date, most recent first; equal dates keep their relative order.
    pub fn newest_first<'a, I>(records: I) -> Vec<&'a Expense>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut ordered: Vec<&Expense> = records.into_iter().collect();
        ordered.sort_by_key(|expense| Reverse(expense.date));
        ordered
    }

    /// The listing shown to users: filtered by `term`, newest first.
    pub fn list<'a>(records: &'a [Expense], term: &str) -> Vec<&'a Expense> {
        Self::newest_first(Self::search(records, term))
    }
}
