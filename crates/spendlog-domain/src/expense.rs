//! Domain model for a single recorded spending event.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Displayable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub date: NaiveDateTime,
}

impl Expense {
    /// Calendar day the expense is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Returns the record without its identifier, e.g. to prefill an edit form.
    pub fn to_new(&self) -> NewExpense {
        NewExpense {
            amount: self.amount,
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date,
        }
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} ({})", self.category, self.date.format("%Y-%m-%d"))
        } else {
            format!("{} [{}]", self.description, self.category)
        }
    }
}

/// An expense that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub date: NaiveDateTime,
}

impl NewExpense {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
            date,
        }
    }

    /// Builds an expense dated at midnight of `day`.
    pub fn on_day(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        day: NaiveDate,
    ) -> Self {
        Self::new(amount, description, category, day.and_time(chrono::NaiveTime::MIN))
    }

    pub fn with_id(self, id: Uuid) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> NewExpense {
        NewExpense::on_day(
            12.5,
            "Lunch",
            "Food",
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
        )
    }

    #[test]
    fn with_id_keeps_every_field() {
        let id = Uuid::new_v4();
        let expense = lunch().with_id(id);
        assert_eq!(expense.id, id);
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.to_new(), lunch());
    }

    #[test]
    fn display_label_falls_back_to_category_and_date() {
        let mut expense = lunch().with_id(Uuid::new_v4());
        assert_eq!(expense.display_label(), "Lunch [Food]");
        expense.description.clear();
        assert_eq!(expense.display_label(), "Food (2026-10-12)");
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let expense = lunch().with_id(Uuid::nil());
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["category"], "Food");
        assert_eq!(json["date"], "2026-10-12T00:00:00");
        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }
}
