//! Input validation for the add/edit expense flows.
//!
//! The store accepts any well-typed record; this module is where user text is
//! checked before it reaches the store.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use spendlog_domain::{has_full_week, Expense, NewExpense};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("invalid date `{0}` (use YYYY-MM-DD or YYYY-MM-DD HH:MM)")]
    InvalidDate(String),
}

/// Raw field values for a new expense, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpenseForm {
    /// Checks every field and builds the record to add.
    ///
    /// A blank category falls back to `default_category`; a missing date means `now`.
    pub fn validate(
        &self,
        now: NaiveDateTime,
        default_category: &str,
    ) -> Result<NewExpense, FormError> {
        let amount = parse_amount(&self.amount)?;
        let description = parse_description(&self.description)?;
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(default_category);
        let date = match self.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => now,
        };
        Ok(NewExpense::new(amount, description, category, date))
    }
}

/// Replacement values for an edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
}

impl ExpensePatch {
    pub fn from_fields(
        amount: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, FormError> {
        Ok(Self {
            amount: amount.map(parse_amount).transpose()?,
            description: description.map(parse_description).transpose()?,
            category: category
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            date: date.map(parse_date).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Produces the full replacement record; the id is always preserved.
    pub fn apply(&self, current: &Expense) -> Expense {
        Expense {
            id: current.id,
            amount: self.amount.unwrap_or(current.amount),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
            date: self.date.unwrap_or(current.date),
        }
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, FormError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidAmount(raw.to_string()))?;
    if !value.is_finite() {
        return Err(FormError::InvalidAmount(raw.to_string()));
    }
    if value <= 0.0 {
        return Err(FormError::NonPositiveAmount);
    }
    Ok(value)
}

pub fn parse_description(raw: &str) -> Result<String, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM`.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, FormError> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT) {
        return Ok(timestamp);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| FormError::InvalidDate(raw.to_string()))
}

/// Parses the reference day of a weekly chart; its whole week must be representable.
pub fn parse_day(raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .filter(|day| has_full_week(*day))
        .ok_or_else(|| FormError::InvalidDate(raw.to_string()))
}
