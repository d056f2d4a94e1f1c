use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use spendlog_domain::{same_day, week_days, Expense};

/// Returned as the top category when there are no expenses.
pub const NO_TOP_CATEGORY: &str = "None";

/// Headline figures for a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub today_total: f64,
    pub total_all: f64,
    pub transaction_count: usize,
    pub top_category: String,
}

/// Spending on a single calendar day of a weekly chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// Abbreviated weekday name, e.g. `Sun`.
    pub label: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// Spending attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub amount: f64,
}

/// Derives summary figures and chart series from a snapshot of expenses.
///
/// Every function is pure: the same records always produce the same output.
pub struct SummaryService;

impl SummaryService {
    pub fn summary(records: &[Expense], today: NaiveDate) -> ExpenseSummary {
        let today_total = records
            .iter()
            .filter(|expense| same_day(expense.date, today))
            .map(|expense| expense.amount)
            .sum();
        let total_all = records.iter().map(|expense| expense.amount).sum();

        ExpenseSummary {
            today_total,
            total_all,
            transaction_count: records.len(),
            top_category: Self::top_category(records)
                .unwrap_or(NO_TOP_CATEGORY)
                .to_string(),
        }
    }

    /// Seven daily totals, Sunday through Saturday, for the week containing `reference`.
    pub fn weekly_series(records: &[Expense], reference: NaiveDate) -> Vec<DailyTotal> {
        Self::weekly_series_starting(records, reference, Weekday::Sun)
    }

    pub fn weekly_series_starting(
        records: &[Expense],
        reference: NaiveDate,
        first_weekday: Weekday,
    ) -> Vec<DailyTotal> {
        week_days(reference, first_weekday)
            .into_iter()
            .map(|day| DailyTotal {
                label: day.format("%a").to_string(),
                date: day,
                amount: records
                    .iter()
                    .filter(|expense| same_day(expense.date, day))
                    .map(|expense| expense.amount)
                    .sum(),
            })
            .collect()
    }

    /// One total per distinct category, in order of first appearance.
    pub fn category_series(records: &[Expense]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for expense in records {
            match index.get(expense.category.as_str()) {
                Some(&idx) => totals[idx].amount += expense.amount,
                None => {
                    index.insert(expense.category.as_str(), totals.len());
                    totals.push(CategoryTotal {
                        label: expense.category.clone(),
                        amount: expense.amount,
                    });
                }
            }
        }
        totals
    }

    /// Most frequent category; ties go to the one seen first.
    fn top_category(records: &[Expense]) -> Option<&str> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for expense in records {
            let name = expense.category.as_str();
            match index.get(name) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    index.insert(name, counts.len());
                    counts.push((name, 1));
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (name, count) in counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlog_domain::NewExpense;
    use uuid::Uuid;

    fn expense(amount: f64, category: &str, day: u32) -> Expense {
        NewExpense::on_day(
            amount,
            "",
            category,
            NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        )
        .with_id(Uuid::new_v4())
    }

    #[test]
    fn top_category_prefers_first_seen_on_tie() {
        let records = vec![
            expense(1.0, "Transport", 12),
            expense(1.0, "Food", 12),
            expense(1.0, "Food", 13),
            expense(1.0, "Transport", 13),
        ];
        let summary = SummaryService::summary(&records, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(summary.top_category, "Transport");
    }

    #[test]
    fn top_category_picks_highest_count_not_amount() {
        let records = vec![
            expense(500.0, "Rent", 12),
            expense(3.0, "Coffee", 12),
            expense(4.0, "Coffee", 13),
        ];
        let summary = SummaryService::summary(&records, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert_eq!(summary.top_category, "Coffee");
        assert_eq!(summary.today_total, 0.0);
    }

    #[test]
    fn today_total_only_counts_matching_day() {
        let records = vec![
            expense(10.0, "Food", 16),
            expense(2.5, "Food", 16),
            expense(7.0, "Food", 15),
        ];
        let summary = SummaryService::summary(&records, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(summary.today_total, 12.5);
        assert_eq!(summary.total_all, 19.5);
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn weekly_series_labels_start_on_sunday() {
        let series = SummaryService::weekly_series(&[], NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let labels: Vec<&str> = series.iter().map(|day| day.label.as_str()).collect();
        assert_eq!(labels, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 10, 11).unwrap());
    }

    #[test]
    fn weekly_series_can_start_on_monday() {
        let records = vec![expense(4.0, "Food", 11)];
        let series = SummaryService::weekly_series_starting(
            &records,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            Weekday::Mon,
        );
        assert_eq!(series[0].label, "Mon");
        // Sunday the 11th belongs to the previous Monday-start week.
        assert!(series.iter().all(|day| day.amount == 0.0));
    }

    #[test]
    fn weekly_series_survives_calendar_edges() {
        for reference in [NaiveDate::MIN, NaiveDate::MAX] {
            let series = SummaryService::weekly_series(&[], reference);
            assert_eq!(series.len(), 7);
            assert!(series.iter().any(|day| day.date == reference));
            assert!(series.iter().all(|day| day.amount == 0.0));
        }
    }

    #[test]
    fn category_series_keeps_first_appearance_order() {
        let records = vec![
            expense(1.0, "Transport", 12),
            expense(2.0, "Food", 12),
            expense(3.0, "Transport", 13),
        ];
        let series = SummaryService::category_series(&records);
        assert_eq!(
            series,
            vec![
                CategoryTotal { label: "Transport".into(), amount: 4.0 },
                CategoryTotal { label: "Food".into(), amount: 2.0 },
            ]
        );
    }
}
