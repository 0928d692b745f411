//! Aggregation engine: pure derivations over a transaction list.
//!
//! Every function here is synchronous, non-mutating, and total — empty or
//! all-zero input produces zero/empty output, never an error. Period
//! classification compares calendar fields only; no timestamps are
//! involved anywhere in this module.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Transaction, TransactionType};

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub const MONTH_SHORT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// A calendar month key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn from_date(date: chrono::NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Steps the period by whole months, in either direction.
    pub fn offset(self, delta: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn short_label(&self) -> &'static str {
        MONTH_SHORT[(self.month - 1) as usize]
    }
}

/// Transactions whose date falls in the given calendar month, input order
/// preserved. Idempotent: re-filtering the result is a no-op.
pub fn filter_by_month(transactions: &[Transaction], period: Period) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == period.year && t.date.month() == period.month)
        .cloned()
        .collect()
}

/// Transactions whose date falls in the given calendar year, input order
/// preserved.
pub fn filter_by_year(transactions: &[Transaction], year: i32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == year)
        .cloned()
        .collect()
}

/// Sum of amounts over transactions of the given type. Zero for an empty
/// slice; never negative, since stored amounts are non-negative.
pub fn sum_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Entries minus exits.
pub fn balance(transactions: &[Transaction]) -> f64 {
    sum_by_type(transactions, TransactionType::Entry)
        - sum_by_type(transactions, TransactionType::Exit)
}

/// Per-category totals, descending by total. Callers building an expense
/// breakdown pass a pre-filtered exit set. The sort is stable, so equal
/// totals keep first-encountered order.
pub fn sum_by_category(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();
    for t in transactions {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, total)) => *total += t.amount,
            None => totals.push((t.category, t.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

/// One month of aggregated flow.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub period: Period,
    pub entries: f64,
    pub exits: f64,
    pub balance: f64,
}

/// Aggregates `count` consecutive months ending at `end`, inclusive,
/// oldest first. Drives the cash-flow trend display; the reference
/// default for `count` is six.
pub fn monthly_series(transactions: &[Transaction], end: Period, count: usize) -> Vec<MonthSummary> {
    (0..count)
        .rev()
        .map(|back| {
            let period = end.offset(-(back as i32));
            let month = filter_by_month(transactions, period);
            let entries = sum_by_type(&month, TransactionType::Entry);
            let exits = sum_by_type(&month, TransactionType::Exit);
            MonthSummary {
                period,
                entries,
                exits,
                balance: entries - exits,
            }
        })
        .collect()
}

/// A category's slice of the exit total, as an absolute value and a
/// percentage share.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    pub share: f64,
}

/// Expense breakdown with percentage shares, descending by total. Pass a
/// pre-filtered exit set; shares are zero when the set sums to zero.
pub fn category_shares(exits: &[Transaction]) -> Vec<CategoryShare> {
    let grand_total: f64 = exits.iter().map(|t| t.amount).sum();
    sum_by_category(exits)
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// The largest expense category of the period, if any.
pub fn top_category(exits: &[Transaction]) -> Option<CategoryShare> {
    category_shares(exits).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionDraft;
    use chrono::NaiveDate;

    fn txn(desc: &str, amount: f64, date: &str, kind: TransactionType, cat: Category) -> Transaction {
        Transaction::from_draft(TransactionDraft::new(
            desc,
            amount,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            cat,
        ))
    }

    fn sample_set() -> Vec<Transaction> {
        vec![
            txn("Salário", 4847.70, "2025-05-05", TransactionType::Entry, Category::Salary),
            txn("iFood", 42.90, "2025-05-20", TransactionType::Exit, Category::Food),
            txn("Prest. Casa", 800.00, "2024-02-12", TransactionType::Exit, Category::Rent),
        ]
    }

    #[test]
    fn filter_by_month_matches_calendar_fields_only() {
        let set = sample_set();
        let may = filter_by_month(&set, Period::new(2025, 5));
        assert_eq!(may.len(), 2);
        assert_eq!(may[0].description, "Salário");
        assert_eq!(may[1].description, "iFood");

        // Idempotence.
        assert_eq!(filter_by_month(&may, Period::new(2025, 5)), may);
    }

    #[test]
    fn balance_is_entries_minus_exits() {
        let set = sample_set();
        let may = filter_by_month(&set, Period::new(2025, 5));
        assert!((balance(&may) - 4804.80).abs() < 1e-9);
        assert_eq!(balance(&[]), 0.0);
    }

    #[test]
    fn sum_by_category_sorts_descending_with_stable_ties() {
        let set = vec![
            txn("a", 10.0, "2025-05-01", TransactionType::Exit, Category::Food),
            txn("b", 10.0, "2025-05-02", TransactionType::Exit, Category::Bills),
            txn("c", 25.0, "2025-05-03", TransactionType::Exit, Category::Rent),
        ];
        let totals = sum_by_category(&set);
        assert_eq!(totals[0].0, Category::Rent);
        // Tie between Food and Bills keeps input encounter order.
        assert_eq!(totals[1].0, Category::Food);
        assert_eq!(totals[2].0, Category::Bills);
    }

    #[test]
    fn monthly_series_is_oldest_first_and_inclusive() {
        let set = sample_set();
        let series = monthly_series(&set, Period::new(2025, 5), 6);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].period, Period::new(2024, 12));
        assert_eq!(series[5].period, Period::new(2025, 5));
        assert!((series[5].balance - 4804.80).abs() < 1e-9);
        assert_eq!(series[2].entries, 0.0);
    }

    #[test]
    fn period_offset_crosses_year_boundaries() {
        assert_eq!(Period::new(2025, 1).prev(), Period::new(2024, 12));
        assert_eq!(Period::new(2024, 12).next(), Period::new(2025, 1));
        assert_eq!(Period::new(2025, 5).offset(-17), Period::new(2023, 12));
    }

    #[test]
    fn category_shares_sum_to_one_hundred() {
        let set = vec![
            txn("a", 75.0, "2025-05-01", TransactionType::Exit, Category::Food),
            txn("b", 25.0, "2025-05-02", TransactionType::Exit, Category::Bills),
        ];
        let shares = category_shares(&set);
        assert!((shares[0].share - 75.0).abs() < 1e-9);
        assert!((shares[1].share - 25.0).abs() < 1e-9);
        assert_eq!(top_category(&set).unwrap().category, Category::Food);
        assert!(top_category(&[]).is_none());
    }
}
