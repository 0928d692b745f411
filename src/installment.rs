//! Installment expansion: one user-authored plan becomes a batch of dated
//! transaction drafts, one per calendar month.
//!
//! An installment series is a bounded monthly schedule materialized
//! eagerly. Generated siblings share type, category, and count; the
//! ` (k/total)` description marker is their only link — there is no
//! structural foreign key, and deleting one sibling never cascades.

use chrono::NaiveDate;

use crate::domain::{
    add_months, Category, InstallmentKind, Repetition, TransactionDraft, TransactionType,
};
use crate::errors::{FinanceError, Result};

/// A user-authored draft before expansion. `amount` is per installment.
#[derive(Debug, Clone)]
pub struct InstallmentPlan {
    pub description: String,
    pub amount: f64,
    pub start_date: NaiveDate,
    pub kind: TransactionType,
    pub category: Category,
    pub repetition: Repetition,
    pub installment_kind: InstallmentKind,
    pub count: u32,
}

impl InstallmentPlan {
    /// A single fixed entry: count 1, no series marker.
    pub fn single(
        description: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            start_date,
            kind,
            category,
            repetition: Repetition::None,
            installment_kind: InstallmentKind::Fixed,
            count: 1,
        }
    }
}

/// Expands a plan into its materialized drafts.
///
/// Validation happens before any date is computed, and failure produces no
/// partial batch: an empty description, a non-positive amount, or a zero
/// count is rejected outright. Dates advance one calendar month per step
/// from the start date, clamping to the destination month's last day when
/// the original day does not exist there. Descriptions gain an
/// ` (i+1/count)` suffix only when `count > 1`, and `installments_count`
/// is carried only in that case.
pub fn expand(plan: &InstallmentPlan) -> Result<Vec<TransactionDraft>> {
    if plan.description.trim().is_empty() {
        return Err(FinanceError::invalid("description must not be empty"));
    }
    if plan.amount <= 0.0 {
        return Err(FinanceError::invalid(format!(
            "amount must be positive, got {}",
            plan.amount
        )));
    }
    if plan.count < 1 {
        return Err(FinanceError::invalid("installment count must be at least 1"));
    }

    let series_count = (plan.count > 1).then_some(plan.count);
    let drafts = (0..plan.count)
        .map(|i| {
            let date = add_months(plan.start_date, i as i32);
            let description = match series_count {
                Some(total) => format!("{} ({}/{})", plan.description, i + 1, total),
                None => plan.description.clone(),
            };
            TransactionDraft::new(description, plan.amount, date, plan.kind, plan.category)
                .with_repetition(plan.repetition)
                .with_installment(plan.installment_kind, series_count)
        })
        .collect();
    Ok(drafts)
}
