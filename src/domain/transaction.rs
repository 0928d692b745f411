use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Inflow vs outflow. The sign of a transaction's contribution to any
/// balance is derived from this, never from the stored amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Entry,
    Exit,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Entry, TransactionType::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Entry => "Entrada",
            TransactionType::Exit => "Saída",
        }
    }
}

/// Closed category set. Every variant has a total mapping to display
/// metadata; free-form labels resolve through [`Category::from_label`],
/// falling back to `Others`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Salary,
    Rent,
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Others,
}

/// Presentation metadata attached to a category. `icon` is a symbolic tag
/// and `color` a terminal color name; the CLI resolves both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    pub icon: &'static str,
    pub color: &'static str,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Salary,
        Category::Rent,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "Salário",
            Category::Rent => "Aluguel",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Entertainment => "Lazer",
            Category::Shopping => "Compras",
            Category::Bills => "Contas",
            Category::Others => "Outros",
        }
    }

    pub fn meta(&self) -> CategoryMeta {
        match self {
            Category::Salary => CategoryMeta { icon: "payments", color: "green" },
            Category::Rent => CategoryMeta { icon: "home", color: "blue" },
            Category::Food => CategoryMeta { icon: "restaurant", color: "yellow" },
            Category::Transport => CategoryMeta { icon: "directions_car", color: "cyan" },
            Category::Entertainment => CategoryMeta { icon: "celebration", color: "magenta" },
            Category::Shopping => CategoryMeta { icon: "shopping_bag", color: "purple" },
            Category::Bills => CategoryMeta { icon: "bolt", color: "bright yellow" },
            Category::Others => CategoryMeta { icon: "category", color: "white" },
        }
    }

    /// Resolves a display label back to a category, defaulting to `Others`
    /// for anything outside the closed set.
    pub fn from_label(label: &str) -> Category {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label)
            .unwrap_or(Category::Others)
    }
}

/// Advisory repetition marker recorded on a transaction. Not used to
/// regenerate future entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Repetition {
    None,
    Monthly,
}

/// Provenance marker distinguishing a standalone entry from one generated
/// as part of an installment series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstallmentKind {
    Fixed,
    Installment,
}

/// A single ledger entry. Immutable once created; edits replace the record
/// wholesale, keeping the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition: Option<Repetition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_kind: Option<InstallmentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments_count: Option<u32>,
}

impl Transaction {
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: draft.category,
            repetition: draft.repetition,
            installment_kind: draft.installment_kind,
            installments_count: draft.installments_count,
        }
    }

    /// Amount signed by type: entries count positive, exits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Entry => self.amount,
            TransactionType::Exit => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.description, self.kind.label())
    }
}

/// A transaction awaiting id assignment by the store. Produced by the
/// quick-entry form (single record) or the installment expander (batch).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition: Option<Repetition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_kind: Option<InstallmentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments_count: Option<u32>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            kind,
            category,
            repetition: None,
            installment_kind: None,
            installments_count: None,
        }
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = Some(repetition);
        self
    }

    pub fn with_installment(mut self, kind: InstallmentKind, count: Option<u32>) -> Self {
        self.installment_kind = Some(kind);
        self.installments_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::from_draft(TransactionDraft::new(
            "Salário",
            4847.70,
            NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            TransactionType::Entry,
            Category::Salary,
        ))
    }

    #[test]
    fn signed_amount_follows_type() {
        let entry = sample();
        assert!(entry.signed_amount() > 0.0);

        let mut exit = sample();
        exit.kind = TransactionType::Exit;
        assert!(exit.signed_amount() < 0.0);
        assert_eq!(exit.signed_amount().abs(), exit.amount);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("repetition"));
        assert!(!json.contains("installment_kind"));
        assert!(!json.contains("installments_count"));
    }

    #[test]
    fn every_category_has_label_and_metadata() {
        for category in Category::ALL {
            assert!(!category.label().is_empty());
            assert!(!category.meta().icon.is_empty());
            assert!(!category.meta().color.is_empty());
        }
    }

    #[test]
    fn from_label_round_trips_and_falls_back() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), category);
        }
        assert_eq!(Category::from_label("Viagens"), Category::Others);
    }
}
