//! Domain model: the transaction record, its enumerations, and calendar
//! date helpers shared by the aggregation and installment layers.

pub mod common;
pub mod dates;
pub mod transaction;

pub use common::{Displayable, Identifiable};
pub use dates::{add_months, days_in_month, parse_iso_date};
pub use transaction::{
    Category, CategoryMeta, InstallmentKind, Repetition, Transaction, TransactionDraft,
    TransactionType,
};
