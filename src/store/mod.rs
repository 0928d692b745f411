//! The authoritative in-process transaction set, persisted in full after
//! every mutation. Expected to be driven from a single logical thread of
//! control; no locking discipline is provided or needed.

pub mod snapshot;

use uuid::Uuid;

use crate::domain::{Transaction, TransactionDraft};
use crate::errors::Result;

pub use snapshot::{app_data_dir, seed_transactions, SnapshotStorage};

/// Outcome of a replace-by-id edit. An unknown id is a visible no-op, not
/// an error: callers choose whether to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: SnapshotStorage,
}

impl TransactionStore {
    /// Opens the store, loading the persisted snapshot (or the seed set on
    /// first run).
    pub fn open(storage: SnapshotStorage) -> Result<Self> {
        let transactions = storage.load_or_seed()?;
        tracing::info!(count = transactions.len(), "transaction store loaded");
        Ok(Self {
            transactions,
            storage,
        })
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Assigns fresh ids to the batch and inserts it at the front (newest
    /// first), as one caller-visible operation. Returns the assigned ids
    /// in batch order.
    pub fn add_batch(&mut self, drafts: Vec<TransactionDraft>) -> Result<Vec<Uuid>> {
        let batch: Vec<Transaction> = drafts.into_iter().map(Transaction::from_draft).collect();
        let ids: Vec<Uuid> = batch.iter().map(|t| t.id).collect();
        self.transactions.splice(0..0, batch);
        tracing::info!(added = ids.len(), "transactions added");
        self.persist()?;
        Ok(ids)
    }

    /// Replaces the record with the given id wholesale, keeping the id.
    pub fn update(&mut self, id: Uuid, draft: TransactionDraft) -> Result<UpdateOutcome> {
        match self.transactions.iter_mut().find(|t| t.id == id) {
            Some(existing) => {
                *existing = Transaction {
                    id,
                    description: draft.description,
                    amount: draft.amount,
                    date: draft.date,
                    kind: draft.kind,
                    category: draft.category,
                    repetition: draft.repetition,
                    installment_kind: draft.installment_kind,
                    installments_count: draft.installments_count,
                };
                self.persist()?;
                Ok(UpdateOutcome::Updated)
            }
            None => {
                tracing::warn!(%id, "update for unknown transaction id");
                Ok(UpdateOutcome::NotFound)
            }
        }
    }

    /// Removes by id, returning the removed record. An unknown id is a
    /// no-op. Deleting one installment sibling leaves the rest untouched.
    pub fn remove(&mut self, id: Uuid) -> Result<Option<Transaction>> {
        match self.transactions.iter().position(|t| t.id == id) {
            Some(index) => {
                let removed = self.transactions.remove(index);
                self.persist()?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.transactions)
    }
}
