use std::{env, fs, path::{Path, PathBuf}};

use chrono::NaiveDate;

use crate::domain::{Category, Transaction, TransactionDraft, TransactionType};
use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".grana";
const SNAPSHOT_FILE: &str = "transactions.json";

/// Returns the application data directory, defaulting to `~/.grana`.
/// The `GRANA_HOME` environment variable overrides it (tests point this
/// at a temp dir).
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("GRANA_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Persists the full transaction snapshot as a single JSON array, replaced
/// wholesale on every write. No incremental diffing, no schema versioning.
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    path: PathBuf,
}

impl SnapshotStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        Self::new(app_data_dir().join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored snapshot, or the fixed seed set when no snapshot
    /// file exists yet.
    pub fn load_or_seed(&self) -> Result<Vec<Transaction>> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(seed_transactions())
        }
    }

    /// Writes the snapshot atomically by staging to a temporary file.
    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(transactions)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// The starter data shown on first run, before the user records anything.
pub fn seed_transactions() -> Vec<Transaction> {
    let entry = |desc: &str, amount: f64, y: i32, m: u32, d: u32, kind, category| {
        Transaction::from_draft(TransactionDraft::new(
            desc,
            amount,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            kind,
            category,
        ))
    };
    vec![
        entry("Palheta / Sup.GPS", 36.90, 2024, 2, 16, TransactionType::Exit, Category::Transport),
        entry("Prest. Casa", 800.00, 2024, 2, 12, TransactionType::Exit, Category::Rent),
        entry("Salário", 4847.70, 2025, 5, 5, TransactionType::Entry, Category::Salary),
        entry("iFood - Restaurante", 42.90, 2025, 5, 20, TransactionType::Exit, Category::Food),
    ]
}
