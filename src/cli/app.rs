use chrono::Local;

use crate::config::{Config, ConfigManager};
use crate::errors::Result;
use crate::reports::Period;
use crate::session::{LocalGateway, SessionTracker};
use crate::store::{SnapshotStorage, TransactionStore};

/// Runtime state shared by every screen: the store, the session tracker
/// and its gateway, configuration, and the month currently in view.
pub struct App {
    pub store: TransactionStore,
    pub tracker: SessionTracker,
    pub gateway: LocalGateway,
    pub config: Config,
    pub period: Period,
    config_manager: ConfigManager,
}

impl App {
    pub fn bootstrap() -> Result<Self> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let store = TransactionStore::open(SnapshotStorage::default_location())?;
        let gateway = LocalGateway::open_default()?;
        let mut tracker = SessionTracker::new();
        tracker.subscribe(|state| {
            tracing::info!(active = state.is_active(), "session state changed");
        });
        let period = config
            .last_period
            .filter(|(_, month)| (1..=12).contains(month))
            .map(|(year, month)| Period::new(year, month))
            .unwrap_or_else(|| Period::from_date(Local::now().date_naive()));
        Ok(Self {
            store,
            tracker,
            gateway,
            config,
            period,
            config_manager,
        })
    }

    /// Remembers the month in view for the next run.
    pub fn save_config(&mut self) -> Result<()> {
        self.config.last_period = Some((self.period.year, self.period.month));
        self.config_manager.save(&self.config)
    }
}
