use agropulse::advisory::{AdvisoryEngine, AdvisoryError, AdvisoryService, GeminiClient};
use agropulse::config::AppConfig;
use agropulse::crop::GrowthStage;
use agropulse::market::{MarketScorer, MarketService};
use agropulse::profile::{ProfileRecord, ProfileStore, ProfileStoreError, Season};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub(crate) type AdvisorService = AdvisoryService<GeminiClient>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Profile store that lives only as long as the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    record: Arc<Mutex<Option<ProfileRecord>>>,
}

impl InMemoryProfileStore {
    fn slot(&self) -> Result<MutexGuard<'_, Option<ProfileRecord>>, ProfileStoreError> {
        self.record
            .lock()
            .map_err(|_| ProfileStoreError::Io(io::Error::other("profile mutex poisoned")))
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, record: &ProfileRecord) -> Result<(), ProfileStoreError> {
        record.validate()?;
        *self.slot()? = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ProfileStoreError> {
        self.slot()?.take();
        Ok(())
    }
}

pub(crate) fn market_service(config: &AppConfig) -> Arc<MarketService> {
    Arc::new(MarketService::from_config(&config.market))
}

/// Advisory service with the upstream client when a key is configured. The
/// rule endpoints keep working without one.
pub(crate) fn advisory_service(config: &AppConfig) -> Arc<AdvisorService> {
    let engine = AdvisoryEngine::new(MarketScorer::new(config.market.distance_weight));
    let generator = match GeminiClient::from_config(&config.advisor) {
        Ok(client) => Some(client),
        Err(AdvisoryError::MissingCredential) => {
            warn!("GEMINI_API_KEY is not set; /api/v1/advisor will answer with an error");
            None
        }
        Err(err) => {
            warn!(error = %err, "advice generator unavailable");
            None
        }
    };
    Arc::new(AdvisoryService::new(engine, generator))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_stage(raw: &str) -> Result<GrowthStage, String> {
    let stage = GrowthStage::parse(raw);
    if stage.is_recognized() {
        Ok(stage)
    } else {
        Err(format!(
            "unknown growth stage '{raw}' (expected Seedling, Vegetative, Flowering or Harvesting)"
        ))
    }
}

pub(crate) fn parse_season(raw: &str) -> Result<Season, String> {
    Season::parse(raw)
        .ok_or_else(|| format!("unknown season '{raw}' (expected Kharif, Rabi or Zaid)"))
}
