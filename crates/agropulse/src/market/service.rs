use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::base_band;
use super::distance::GeoPoint;
use super::domain::{BestMarket, MarketError, PriceLookup};
use super::generator::{generate_quotes, generate_trend};
use super::scorer::MarketScorer;
use crate::config::MarketConfig;
use crate::error::ValidationError;

pub const DEFAULT_TREND_DAYS: u16 = 7;
pub const MAX_TREND_DAYS: u16 = 90;

/// Price lookup request for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub crop: String,
    pub state: Option<String>,
    pub origin: Option<GeoPoint>,
    pub days: u16,
}

impl PriceQuery {
    pub fn new(crop: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            state: None,
            origin: None,
            days: DEFAULT_TREND_DAYS,
        }
    }

    pub fn in_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn from_origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn over_days(mut self, days: u16) -> Self {
        self.days = days;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.crop.trim().is_empty() {
            return Err(ValidationError::new("crop", "must not be empty"));
        }
        if self.days == 0 || self.days > MAX_TREND_DAYS {
            return Err(ValidationError::new(
                "days",
                format!("must be between 1 and {MAX_TREND_DAYS}, got {}", self.days),
            ));
        }
        Ok(())
    }
}

/// Builds ranked price lookups from the mandi catalog.
#[derive(Debug, Clone)]
pub struct MarketService {
    scorer: MarketScorer,
    max_listed: usize,
}

impl MarketService {
    pub fn new(scorer: MarketScorer, max_listed: usize) -> Self {
        Self {
            scorer,
            max_listed: max_listed.max(1),
        }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(MarketScorer::new(config.distance_weight), config.max_listed)
    }

    pub fn scorer(&self) -> &MarketScorer {
        &self.scorer
    }

    /// Lookup against today's date and the thread-local generator.
    pub fn lookup_now(&self, query: &PriceQuery) -> Result<PriceLookup, MarketError> {
        let today = Local::now().date_naive();
        self.lookup(query, today, &mut rand::rng())
    }

    pub fn lookup<R: Rng>(
        &self,
        query: &PriceQuery,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<PriceLookup, MarketError> {
        query.validate()?;

        let crop = query.crop.trim();
        let quotes = generate_quotes(crop, query.state.as_deref(), query.origin, today, rng)?;
        for quote in &quotes {
            quote.validate()?;
        }
        let best = self.scorer.best(&quotes)?;
        let best_market = BestMarket::from_quote(best);

        debug!(
            crop,
            state = query.state.as_deref().unwrap_or("any"),
            candidates = quotes.len(),
            best = %best_market.name,
            "ranked mandi quotes"
        );

        let price_trend = generate_trend(base_band(crop).modal_price, query.days, today, rng);
        let mut prices = self.scorer.rank(quotes);
        prices.truncate(self.max_listed);

        Ok(PriceLookup {
            prices,
            best_market,
            price_trend,
        })
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new(MarketScorer::default(), 5)
    }
}
