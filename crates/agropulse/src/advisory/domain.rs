use serde::{Deserialize, Serialize};

use crate::crop::{GrowthStage, WeatherSnapshot};
use crate::error::ValidationError;
use crate::market::{MarketQuote, MarketScorer, PricePoint};

/// Modal price assumed when the caller supplies no market data.
pub const DEFAULT_MODAL_PRICE: u32 = 2000;

/// Price the farmer is currently seeing at one mandi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandiPriceSnapshot {
    pub modal_price: u32,
    pub market: String,
}

/// Farm context sent by the dashboard with an optional chat question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub crop_type: String,
    pub growth_stage: GrowthStage,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub mandi_prices: Option<MandiPriceSnapshot>,
    #[serde(default)]
    pub markets: Vec<MarketQuote>,
    #[serde(default)]
    pub price_trend: Vec<PricePoint>,
    #[serde(default)]
    pub question: Option<String>,
}

impl AdvisoryRequest {
    pub fn new(crop_type: impl Into<String>, growth_stage: impl Into<GrowthStage>) -> Self {
        Self {
            crop_type: crop_type.into(),
            growth_stage: growth_stage.into(),
            weather: None,
            mandi_prices: None,
            markets: Vec::new(),
            price_trend: Vec::new(),
            question: None,
        }
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_mandi_price(mut self, market: impl Into<String>, modal_price: u32) -> Self {
        self.mandi_prices = Some(MandiPriceSnapshot {
            modal_price,
            market: market.into(),
        });
        self
    }

    pub fn with_markets(mut self, markets: Vec<MarketQuote>) -> Self {
        self.markets = markets;
        self
    }

    pub fn with_price_trend(mut self, price_trend: Vec<PricePoint>) -> Self {
        self.price_trend = price_trend;
        self
    }

    pub fn asking(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.crop_type.trim().is_empty() {
            return Err(ValidationError::new("cropType", "must not be empty"));
        }
        if self.growth_stage.label().trim().is_empty() {
            return Err(ValidationError::new("growthStage", "must not be empty"));
        }
        if let Some(weather) = &self.weather {
            weather.validate()?;
        }
        for quote in &self.markets {
            quote
                .validate()
                .map_err(|err| ValidationError::new("markets", err.to_string()))?;
        }
        Ok(())
    }

    pub fn crop(&self) -> &str {
        self.crop_type.trim()
    }

    /// Supplied weather, or the dashboard default when none was sent.
    pub fn weather_or_fallback(&self) -> WeatherSnapshot {
        self.weather.clone().unwrap_or_else(WeatherSnapshot::fallback)
    }

    /// Non-blank question text.
    pub fn question_text(&self) -> Option<&str> {
        self.question
            .as_deref()
            .map(str::trim)
            .filter(|question| !question.is_empty())
    }

    /// Explicit mandi price, then the best supplied quote, then the default.
    pub fn modal_price(&self, scorer: &MarketScorer) -> u32 {
        if let Some(snapshot) = &self.mandi_prices {
            return snapshot.modal_price;
        }
        scorer
            .best(&self.markets)
            .map(|quote| quote.modal_price)
            .unwrap_or(DEFAULT_MODAL_PRICE)
    }
}
