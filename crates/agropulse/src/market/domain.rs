use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::distance::DistanceError;
use crate::error::ValidationError;

/// Price quoted for a crop at one mandi on its arrival date, in ₹/quintal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub market: String,
    pub state: String,
    pub district: String,
    #[serde(default)]
    pub crop: String,
    pub min_price: u32,
    pub max_price: u32,
    pub modal_price: u32,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub arrival_date: NaiveDate,
}

impl MarketQuote {
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.min_price > self.modal_price || self.modal_price > self.max_price {
            return Err(MarketError::InvalidQuote {
                market: self.market.clone(),
                reason: format!(
                    "expected min {} <= modal {} <= max {}",
                    self.min_price, self.modal_price, self.max_price
                ),
            });
        }

        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(MarketError::InvalidQuote {
                market: self.market.clone(),
                reason: format!(
                    "distance must be a non-negative number, got {}",
                    self.distance_km
                ),
            });
        }

        Ok(())
    }
}

/// Reference min/max/modal prices a crop is quoted around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBand {
    pub min_price: u32,
    pub max_price: u32,
    pub modal_price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: u32,
}

/// Summary of the highest scoring market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMarket {
    pub name: String,
    pub price: u32,
    pub distance: f64,
    pub recommendation: String,
}

impl BestMarket {
    pub fn from_quote(quote: &MarketQuote) -> Self {
        Self {
            name: quote.market.clone(),
            price: quote.modal_price,
            distance: quote.distance_km,
            recommendation: format!(
                "Best market to sell today: {} at ₹{}/quintal ({} km away)",
                quote.market, quote.modal_price, quote.distance_km
            ),
        }
    }
}

/// Response of a price lookup: ranked quotes, the winner and its trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLookup {
    pub prices: Vec<MarketQuote>,
    pub best_market: BestMarket,
    pub price_trend: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarketError {
    #[error("at least one market quote is required")]
    EmptyQuotes,
    #[error("market quote for {market} is inconsistent: {reason}")]
    InvalidQuote { market: String, reason: String },
    #[error("invalid origin: {0}")]
    Distance(#[from] DistanceError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MarketError {
    /// Whether the failure traces back to request input rather than internal data.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, MarketError::Distance(_) | MarketError::Validation(_))
    }
}
