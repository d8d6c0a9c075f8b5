//! Mandi price lookup: the market catalog, mock quote generation, the
//! price-minus-distance scorer and the haversine distance it depends on.

mod catalog;
pub mod distance;
pub mod domain;
mod generator;
pub mod router;
mod scorer;
mod service;

pub use catalog::{base_band, mandis_for_state, Mandi, DEFAULT_PRICE_BAND};
pub use distance::{haversine_km, rounded_km, DistanceError, GeoPoint, EARTH_RADIUS_KM};
pub use domain::{BestMarket, MarketError, MarketQuote, PriceBand, PriceLookup, PricePoint};
pub use generator::{generate_quotes, generate_trend, vary_price};
pub use router::market_router;
pub use scorer::{MarketScorer, DEFAULT_DISTANCE_WEIGHT};
pub use service::{MarketService, PriceQuery, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
