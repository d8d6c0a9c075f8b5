use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::distance::GeoPoint;
use super::domain::PriceLookup;
use super::service::{MarketService, PriceQuery, DEFAULT_TREND_DAYS};
use crate::error::{AppError, ValidationError};

/// Router exposing the mandi price lookup.
pub fn market_router(service: Arc<MarketService>) -> Router {
    Router::new()
        .route("/api/v1/market/prices", post(prices_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRequest {
    crop: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    days: Option<u16>,
}

impl TryFrom<PriceRequest> for PriceQuery {
    type Error = ValidationError;

    fn try_from(request: PriceRequest) -> Result<Self, Self::Error> {
        let origin = match (request.lat, request.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    "location",
                    "lat and lon must be provided together",
                ))
            }
        };

        Ok(PriceQuery {
            crop: request.crop,
            state: request.state,
            origin,
            days: request.days.unwrap_or(DEFAULT_TREND_DAYS),
        })
    }
}

async fn prices_handler(
    State(service): State<Arc<MarketService>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<PriceLookup>, AppError> {
    let Json(request) = payload?;
    let query = PriceQuery::try_from(request)?;
    let lookup = service.lookup_now(&query)?;
    Ok(Json(lookup))
}
