use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::Router;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::advisory::{
    advisory_router, AdviceGenerator, AdvisoryEngine, AdvisoryRequest, AdvisoryService,
    UpstreamError,
};
use crate::crop::WeatherSnapshot;
use crate::market::{MarketQuote, PricePoint};

/// Generator double that records prompts and replays a canned outcome.
pub(super) struct StubGenerator {
    outcome: Result<String, UpstreamError>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub(super) fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(error: UpstreamError) -> Self {
        Self {
            outcome: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }
}

impl AdviceGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.to_string());
        self.outcome.clone()
    }
}

impl AdviceGenerator for Arc<StubGenerator> {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        (**self).generate(prompt).await
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

pub(super) fn quote(market: &str, modal_price: u32, distance_km: f64) -> MarketQuote {
    MarketQuote {
        market: market.to_string(),
        state: "Maharashtra".to_string(),
        district: "Pune".to_string(),
        crop: "Rice".to_string(),
        min_price: modal_price.saturating_sub(200),
        max_price: modal_price + 200,
        modal_price,
        distance_km,
        arrival_date: today(),
    }
}

/// Daily points ending today, oldest first.
pub(super) fn trend(prices: &[u32]) -> Vec<PricePoint> {
    let last = prices.len() as i64 - 1;
    prices
        .iter()
        .enumerate()
        .map(|(index, price)| PricePoint {
            date: today() - Duration::days(last - index as i64),
            price: *price,
        })
        .collect()
}

pub(super) fn hot_dry_weather() -> WeatherSnapshot {
    WeatherSnapshot::new(38.0, 40.0, 0.0).with_description("Clear sky")
}

pub(super) fn rice_harvest_request() -> AdvisoryRequest {
    AdvisoryRequest::new("Rice", "Harvesting")
        .with_weather(hot_dry_weather())
        .asking("best time to sell")
}

pub(super) fn engine() -> AdvisoryEngine {
    AdvisoryEngine::default()
}

pub(super) fn service_with(
    generator: Option<Arc<StubGenerator>>,
) -> Arc<AdvisoryService<Arc<StubGenerator>>> {
    Arc::new(AdvisoryService::new(engine(), generator))
}

pub(super) fn router_with(generator: Option<Arc<StubGenerator>>) -> Router {
    advisory_router(service_with(generator))
}

pub(super) fn json_request(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
