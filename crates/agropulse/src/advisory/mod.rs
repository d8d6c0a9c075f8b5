//! Farmer advisory: intent classification, the deterministic rule engine and
//! the upstream text generator behind the chat endpoint.

mod domain;
mod generator;
mod intent;
mod prompt;
pub mod router;
mod rules;
mod service;

#[cfg(test)]
mod tests;

pub use domain::{AdvisoryRequest, MandiPriceSnapshot, DEFAULT_MODAL_PRICE};
pub use generator::{AdviceGenerator, GeminiClient, UpstreamError, FALLBACK_ADVICE};
pub use intent::QuestionIntent;
pub use prompt::{build_prompt, DEFAULT_QUESTION};
pub use router::advisory_router;
pub use rules::PriceOutlook;
pub use service::{AdvisorContext, AdvisorReply, AdvisoryError, AdvisoryService};

use serde::{Deserialize, Serialize};

use crate::crop::{
    analyze_weather, assess_health, irrigation_advice, CropHealth, IrrigationAdvice,
    WeatherAlert,
};
use crate::market::{MarketQuote, MarketScorer};
use rules::{respond, RuleInputs};

/// Stateless evaluator turning farm context into advice.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryEngine {
    scorer: MarketScorer,
}

impl AdvisoryEngine {
    pub fn new(scorer: MarketScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &MarketScorer {
        &self.scorer
    }

    /// Answers the request's question, or gives the general summary.
    pub fn answer(&self, request: &AdvisoryRequest) -> AdvisoryAnswer {
        let intent = QuestionIntent::from_question(request.question_text());
        let weather = request.weather_or_fallback();
        let inputs = RuleInputs {
            crop: request.crop(),
            stage: &request.growth_stage,
            weather: &weather,
            modal_price: request.modal_price(&self.scorer),
            outlook: PriceOutlook::from_trend(&request.price_trend),
        };

        AdvisoryAnswer {
            intent,
            advice: respond(intent, &inputs),
        }
    }

    pub fn evaluate(&self, request: &AdvisoryRequest) -> AdvisoryResult {
        let weather = request.weather_or_fallback();
        let stage = &request.growth_stage;

        let irrigation = irrigation_advice(&weather, stage);
        let weather_alert = analyze_weather(&weather);
        let health = assess_health(&weather, stage, &weather_alert);
        let market = self.recommend_market(&request.markets);
        let AdvisoryAnswer { intent, advice } = self.answer(request);

        AdvisoryResult {
            intent,
            irrigation,
            weather_alert,
            health,
            market,
            advice,
        }
    }

    fn recommend_market(&self, quotes: &[MarketQuote]) -> Option<MarketRecommendation> {
        let best = self.scorer.best(quotes).ok()?;
        let score = self.scorer.score_quote(best);

        Some(MarketRecommendation {
            market: best.clone(),
            score,
            rationale: format!(
                "{} pays ₹{}/quintal {} km away, netting {:.0} after ₹{} per km of travel",
                best.market,
                best.modal_price,
                best.distance_km,
                score,
                self.scorer.distance_weight()
            ),
        })
    }
}

/// Chat answer with the intent that selected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryAnswer {
    pub intent: QuestionIntent,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecommendation {
    pub market: MarketQuote,
    pub score: f64,
    pub rationale: String,
}

/// Full dashboard evaluation for one farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResult {
    pub intent: QuestionIntent,
    pub irrigation: IrrigationAdvice,
    pub weather_alert: WeatherAlert,
    pub health: CropHealth,
    pub market: Option<MarketRecommendation>,
    pub advice: String,
}
