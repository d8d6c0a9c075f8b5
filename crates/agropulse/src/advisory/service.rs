use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::AdvisoryRequest;
use super::generator::{AdviceGenerator, UpstreamError};
use super::intent::QuestionIntent;
use super::prompt::build_prompt;
use super::{AdvisoryEngine, AdvisoryResult};
use crate::error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Echo of the farm context an answer was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorContext {
    pub crop_type: String,
    pub growth_stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<QuestionIntent>,
}

impl AdvisorContext {
    fn from_request(request: &AdvisoryRequest, intent: Option<QuestionIntent>) -> Self {
        Self {
            crop_type: request.crop_type.clone(),
            growth_stage: request.growth_stage.label().to_string(),
            temperature: request.weather.as_ref().map(|weather| weather.temperature),
            humidity: request.weather.as_ref().map(|weather| weather.humidity),
            intent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorReply {
    pub advice: String,
    pub context: AdvisorContext,
}

/// Advisory entry points shared by the HTTP routes and the CLI.
pub struct AdvisoryService<G> {
    engine: AdvisoryEngine,
    generator: Option<G>,
}

impl<G> AdvisoryService<G>
where
    G: AdviceGenerator,
{
    pub fn new(engine: AdvisoryEngine, generator: Option<G>) -> Self {
        Self { engine, generator }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Free-text advice from the upstream model.
    pub async fn consult(&self, request: &AdvisoryRequest) -> Result<AdvisorReply, AdvisoryError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(AdvisoryError::MissingCredential)?;
        request.validate()?;

        info!(
            crop = request.crop(),
            stage = %request.growth_stage,
            has_question = request.question_text().is_some(),
            "advisor request"
        );

        let advice = generator.generate(&build_prompt(request)).await?;

        Ok(AdvisorReply {
            advice,
            context: AdvisorContext::from_request(request, None),
        })
    }

    /// Advice from the local rule engine; never calls upstream.
    pub fn consult_rules(&self, request: &AdvisoryRequest) -> Result<AdvisorReply, AdvisoryError> {
        request.validate()?;
        let answer = self.engine.answer(request);

        info!(
            crop = request.crop(),
            stage = %request.growth_stage,
            intent = answer.intent.label(),
            "rule advice"
        );

        Ok(AdvisorReply {
            advice: answer.advice,
            context: AdvisorContext::from_request(request, Some(answer.intent)),
        })
    }

    pub fn evaluate(&self, request: &AdvisoryRequest) -> Result<AdvisoryResult, AdvisoryError> {
        request.validate()?;
        Ok(self.engine.evaluate(request))
    }
}
