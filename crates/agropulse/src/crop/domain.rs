use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Phase of the crop lifecycle used to condition advice.
///
/// Values outside the four known stages are kept verbatim so that the rule
/// engine can fall back to generic text instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Harvesting,
    Unrecognized(String),
}

impl GrowthStage {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "seedling" => Self::Seedling,
            "vegetative" => Self::Vegetative,
            "flowering" => Self::Flowering,
            "harvesting" => Self::Harvesting,
            _ => Self::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Seedling => "Seedling",
            Self::Vegetative => "Vegetative",
            Self::Flowering => "Flowering",
            Self::Harvesting => "Harvesting",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for GrowthStage {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for GrowthStage {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<GrowthStage> for String {
    fn from(value: GrowthStage) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point-in-time weather reading supplied with each evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    #[serde(default)]
    pub description: String,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
            description: String::new(),
        }
    }

    /// Conditions assumed by the dashboard when no reading is available.
    pub fn fallback() -> Self {
        Self::new(30.0, 60.0, 0.0)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("weather.temperature", self.temperature),
            ("weather.humidity", self.humidity),
            ("weather.rainfall", self.rainfall),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::new(field, "must be a finite number"));
            }
        }

        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(ValidationError::new(
                "weather.humidity",
                format!("must be between 0 and 100, got {}", self.humidity),
            ));
        }

        if self.rainfall < 0.0 {
            return Err(ValidationError::new(
                "weather.rainfall",
                format!("must not be negative, got {}", self.rainfall),
            ));
        }

        Ok(())
    }
}
