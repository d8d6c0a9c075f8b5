use serde::{Deserialize, Serialize};

use super::domain::{GrowthStage, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Normal,
    Advisory,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub level: AlertLevel,
    pub text: String,
}

/// Weather risks flagged for the field. `level` is the most severe message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub level: AlertLevel,
    pub messages: Vec<AlertMessage>,
}

impl WeatherAlert {
    fn push(&mut self, level: AlertLevel, text: impl Into<String>) {
        self.level = self.level.max(level);
        self.messages.push(AlertMessage {
            level,
            text: text.into(),
        });
    }
}

pub fn analyze_weather(weather: &WeatherSnapshot) -> WeatherAlert {
    let mut alert = WeatherAlert {
        level: AlertLevel::Normal,
        messages: Vec::new(),
    };

    if weather.temperature > 40.0 {
        alert.push(
            AlertLevel::Warning,
            format!(
                "Extreme heat at {}°C: provide shade and irrigate in the evening",
                weather.temperature
            ),
        );
    } else if weather.temperature > 35.0 {
        alert.push(
            AlertLevel::Advisory,
            format!(
                "Heat stress likely at {}°C: monitor soil moisture closely",
                weather.temperature
            ),
        );
    } else if weather.temperature < 10.0 {
        alert.push(
            AlertLevel::Advisory,
            format!(
                "Cold stress possible at {}°C: protect seedlings overnight",
                weather.temperature
            ),
        );
    }

    if weather.rainfall > 50.0 {
        alert.push(
            AlertLevel::Warning,
            format!(
                "Heavy rainfall of {}mm: clear drainage channels to avoid waterlogging",
                weather.rainfall
            ),
        );
    } else if weather.rainfall > 20.0 {
        alert.push(
            AlertLevel::Advisory,
            format!(
                "Moderate rainfall of {}mm: postpone spraying and fertilizer",
                weather.rainfall
            ),
        );
    }

    if weather.humidity > 80.0 {
        alert.push(
            AlertLevel::Advisory,
            format!(
                "High humidity at {}%: fungal disease risk is elevated",
                weather.humidity
            ),
        );
    }

    alert
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationUrgency {
    Skip,
    Low,
    Moderate,
    High,
}

impl IrrigationUrgency {
    pub const fn label(self) -> &'static str {
        match self {
            IrrigationUrgency::Skip => "skip",
            IrrigationUrgency::Low => "low",
            IrrigationUrgency::Moderate => "moderate",
            IrrigationUrgency::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationAdvice {
    pub urgency: IrrigationUrgency,
    pub recommendation: String,
    pub preferred_window: String,
    pub next_irrigation_in_days: u8,
}

pub fn irrigation_advice(weather: &WeatherSnapshot, stage: &GrowthStage) -> IrrigationAdvice {
    let preferred_window = if weather.humidity < 50.0 {
        "evening (5-7 PM)"
    } else {
        "early morning (5-7 AM)"
    }
    .to_string();

    if weather.rainfall > 10.0 {
        return IrrigationAdvice {
            urgency: IrrigationUrgency::Skip,
            recommendation: "Skip irrigation for 2-3 days due to recent rainfall".to_string(),
            preferred_window,
            next_irrigation_in_days: 3,
        };
    }

    let mut urgency = if weather.temperature > 35.0 {
        IrrigationUrgency::High
    } else if weather.humidity < 50.0 {
        IrrigationUrgency::Moderate
    } else {
        IrrigationUrgency::Low
    };

    match stage {
        GrowthStage::Flowering if urgency == IrrigationUrgency::Low => {
            urgency = IrrigationUrgency::Moderate;
        }
        // Heat keeps irrigation urgent even close to harvest.
        GrowthStage::Harvesting if urgency != IrrigationUrgency::High => {
            urgency = IrrigationUrgency::Low;
        }
        _ => {}
    }

    let (recommendation, next_irrigation_in_days) = match (urgency, stage) {
        (IrrigationUrgency::High, _) => (
            format!(
                "Increase watering frequency: {}°C is drying the soil quickly",
                weather.temperature
            ),
            1,
        ),
        (_, GrowthStage::Harvesting) => (
            "Reduce irrigation ahead of harvest to help the crop mature".to_string(),
            4,
        ),
        (IrrigationUrgency::Moderate, GrowthStage::Flowering) => (
            "Keep soil evenly moist during flowering to prevent flower drop".to_string(),
            2,
        ),
        (IrrigationUrgency::Moderate, _) => (
            format!(
                "Dry air at {}% humidity: irrigate every other day",
                weather.humidity
            ),
            2,
        ),
        _ => ("Maintain normal schedule: water every 3-4 days".to_string(), 3),
    };

    IrrigationAdvice {
        urgency,
        recommendation,
        preferred_window,
        next_irrigation_in_days,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Moderate,
    AtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropHealth {
    pub score: u8,
    pub status: HealthStatus,
    pub factors: Vec<String>,
}

pub fn assess_health(
    weather: &WeatherSnapshot,
    stage: &GrowthStage,
    alert: &WeatherAlert,
) -> CropHealth {
    let mut score: i32 = 100;
    let mut factors = Vec::new();

    for message in &alert.messages {
        score -= match message.level {
            AlertLevel::Warning => 20,
            AlertLevel::Advisory => 10,
            AlertLevel::Normal => 0,
        };
        factors.push(message.text.clone());
    }

    if weather.humidity < 30.0 {
        score -= 5;
        factors.push(format!(
            "Low humidity at {}%: watch for moisture stress",
            weather.humidity
        ));
    }

    if !stage.is_recognized() {
        factors.push(format!(
            "Growth stage '{}' is not tracked; health estimate uses weather only",
            stage
        ));
    }

    let score = score.clamp(0, 100) as u8;
    let status = if score >= 75 {
        HealthStatus::Healthy
    } else if score >= 50 {
        HealthStatus::Moderate
    } else {
        HealthStatus::AtRisk
    };

    CropHealth {
        score,
        status,
        factors,
    }
}
