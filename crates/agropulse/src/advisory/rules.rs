use serde::{Deserialize, Serialize};

use super::intent::QuestionIntent;
use crate::crop::{GrowthStage, WeatherSnapshot};
use crate::market::PricePoint;

/// Relative move between the older and newer halves of a series that still
/// counts as stable, in percent.
const STABLE_BAND_PCT: f64 = 3.0;

/// Direction of recent prices, derived from the supplied trend only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum PriceOutlook {
    Rising { change_pct: f64, days: usize },
    Stable { change_pct: f64, days: usize },
    Falling { change_pct: f64, days: usize },
    InsufficientData,
}

impl PriceOutlook {
    /// Compares the mean of the older half of the series with the newer half.
    /// With an odd number of points the middle one is ignored.
    pub fn from_trend(trend: &[PricePoint]) -> Self {
        if trend.len() < 2 {
            return PriceOutlook::InsufficientData;
        }

        let mut points = trend.to_vec();
        points.sort_by_key(|point| point.date);

        let half = points.len() / 2;
        let older = mean_price(&points[..half]);
        let newer = mean_price(&points[points.len() - half..]);
        if older <= 0.0 {
            return PriceOutlook::InsufficientData;
        }

        let change_pct = (newer - older) / older * 100.0;
        let days = points.len();
        if change_pct > STABLE_BAND_PCT {
            PriceOutlook::Rising { change_pct, days }
        } else if change_pct < -STABLE_BAND_PCT {
            PriceOutlook::Falling { change_pct, days }
        } else {
            PriceOutlook::Stable { change_pct, days }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PriceOutlook::Rising { change_pct, days } => format!(
                "Prices rose {change_pct:.1}% over the last {days} days and may increase further in coming weeks."
            ),
            PriceOutlook::Stable { days, .. } => format!(
                "Prices held steady over the last {days} days and are likely to stabilize in coming weeks."
            ),
            PriceOutlook::Falling { change_pct, days } => format!(
                "Prices fell {:.1}% over the last {days} days. Monitor them closely before committing.",
                change_pct.abs()
            ),
            PriceOutlook::InsufficientData => {
                "Insufficient price history to judge the trend. Monitor prices in coming weeks."
                    .to_string()
            }
        }
    }
}

fn mean_price(points: &[PricePoint]) -> f64 {
    let total: f64 = points.iter().map(|point| f64::from(point.price)).sum();
    total / points.len() as f64
}

/// Everything a rule branch may read.
pub(crate) struct RuleInputs<'a> {
    pub crop: &'a str,
    pub stage: &'a GrowthStage,
    pub weather: &'a WeatherSnapshot,
    pub modal_price: u32,
    pub outlook: PriceOutlook,
}

pub(crate) fn respond(intent: QuestionIntent, inputs: &RuleInputs<'_>) -> String {
    match intent {
        QuestionIntent::Irrigation => irrigation(inputs),
        QuestionIntent::Market => market_timing(inputs),
        QuestionIntent::Pest => pest_and_disease(inputs),
        QuestionIntent::Fertilizer => fertilizer(inputs),
        QuestionIntent::General => general(inputs),
    }
}

fn irrigation(inputs: &RuleInputs<'_>) -> String {
    let weather = inputs.weather;
    let heat = if weather.temperature > 35.0 {
        "increase watering frequency"
    } else {
        "maintain normal schedule"
    };
    let timing = if weather.humidity < 50.0 {
        "consider evening irrigation"
    } else {
        "morning watering preferred"
    };
    let rain = if weather.rainfall > 10.0 {
        "Skip irrigation for 2-3 days due to recent rainfall"
    } else {
        "Water every 3-4 days"
    };

    format!(
        "Based on current conditions for your {crop} in {stage} stage:\n\n\
         • Temperature is {temperature}°C - {heat}\n\
         • Humidity at {humidity}% - {timing}\n\
         • {rain}\n\n\
         Recommended: Deep watering in early morning (5-7 AM) for best absorption.",
        crop = inputs.crop,
        stage = inputs.stage,
        temperature = weather.temperature,
        humidity = weather.humidity,
    )
}

fn market_timing(inputs: &RuleInputs<'_>) -> String {
    let recommendation = match inputs.stage {
        GrowthStage::Harvesting => "Sell now. Prices look favorable; consider selling at APMC \
             markets within 10km for best returns."
            .to_string(),
        _ => format!("Wait until harvesting stage. {}", inputs.outlook.describe()),
    };

    format!(
        "Market Analysis for {crop}:\n\n\
         • Current price: ₹{price}/quintal\n\
         • Growth stage: {stage}\n\n\
         Recommendation: {recommendation}",
        crop = inputs.crop,
        price = inputs.modal_price,
        stage = inputs.stage,
    )
}

fn pest_and_disease(inputs: &RuleInputs<'_>) -> String {
    let humidity = if inputs.weather.humidity > 70.0 {
        "High humidity - watch for fungal diseases"
    } else {
        "Humidity levels normal"
    };

    format!(
        "Pest & Disease Prevention for {crop} ({stage} stage):\n\n\
         • {humidity}\n\
         • Regular field inspection recommended\n\
         • Apply neem-based organic pesticide every 15 days\n\n\
         Tip: Maintain proper spacing between plants for air circulation.",
        crop = inputs.crop,
        stage = inputs.stage,
    )
}

fn fertilizer_schedule(stage: &GrowthStage) -> &'static [&'static str] {
    match stage {
        GrowthStage::Seedling => &["Apply starter fertilizer (DAP) after 7-10 days"],
        GrowthStage::Vegetative => &[
            "Apply nitrogen-rich urea for leaf growth",
            "Split application: 50% now, 50% after 20 days",
        ],
        GrowthStage::Flowering => &[
            "Focus on phosphorus and potassium",
            "Avoid excess nitrogen to prevent flower drop",
        ],
        GrowthStage::Harvesting => &[
            "Stop fertilizer application",
            "Focus on water management only",
        ],
        GrowthStage::Unrecognized(_) => &[],
    }
}

fn fertilizer(inputs: &RuleInputs<'_>) -> String {
    let schedule = fertilizer_schedule(inputs.stage)
        .iter()
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Fertilizer Schedule for {crop} ({stage}):\n\n\
         {schedule}\n\n\
         Sustainable tip: Consider organic compost to improve soil health.",
        crop = inputs.crop,
        stage = inputs.stage,
    )
}

fn general(inputs: &RuleInputs<'_>) -> String {
    let weather = inputs.weather;
    let watering = if weather.temperature > 35.0 {
        "Increase irrigation due to heat"
    } else {
        "Maintain regular watering"
    };

    format!(
        "Here's my analysis for your {crop} farm:\n\n\
         Current Conditions:\n\
         • Growth Stage: {stage}\n\
         • Weather: {temperature}°C, {humidity}% humidity\n\
         • Market Price: ₹{price}/quintal\n\n\
         General Recommendations:\n\
         1. {watering}\n\
         2. Monitor crop health daily\n\
         3. Check market prices before selling\n\n\
         Ask me specific questions about irrigation, fertilizers, pest control, or market timing!",
        crop = inputs.crop,
        stage = inputs.stage,
        temperature = weather.temperature,
        humidity = weather.humidity,
        price = inputs.modal_price,
    )
}
