use super::common::*;

use crate::advisory::{AdvisoryRequest, PriceOutlook, QuestionIntent};
use crate::crop::{IrrigationUrgency, WeatherSnapshot};

#[test]
fn hot_weather_increases_watering() {
    let request = AdvisoryRequest::new("Cotton", "Vegetative")
        .with_weather(hot_dry_weather())
        .asking("When should I irrigate?");
    let answer = engine().answer(&request);

    assert_eq!(answer.intent, QuestionIntent::Irrigation);
    assert!(answer.advice.contains("increase watering frequency"));
    assert!(answer.advice.contains("consider evening irrigation"));
    assert!(answer.advice.contains("Water every 3-4 days"));
}

#[test]
fn mild_wet_weather_keeps_schedule() {
    let request = AdvisoryRequest::new("Cotton", "Vegetative")
        .with_weather(WeatherSnapshot::new(35.0, 65.0, 12.0))
        .asking("irrigation?");
    let advice = engine().answer(&request).advice;

    assert!(advice.contains("maintain normal schedule"));
    assert!(advice.contains("morning watering preferred"));
    assert!(advice.contains("Skip irrigation for 2-3 days due to recent rainfall"));
}

#[test]
fn boundary_humidity_and_rainfall_keep_the_default_schedule() {
    let request = AdvisoryRequest::new("Maize", "Vegetative")
        .with_weather(WeatherSnapshot::new(30.0, 50.0, 10.0))
        .asking("Should I irrigate today?");
    let advice = engine().answer(&request).advice;

    assert!(advice.contains("morning watering preferred"));
    assert!(advice.contains("Water every 3-4 days"));
    assert!(!advice.contains("Skip irrigation"));
}

#[test]
fn evaluate_irrigation_agrees_with_chat_in_the_heat() {
    for stage in ["Seedling", "Vegetative", "Flowering", "Harvesting"] {
        let request = AdvisoryRequest::new("Rice", stage)
            .with_weather(hot_dry_weather())
            .asking("When should I irrigate?");
        let result = engine().evaluate(&request);

        assert!(result.advice.contains("increase watering frequency"), "{stage}");
        assert_eq!(result.irrigation.urgency, IrrigationUrgency::High, "{stage}");
        assert!(
            result
                .irrigation
                .recommendation
                .starts_with("Increase watering frequency"),
            "{stage}: {}",
            result.irrigation.recommendation
        );
    }
}

#[test]
fn harvest_stage_recommends_selling_now() {
    let answer = engine().answer(&rice_harvest_request());

    assert_eq!(answer.intent, QuestionIntent::Market);
    assert!(answer.advice.contains("Market Analysis for Rice"));
    assert!(answer.advice.contains("Sell now"));
    assert!(!answer.advice.contains("Wait until harvesting stage"));
}

#[test]
fn pre_harvest_market_advice_is_reproducible() {
    let request = AdvisoryRequest::new("Rice", "Flowering")
        .with_weather(hot_dry_weather())
        .with_price_trend(trend(&[2000, 2010, 2100, 2120]))
        .asking("Should I sell?");

    let first = engine().answer(&request).advice;
    let second = engine().answer(&request).advice;

    assert_eq!(first, second);
    assert!(first.contains("Wait until harvesting stage."));
    assert!(first.contains("may increase further"));
}

#[test]
fn missing_trend_reports_insufficient_history() {
    let request = AdvisoryRequest::new("Wheat", "Vegetative").asking("market price?");
    let advice = engine().answer(&request).advice;
    assert!(advice.contains("Insufficient price history"));
    assert!(advice.contains("₹2000/quintal"));
}

#[test]
fn outlook_compares_older_and_newer_halves() {
    assert!(matches!(
        PriceOutlook::from_trend(&trend(&[2000, 2000, 2100, 2100])),
        PriceOutlook::Rising { change_pct, days: 4 } if (change_pct - 5.0).abs() < 1e-9
    ));
    assert!(matches!(
        PriceOutlook::from_trend(&trend(&[2100, 2100, 2000, 2000])),
        PriceOutlook::Falling { days: 4, .. }
    ));
    assert!(matches!(
        PriceOutlook::from_trend(&trend(&[2000, 2050, 2010, 2020])),
        PriceOutlook::Stable { .. }
    ));
    assert!(matches!(
        PriceOutlook::from_trend(&trend(&[2000, 9999, 2000])),
        PriceOutlook::Stable { days: 3, .. }
    ));
    assert_eq!(
        PriceOutlook::from_trend(&trend(&[2000])),
        PriceOutlook::InsufficientData
    );
}

#[test]
fn outlook_ignores_input_order() {
    let mut shuffled = trend(&[2000, 2000, 2100, 2100]);
    shuffled.reverse();
    assert!(matches!(
        PriceOutlook::from_trend(&shuffled),
        PriceOutlook::Rising { .. }
    ));
}

#[test]
fn pest_branch_flags_high_humidity() {
    let request = AdvisoryRequest::new("Tomato", "Flowering")
        .with_weather(WeatherSnapshot::new(28.0, 75.0, 4.0))
        .asking("How do I stop this disease?");
    let advice = engine().answer(&request).advice;

    assert!(advice.contains("High humidity - watch for fungal diseases"));
    assert!(advice.contains("neem-based organic pesticide"));
    assert!(advice.contains("spacing between plants"));
}

#[test]
fn flowering_fertilizer_focuses_on_phosphorus_and_potassium() {
    let request = AdvisoryRequest::new("Soybean", "Flowering").asking("fertilizer plan");
    let advice = engine().answer(&request).advice;

    assert!(advice.contains("phosphorus and potassium"));
    assert!(advice.contains("Avoid excess nitrogen"));
    assert!(!advice.contains("starter fertilizer"));
    assert!(advice.contains(
        "• Avoid excess nitrogen to prevent flower drop\n\nSustainable tip:"
    ));
}

#[test]
fn unknown_stage_fertilizer_has_no_stage_line() {
    let request = AdvisoryRequest::new("Soybean", "Ripening").asking("fertilizer?");
    let advice = engine().answer(&request).advice;

    assert_eq!(
        advice,
        "Fertilizer Schedule for Soybean (Ripening):\n\n\n\n\
         Sustainable tip: Consider organic compost to improve soil health."
    );
    assert!(!advice.contains('•'));
}

#[test]
fn general_summary_uses_dashboard_defaults() {
    let advice = engine()
        .answer(&AdvisoryRequest::new("Maize", "Seedling"))
        .advice;

    assert!(advice.contains("• Weather: 30°C, 60% humidity"));
    assert!(advice.contains("• Market Price: ₹2000/quintal"));
    assert!(advice.contains("1. Maintain regular watering"));
}

#[test]
fn evaluate_combines_every_signal() {
    let request = rice_harvest_request().with_markets(vec![
        quote("APMC Vashi, Mumbai", 2300, 40.0),
        quote("APMC Pune", 2150, 3.0),
    ]);
    let result = engine().evaluate(&request);

    assert_eq!(result.intent, QuestionIntent::Market);
    assert_eq!(result.irrigation.urgency, IrrigationUrgency::High);
    assert_eq!(result.irrigation.next_irrigation_in_days, 1);
    assert_eq!(result.health.score, 90);

    let market = result.market.expect("quotes supplied");
    assert_eq!(market.market.market, "APMC Pune");
    assert_eq!(market.score, 2120.0);
    assert!(market.rationale.starts_with("APMC Pune pays ₹2150/quintal"));
    assert!(result.advice.contains("Current price: ₹2150/quintal"));
}

#[test]
fn evaluate_without_quotes_has_no_market() {
    let result = engine().evaluate(&AdvisoryRequest::new("Onion", "Vegetative"));
    assert!(result.market.is_none());
    assert_eq!(result.intent, QuestionIntent::General);
}
