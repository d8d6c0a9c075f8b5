//! End-to-end advisory scenarios driven through the public engine and scorer.

use chrono::NaiveDate;

use agropulse::advisory::{AdvisoryEngine, AdvisoryRequest, PriceOutlook, QuestionIntent};
use agropulse::crop::{GrowthStage, WeatherSnapshot};
use agropulse::market::{MarketQuote, MarketScorer, PricePoint};

fn quote(market: &str, modal_price: u32, distance_km: f64) -> MarketQuote {
    MarketQuote {
        market: market.to_string(),
        state: "Maharashtra".to_string(),
        district: "Pune".to_string(),
        crop: "Rice".to_string(),
        min_price: modal_price.saturating_sub(200),
        max_price: modal_price + 200,
        modal_price,
        distance_km,
        arrival_date: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
    }
}

fn quotes() -> Vec<MarketQuote> {
    vec![
        quote("APMC Vashi, Mumbai", 2400, 120.0),
        quote("APMC Pune", 2200, 8.0),
        quote("APMC Bhopal", 2500, 600.0),
        quote("APMC Ahmedabad", 2300, 420.0),
    ]
}

#[test]
fn harvested_rice_is_told_to_sell_at_the_nearest_strong_market() {
    let request = AdvisoryRequest::new("Rice", "harvesting")
        .with_weather(WeatherSnapshot::new(29.0, 55.0, 0.0))
        .with_markets(quotes())
        .asking("When should I sell my rice?");
    request.validate().expect("valid request");

    let result = AdvisoryEngine::default().evaluate(&request);

    assert_eq!(result.intent, QuestionIntent::Market);
    assert!(result.advice.contains("Sell now"), "{}", result.advice);

    let market = result.market.expect("a market is recommended");
    assert_eq!(market.market.market, "APMC Pune");
    assert_eq!(market.score, 2120.0);
    assert!(market.rationale.starts_with("APMC Pune pays ₹2200/quintal"));
}

#[test]
fn growing_crop_waits_and_reports_the_trend() {
    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 10, d).expect("valid date");
    let trend = vec![
        PricePoint { date: day(1), price: 2000 },
        PricePoint { date: day(2), price: 2000 },
        PricePoint { date: day(3), price: 2200 },
        PricePoint { date: day(4), price: 2200 },
    ];

    let request = AdvisoryRequest::new("Wheat", GrowthStage::Vegetative)
        .with_price_trend(trend.clone())
        .asking("Is the market good for selling?");
    let answer = AdvisoryEngine::default().answer(&request);

    assert_eq!(answer.intent, QuestionIntent::Market);
    assert!(answer.advice.contains("Wait until harvesting stage"));
    assert!(matches!(
        PriceOutlook::from_trend(&trend),
        PriceOutlook::Rising { .. }
    ));
}

#[test]
fn best_market_does_not_depend_on_quote_order() {
    let scorer = MarketScorer::default();
    let mut quotes = quotes();
    let expected = scorer.best(&quotes).expect("non-empty").market.clone();

    for _ in 0..quotes.len() {
        quotes.rotate_left(1);
        assert_eq!(scorer.best(&quotes).expect("non-empty").market, expected);

        let ranked = scorer.rank(quotes.clone());
        assert_eq!(ranked[0].market, expected);
    }

    quotes.reverse();
    assert_eq!(scorer.best(&quotes).expect("non-empty").market, expected);
}

#[test]
fn heavier_distance_weight_favours_closer_markets() {
    let far_but_rich = quote("APMC Bhopal", 2600, 50.0);
    let near = quote("APMC Pune", 2300, 5.0);
    let quotes = vec![far_but_rich, near];

    assert_eq!(
        MarketScorer::new(1.0).best(&quotes).expect("non-empty").market,
        "APMC Bhopal"
    );
    assert_eq!(
        MarketScorer::new(10.0).best(&quotes).expect("non-empty").market,
        "APMC Pune"
    );
}
