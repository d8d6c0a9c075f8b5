use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::catalog::{base_band, mandis_for_state};
use super::distance::{rounded_km, GeoPoint};
use super::domain::{MarketError, MarketQuote, PricePoint};

/// Total width of the quote perturbation around a base price (±10%).
const QUOTE_SPREAD: f64 = 0.2;
/// Total width of the trend perturbation around the modal price (±7.5%).
const TREND_SPREAD: f64 = 0.15;
const MIN_UNKNOWN_DISTANCE_KM: f64 = 50.0;
const MAX_UNKNOWN_DISTANCE_KM: f64 = 250.0;

/// Perturbs `base` by up to half of `spread` in either direction.
pub fn vary_price<R: Rng>(base: u32, spread: f64, rng: &mut R) -> u32 {
    let base = f64::from(base);
    let variation = (rng.random::<f64>() - 0.5) * spread * base;
    (base + variation).round().max(0.0) as u32
}

/// One simulated quote per mandi in the requested state.
pub fn generate_quotes<R: Rng>(
    crop: &str,
    state: Option<&str>,
    origin: Option<GeoPoint>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<MarketQuote>, MarketError> {
    let band = base_band(crop);

    mandis_for_state(state)
        .into_iter()
        .map(|mandi| {
            let distance_km = match origin {
                Some(origin) => f64::from(rounded_km(origin, mandi.location)?),
                None => rng
                    .random_range(MIN_UNKNOWN_DISTANCE_KM..MAX_UNKNOWN_DISTANCE_KM)
                    .round(),
            };

            let mut prices = [
                vary_price(band.min_price, QUOTE_SPREAD, rng),
                vary_price(band.modal_price, QUOTE_SPREAD, rng),
                vary_price(band.max_price, QUOTE_SPREAD, rng),
            ];
            prices.sort_unstable();
            let [min_price, modal_price, max_price] = prices;

            Ok(MarketQuote {
                market: mandi.market.to_string(),
                state: mandi.state.to_string(),
                district: mandi.district.to_string(),
                crop: crop.to_string(),
                min_price,
                max_price,
                modal_price,
                distance_km,
                arrival_date: today,
            })
        })
        .collect()
}

/// Daily modal prices for the `days` ending on `today`, oldest first.
pub fn generate_trend<R: Rng>(
    base_price: u32,
    days: u16,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    (0..i64::from(days))
        .rev()
        .map(|offset| PricePoint {
            date: today - Duration::days(offset),
            price: vary_price(base_price, TREND_SPREAD, rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 16).expect("valid date")
    }

    #[test]
    fn variation_stays_within_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let price = vary_price(2000, QUOTE_SPREAD, &mut rng);
            assert!((1800..=2200).contains(&price), "got {price}");
        }
    }

    #[test]
    fn quotes_respect_price_ordering() {
        let mut rng = StdRng::seed_from_u64(11);
        for crop in ["Tomato", "Onion", "Sugarcane", "Unlisted crop"] {
            let quotes = generate_quotes(crop, None, None, today(), &mut rng).expect("quotes");
            assert_eq!(quotes.len(), 10);
            for quote in &quotes {
                quote.validate().expect("quote invariant holds");
                assert!((50.0..=250.0).contains(&quote.distance_km));
                assert_eq!(quote.arrival_date, today());
            }
        }
    }

    #[test]
    fn origin_distances_use_haversine() {
        let mut rng = StdRng::seed_from_u64(3);
        let pune = GeoPoint::new(18.5204, 73.8567);
        let quotes = generate_quotes("Onion", Some("Maharashtra"), Some(pune), today(), &mut rng)
            .expect("quotes");
        let pune_quote = quotes
            .iter()
            .find(|quote| quote.market == "APMC Pune")
            .expect("pune listed");
        assert_eq!(pune_quote.distance_km, 0.0);
        let mumbai_quote = quotes
            .iter()
            .find(|quote| quote.market == "APMC Vashi, Mumbai")
            .expect("mumbai listed");
        assert_eq!(mumbai_quote.distance_km, 120.0);
    }

    #[test]
    fn invalid_origin_is_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_quotes(
            "Onion",
            None,
            Some(GeoPoint::new(f64::NAN, 73.0)),
            today(),
            &mut rng,
        )
        .expect_err("nan origin rejected");
        assert!(matches!(err, MarketError::Distance(_)));
    }

    #[test]
    fn trend_ends_today_in_date_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let trend = generate_trend(2100, 7, today(), &mut rng);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend.first().map(|point| point.date), Some(today() - Duration::days(6)));
        assert_eq!(trend.last().map(|point| point.date), Some(today()));
        assert!(trend.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert!(trend
            .iter()
            .all(|point| (1942..=2258).contains(&point.price)));
    }
}
