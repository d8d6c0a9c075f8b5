use super::domain::{MarketError, MarketQuote};

/// Rupees of modal price given up per kilometre of travel.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 10.0;

/// Ranks markets by `modal_price - distance_km * weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketScorer {
    distance_weight: f64,
}

impl MarketScorer {
    pub fn new(distance_weight: f64) -> Self {
        Self { distance_weight }
    }

    pub fn distance_weight(&self) -> f64 {
        self.distance_weight
    }

    pub fn score(&self, modal_price: u32, distance_km: f64) -> f64 {
        f64::from(modal_price) - distance_km * self.distance_weight
    }

    pub fn score_quote(&self, quote: &MarketQuote) -> f64 {
        self.score(quote.modal_price, quote.distance_km)
    }

    /// Highest scoring quote. On ties the earliest quote wins.
    pub fn best<'a>(&self, quotes: &'a [MarketQuote]) -> Result<&'a MarketQuote, MarketError> {
        let (first, rest) = quotes.split_first().ok_or(MarketError::EmptyQuotes)?;

        let mut best = first;
        let mut best_score = self.score_quote(first);
        for quote in rest {
            let score = self.score_quote(quote);
            if score > best_score {
                best = quote;
                best_score = score;
            }
        }

        Ok(best)
    }

    /// Quotes ordered from best to worst; equal scores keep their input order.
    pub fn rank(&self, mut quotes: Vec<MarketQuote>) -> Vec<MarketQuote> {
        quotes.sort_by(|a, b| self.score_quote(b).total_cmp(&self.score_quote(a)));
        quotes
    }
}

impl Default for MarketScorer {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(market: &str, modal_price: u32, distance_km: f64) -> MarketQuote {
        MarketQuote {
            market: market.to_string(),
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
            crop: "Onion".to_string(),
            min_price: modal_price.saturating_sub(300),
            max_price: modal_price + 300,
            modal_price,
            distance_km,
            arrival_date: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
        }
    }

    #[test]
    fn distance_costs_ten_rupees_per_km() {
        let scorer = MarketScorer::default();
        assert_eq!(scorer.score(2000, 15.0), 1850.0);
    }

    #[test]
    fn nearer_market_beats_slightly_higher_price() {
        let quotes = vec![quote("far", 2100, 60.0), quote("near", 2000, 5.0)];
        let best = MarketScorer::default().best(&quotes).expect("non-empty");
        assert_eq!(best.market, "near");
    }

    #[test]
    fn ties_keep_the_earlier_quote() {
        let quotes = vec![
            quote("first", 2000, 10.0),
            quote("second", 2100, 20.0),
            quote("third", 1900, 0.0),
        ];
        let scorer = MarketScorer::default();
        assert_eq!(scorer.best(&quotes).expect("non-empty").market, "first");

        let ranked = scorer.rank(quotes);
        let order: Vec<_> = ranked.iter().map(|quote| quote.market.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = MarketScorer::default().best(&[]).expect_err("empty rejected");
        assert_eq!(err, MarketError::EmptyQuotes);
    }

    #[test]
    fn zero_weight_ranks_by_price_only() {
        let quotes = vec![quote("near", 2000, 1.0), quote("far", 2400, 400.0)];
        let best = MarketScorer::new(0.0).best(&quotes).expect("non-empty");
        assert_eq!(best.market, "far");
    }
}
