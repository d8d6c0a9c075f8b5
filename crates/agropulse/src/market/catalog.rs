use super::distance::GeoPoint;
use super::domain::PriceBand;

/// Regulated wholesale market with a fixed location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mandi {
    pub market: &'static str,
    pub state: &'static str,
    pub district: &'static str,
    pub location: GeoPoint,
}

/// Band used for crops missing from the price table.
pub const DEFAULT_PRICE_BAND: PriceBand = PriceBand {
    min_price: 1500,
    max_price: 2500,
    modal_price: 2000,
};

const fn band(min_price: u32, max_price: u32, modal_price: u32) -> PriceBand {
    PriceBand {
        min_price,
        max_price,
        modal_price,
    }
}

const fn mandi(
    market: &'static str,
    state: &'static str,
    district: &'static str,
    latitude: f64,
    longitude: f64,
) -> Mandi {
    Mandi {
        market,
        state,
        district,
        location: GeoPoint::new(latitude, longitude),
    }
}

static MANDIS: [Mandi; 10] = [
    mandi("APMC Azadpur, Delhi", "Delhi", "New Delhi", 28.7041, 77.1025),
    mandi("APMC Vashi, Mumbai", "Maharashtra", "Mumbai", 19.0760, 72.8777),
    mandi("APMC Yeshwanthpur, Bangalore", "Karnataka", "Bangalore", 12.9716, 77.5946),
    mandi("Koyambedu Market, Chennai", "Tamil Nadu", "Chennai", 13.0827, 80.2707),
    mandi("APMC Bhopal", "Madhya Pradesh", "Bhopal", 23.2599, 77.4126),
    mandi("Ghazipur Mandi, Delhi", "Delhi", "East Delhi", 28.6280, 77.3273),
    mandi("APMC Pune", "Maharashtra", "Pune", 18.5204, 73.8567),
    mandi("APMC Ahmedabad", "Gujarat", "Ahmedabad", 23.0225, 72.5714),
    mandi("APMC Jaipur", "Rajasthan", "Jaipur", 26.9124, 75.7873),
    mandi("APMC Lucknow", "Uttar Pradesh", "Lucknow", 26.8467, 80.9462),
];

// ₹/quintal reference bands.
const CROP_PRICES: [(&str, PriceBand); 20] = [
    ("Rice", band(1800, 2400, 2100)),
    ("Wheat", band(2000, 2600, 2300)),
    ("Cotton", band(5500, 7000, 6200)),
    ("Sugarcane", band(280, 350, 315)),
    ("Maize", band(1700, 2200, 1950)),
    ("Soybean", band(3800, 4500, 4100)),
    ("Groundnut", band(4500, 5500, 5000)),
    ("Tomato", band(1500, 3500, 2500)),
    ("Onion", band(1000, 2500, 1800)),
    ("Potato", band(800, 1500, 1100)),
    ("Bajra", band(2000, 2600, 2300)),
    ("Jowar", band(2600, 3400, 3000)),
    ("Barley", band(1700, 2200, 1950)),
    ("Chickpea", band(4800, 5800, 5300)),
    ("Tur", band(6500, 8000, 7200)),
    ("Moong", band(7000, 8500, 7800)),
    ("Mustard", band(4800, 5800, 5400)),
    ("Chilli", band(8000, 12000, 10000)),
    ("Banana", band(1200, 2200, 1700)),
    ("Turmeric", band(6500, 9000, 7800)),
];

/// Reference band for a crop, falling back to [`DEFAULT_PRICE_BAND`].
pub fn base_band(crop: &str) -> PriceBand {
    let crop = crop.trim();
    CROP_PRICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(crop))
        .map(|(_, band)| *band)
        .unwrap_or(DEFAULT_PRICE_BAND)
}

/// Mandis in the requested state; every mandi when the filter is absent or
/// matches nothing.
pub fn mandis_for_state(state: Option<&str>) -> Vec<&'static Mandi> {
    let all = || MANDIS.iter().collect::<Vec<_>>();

    let Some(state) = state.map(str::trim).filter(|state| !state.is_empty()) else {
        return all();
    };

    let filtered: Vec<&'static Mandi> = MANDIS
        .iter()
        .filter(|mandi| mandi.state.eq_ignore_ascii_case(state))
        .collect();

    if filtered.is_empty() {
        all()
    } else {
        filtered
    }
}
