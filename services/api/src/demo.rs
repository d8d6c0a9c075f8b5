use crate::infra::{
    advisory_service, market_service, parse_date, parse_stage, InMemoryProfileStore,
};
use agropulse::advisory::{
    AdvisoryEngine, AdvisoryRequest, AdvisoryResult, MarketRecommendation,
};
use agropulse::config::AppConfig;
use agropulse::crop::{CropCalendar, GrowthStage, WeatherSnapshot};
use agropulse::error::AppError;
use agropulse::market::{
    GeoPoint, MarketScorer, MarketService, PriceLookup, PriceQuery, DEFAULT_TREND_DAYS,
};
use agropulse::profile::{
    FarmDetails, FarmerProfile, JsonFileProfileStore, ProfileRecord, ProfileStore, Season,
};
use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Args, Debug)]
pub(crate) struct PricesArgs {
    /// Crop to price, e.g. Onion
    pub(crate) crop: String,
    /// Limit the lookup to mandis in this state
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Farm latitude in decimal degrees (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub(crate) lat: Option<f64>,
    /// Farm longitude in decimal degrees (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub(crate) lon: Option<f64>,
    /// Days of price history to include
    #[arg(long, default_value_t = DEFAULT_TREND_DAYS)]
    pub(crate) days: u16,
    /// Print the response payload as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AdviseArgs {
    /// Crop being grown
    #[arg(long)]
    pub(crate) crop: String,
    /// Growth stage: Seedling, Vegetative, Flowering or Harvesting
    #[arg(long, value_parser = parse_stage)]
    pub(crate) stage: GrowthStage,
    #[command(flatten)]
    pub(crate) weather: WeatherArgs,
    /// Current modal price in ₹/quintal
    #[arg(long)]
    pub(crate) price: Option<u32>,
    /// Market the price was quoted at
    #[arg(long, default_value = "local mandi")]
    pub(crate) market: String,
    /// Question for the advisor
    #[arg(long)]
    pub(crate) question: Option<String>,
    /// Ask the upstream model instead of the local rules (needs GEMINI_API_KEY)
    #[arg(long)]
    pub(crate) upstream: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) weather: WeatherArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct WeatherArgs {
    /// Air temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) temperature: Option<f64>,
    /// Relative humidity in percent
    #[arg(long)]
    pub(crate) humidity: Option<f64>,
    /// Recent rainfall in mm
    #[arg(long)]
    pub(crate) rainfall: Option<f64>,
}

impl WeatherArgs {
    /// Supplied readings over the dashboard defaults, or `None` when nothing was given.
    fn snapshot(&self) -> Option<WeatherSnapshot> {
        if self.temperature.is_none() && self.humidity.is_none() && self.rainfall.is_none() {
            return None;
        }
        let fallback = WeatherSnapshot::fallback();
        Some(WeatherSnapshot::new(
            self.temperature.unwrap_or(fallback.temperature),
            self.humidity.unwrap_or(fallback.humidity),
            self.rainfall.unwrap_or(fallback.rainfall),
        ))
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for the simulated mandi prices
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
}

pub(crate) fn run_prices(args: PricesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = market_service(&config);

    let mut query = PriceQuery::new(args.crop).over_days(args.days);
    if let Some(state) = args.state {
        query = query.in_state(state);
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        query = query.from_origin(GeoPoint::new(lat, lon));
    }

    let lookup = service.lookup_now(&query)?;
    if args.json {
        match serde_json::to_string_pretty(&lookup) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Price payload unavailable: {err}"),
        }
    } else {
        render_prices(&query.crop, &lookup, service.scorer());
    }
    Ok(())
}

pub(crate) async fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = advisory_service(&config);

    let mut request = AdvisoryRequest::new(args.crop, args.stage);
    if let Some(weather) = args.weather.snapshot() {
        request = request.with_weather(weather);
    }
    if let Some(price) = args.price {
        request = request.with_mandi_price(args.market, price);
    }
    if let Some(question) = args.question {
        request = request.asking(question);
    }

    let reply = if args.upstream {
        service.consult(&request).await?
    } else {
        service.consult_rules(&request)?
    };

    if let Some(intent) = reply.context.intent {
        println!("[{}]", intent.label());
    }
    println!("{}", reply.advice);
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = JsonFileProfileStore::new(config.profile.path.clone());
    let market = MarketService::from_config(&config.market);
    let engine = AdvisoryEngine::new(*market.scorer());
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    render_dashboard(
        &store,
        &market,
        &engine,
        args.weather.snapshot(),
        today,
        &mut rand::rng(),
    )
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut rng = StdRng::seed_from_u64(args.seed);
    let market = MarketService::default();
    let engine = AdvisoryEngine::default();

    println!("AgroPulse demo");
    let store = InMemoryProfileStore::default();
    let record = demo_profile(today);
    store.save(&record)?;
    println!(
        "- Registered {} ({}, {}) growing {}",
        record.farmer.name,
        record.farmer.district,
        record.farmer.state,
        record
            .farm
            .as_ref()
            .map(|farm| farm.crop_type.as_str())
            .unwrap_or("nothing yet")
    );

    println!();
    let weather = WeatherSnapshot::new(37.0, 45.0, 0.0).with_description("Hot and dry");
    render_dashboard(&store, &market, &engine, Some(weather.clone()), today, &mut rng)?;

    println!("\nAdvisor questions");
    for question in [
        "When should I irrigate?",
        "Is this a good time to sell?",
        "Any pest risk this week?",
        "Which fertilizer should I use?",
    ] {
        let request = AdvisoryRequest::new("Onion", GrowthStage::Flowering)
            .with_weather(weather.clone())
            .with_mandi_price("APMC Pune", 1850)
            .asking(question);
        let answer = engine.answer(&request);
        println!("\n> {question} [{}]", answer.intent.label());
        println!("{}", answer.advice);
    }

    Ok(())
}

fn demo_profile(today: NaiveDate) -> ProfileRecord {
    let created_at = Utc
        .from_utc_datetime(&today.and_hms_opt(9, 0, 0).unwrap_or_default());
    let mut farmer = FarmerProfile::new("Sunita Jadhav", "sunita@example.in", created_at);
    farmer.phone = "+91 98220 00000".to_string();
    farmer.state = "Maharashtra".to_string();
    farmer.district = "Pune".to_string();
    farmer.latitude = 18.73;
    farmer.longitude = 73.67;

    let farm = FarmDetails {
        id: format!("farm_{}", created_at.timestamp_millis()),
        farmer_id: farmer.id.clone(),
        crop_type: "Onion".to_string(),
        sowing_date: today - Duration::days(70),
        season: Season::Kharif,
        farm_size: 2.5,
        farm_size_unit: "acres".to_string(),
    };

    ProfileRecord::new(farmer).with_farm(farm)
}

pub(crate) fn render_dashboard<S, R>(
    store: &S,
    market: &MarketService,
    engine: &AdvisoryEngine,
    weather: Option<WeatherSnapshot>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<(), AppError>
where
    S: ProfileStore,
    R: Rng,
{
    let Some(record) = store.load()? else {
        println!("No farmer profile saved. Run `agropulse-api profile register` first.");
        return Ok(());
    };
    let Some(farm) = record.farm.as_ref() else {
        println!(
            "Profile for {} has no farm details yet. Register a crop to see the dashboard.",
            record.farmer.name
        );
        return Ok(());
    };

    let growth = farm.growth(&CropCalendar::standard(), today);
    println!("Dashboard for {} on {}", record.farmer.name, today);
    println!(
        "- {} ({} season, {} {}) sown {}",
        farm.crop_type, farm.season, farm.farm_size, farm.farm_size_unit, farm.sowing_date
    );
    println!(
        "- Day {} of {} | {} stage | {}% complete | {} days to harvest",
        growth.days_since_sowing,
        growth.cycle_days,
        growth.stage,
        growth.progress_pct,
        growth.days_to_harvest
    );

    let mut query = PriceQuery::new(farm.crop_type.clone());
    if let Some(state) = record.farmer.state_filter() {
        query = query.in_state(state);
    }
    if let Some(origin) = record.farmer.location() {
        query = query.from_origin(origin);
    }
    let lookup = market.lookup(&query, today, rng)?;

    let mut request = AdvisoryRequest::new(farm.crop_type.clone(), growth.stage.clone())
        .with_markets(lookup.prices.clone())
        .with_price_trend(lookup.price_trend.clone());
    if let Some(weather) = weather {
        request = request.with_weather(weather);
    }
    request.validate()?;
    let result = engine.evaluate(&request);

    render_conditions(&request.weather_or_fallback(), &result);
    println!();
    render_prices(&farm.crop_type, &lookup, engine.scorer());
    if let Some(recommendation) = &result.market {
        render_recommendation(recommendation);
    }
    println!("\nAdvisor summary\n{}", result.advice);
    Ok(())
}

fn render_conditions(weather: &WeatherSnapshot, result: &AdvisoryResult) {
    println!(
        "\nField conditions: {}°C, {}% humidity, {}mm rain",
        weather.temperature, weather.humidity, weather.rainfall
    );
    println!(
        "- Irrigation: {} urgency, next in {} day(s), best window {}",
        result.irrigation.urgency.label(),
        result.irrigation.next_irrigation_in_days,
        result.irrigation.preferred_window
    );
    println!("  {}", result.irrigation.recommendation);
    println!(
        "- Crop health: {}/100 ({:?})",
        result.health.score, result.health.status
    );
    if result.weather_alert.messages.is_empty() {
        println!("- Weather alerts: none");
    } else {
        println!("- Weather alerts:");
        for message in &result.weather_alert.messages {
            println!("  - [{:?}] {}", message.level, message.text);
        }
    }
}

fn render_prices(crop: &str, lookup: &PriceLookup, scorer: &MarketScorer) {
    println!("Mandi prices for {crop} (₹/quintal)");
    for quote in &lookup.prices {
        println!(
            "  - {:<30} min {:>6} | modal {:>6} | max {:>6} | {:>5} km | score {:>8.0}",
            quote.market,
            quote.min_price,
            quote.modal_price,
            quote.max_price,
            quote.distance_km,
            scorer.score_quote(quote)
        );
    }
    println!("{}", lookup.best_market.recommendation);

    if let (Some(first), Some(last)) = (lookup.price_trend.first(), lookup.price_trend.last()) {
        println!(
            "Trend over {} day(s): ₹{} on {} -> ₹{} on {}",
            lookup.price_trend.len(),
            first.price,
            first.date,
            last.price,
            last.date
        );
    }
}

fn render_recommendation(recommendation: &MarketRecommendation) {
    println!("Recommendation: {}", recommendation.rationale);
}
