use crate::infra::{parse_date, parse_season};
use agropulse::config::AppConfig;
use agropulse::error::AppError;
use agropulse::profile::{
    FarmDetails, FarmerProfile, JsonFileProfileStore, ProfileRecord, ProfileStore, Season,
};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub(crate) enum ProfileCommand {
    /// Print the saved profile as JSON
    Show,
    /// Save a farmer profile and, optionally, the current crop
    Register(RegisterArgs),
    /// Delete the saved profile
    Clear,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    #[arg(long, default_value = "")]
    pub(crate) state: String,
    #[arg(long, default_value = "")]
    pub(crate) district: String,
    /// Farm latitude in decimal degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub(crate) lat: Option<f64>,
    /// Farm longitude in decimal degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub(crate) lon: Option<f64>,
    /// Crop currently sown; enables the dashboard
    #[arg(long, requires_all = ["sowing_date", "season"])]
    pub(crate) crop: Option<String>,
    /// Sowing date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) sowing_date: Option<NaiveDate>,
    /// Kharif, Rabi or Zaid
    #[arg(long, value_parser = parse_season)]
    pub(crate) season: Option<Season>,
    /// Farm size in acres
    #[arg(long, default_value_t = 1.0)]
    pub(crate) farm_size: f64,
}

impl RegisterArgs {
    fn into_record(self) -> ProfileRecord {
        let created_at = Utc::now();
        let mut farmer = FarmerProfile::new(self.name, self.email, created_at);
        farmer.phone = self.phone;
        farmer.state = self.state;
        farmer.district = self.district;
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            farmer.latitude = lat;
            farmer.longitude = lon;
        }

        let farm = match (self.crop, self.sowing_date, self.season) {
            (Some(crop_type), Some(sowing_date), Some(season)) => Some(FarmDetails {
                id: format!("farm_{}", created_at.timestamp_millis()),
                farmer_id: farmer.id.clone(),
                crop_type,
                sowing_date,
                season,
                farm_size: self.farm_size,
                farm_size_unit: "acres".to_string(),
            }),
            _ => None,
        };

        ProfileRecord { farmer, farm }
    }
}

pub(crate) fn run_profile(command: ProfileCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = JsonFileProfileStore::new(config.profile.path.clone());
    execute(&store, command)
}

pub(crate) fn execute<S: ProfileStore>(store: &S, command: ProfileCommand) -> Result<(), AppError> {
    match command {
        ProfileCommand::Show => match store.load()? {
            Some(record) => match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("Profile payload unavailable: {err}"),
            },
            None => println!("No farmer profile saved."),
        },
        ProfileCommand::Register(args) => {
            let record = args.into_record();
            store.save(&record)?;
            println!(
                "Saved profile {} for {}{}",
                record.farmer.id,
                record.farmer.name,
                record
                    .farm
                    .as_ref()
                    .map(|farm| format!(" ({} sown {})", farm.crop_type, farm.sowing_date))
                    .unwrap_or_default()
            );
        }
        ProfileCommand::Clear => {
            store.clear()?;
            println!("Farmer profile cleared.");
        }
    }
    Ok(())
}
