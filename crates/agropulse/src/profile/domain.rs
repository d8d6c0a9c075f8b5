use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::crop::{CropCalendar, CropGrowth};
use crate::error::ValidationError;
use crate::market::GeoPoint;

/// Cropping season of the Indian agricultural calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "kharif" => Some(Self::Kharif),
            "rabi" => Some(Self::Rabi),
            "zaid" => Some(Self::Zaid),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl FarmerProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("user_{}", created_at.timestamp_millis()),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            state: String::new(),
            district: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            created_at,
        }
    }

    /// Coordinates, unless they were never set (both zero).
    pub fn location(&self) -> Option<GeoPoint> {
        if self.latitude == 0.0 && self.longitude == 0.0 {
            None
        } else {
            Some(GeoPoint::new(self.latitude, self.longitude))
        }
    }

    pub fn state_filter(&self) -> Option<&str> {
        Some(self.state.trim()).filter(|state| !state.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDetails {
    pub id: String,
    pub farmer_id: String,
    pub crop_type: String,
    pub sowing_date: NaiveDate,
    pub season: Season,
    pub farm_size: f64,
    #[serde(default = "default_size_unit")]
    pub farm_size_unit: String,
}

fn default_size_unit() -> String {
    "acres".to_string()
}

impl FarmDetails {
    pub fn growth(&self, calendar: &CropCalendar, today: NaiveDate) -> CropGrowth {
        calendar.growth(&self.crop_type, self.sowing_date, today)
    }
}

/// Everything persisted for the signed-in farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub farmer: FarmerProfile,
    #[serde(default)]
    pub farm: Option<FarmDetails>,
}

impl ProfileRecord {
    pub fn new(farmer: FarmerProfile) -> Self {
        Self { farmer, farm: None }
    }

    pub fn with_farm(mut self, farm: FarmDetails) -> Self {
        self.farm = Some(farm);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.farmer.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if !self.farmer.email.contains('@') {
            return Err(ValidationError::new(
                "email",
                format!("'{}' is not an email address", self.farmer.email),
            ));
        }
        if !(-90.0..=90.0).contains(&self.farmer.latitude) {
            return Err(ValidationError::new(
                "latitude",
                format!("must be within ±90, got {}", self.farmer.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.farmer.longitude) {
            return Err(ValidationError::new(
                "longitude",
                format!("must be within ±180, got {}", self.farmer.longitude),
            ));
        }

        if let Some(farm) = &self.farm {
            if farm.crop_type.trim().is_empty() {
                return Err(ValidationError::new("cropType", "must not be empty"));
            }
            if !farm.farm_size.is_finite() || farm.farm_size <= 0.0 {
                return Err(ValidationError::new(
                    "farmSize",
                    format!("must be positive, got {}", farm.farm_size),
                ));
            }
        }

        Ok(())
    }
}
