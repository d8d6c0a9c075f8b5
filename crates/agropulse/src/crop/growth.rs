use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::GrowthStage;

const DEFAULT_CYCLE_DAYS: u32 = 120;

/// Sowing-to-harvest durations used to place a field on its lifecycle.
#[derive(Debug)]
pub struct CropCalendar {
    cycles: Vec<CropCycle>,
    default_cycle_days: u32,
}

#[derive(Debug, Clone, Copy)]
struct CropCycle {
    crop: &'static str,
    days: u32,
}

/// Where a field sits in its crop cycle on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropGrowth {
    pub stage: GrowthStage,
    pub days_since_sowing: i64,
    pub cycle_days: u32,
    pub progress_pct: u8,
    pub days_to_harvest: i64,
}

impl CropCalendar {
    pub fn standard() -> Self {
        Self {
            cycles: standard_cycles(),
            default_cycle_days: DEFAULT_CYCLE_DAYS,
        }
    }

    pub fn cycle_days(&self, crop: &str) -> u32 {
        let crop = crop.trim();
        self.cycles
            .iter()
            .find(|cycle| cycle.crop.eq_ignore_ascii_case(crop))
            .map(|cycle| cycle.days)
            .unwrap_or(self.default_cycle_days)
    }

    pub fn growth(&self, crop: &str, sowing_date: NaiveDate, today: NaiveDate) -> CropGrowth {
        let cycle_days = self.cycle_days(crop);
        let days_since_sowing = (today - sowing_date).num_days().max(0);
        let progress = days_since_sowing as f64 / f64::from(cycle_days);

        let stage = if progress < 0.2 {
            GrowthStage::Seedling
        } else if progress < 0.5 {
            GrowthStage::Vegetative
        } else if progress < 0.8 {
            GrowthStage::Flowering
        } else {
            GrowthStage::Harvesting
        };

        CropGrowth {
            stage,
            days_since_sowing,
            cycle_days,
            progress_pct: (progress * 100.0).round().clamp(0.0, 100.0) as u8,
            days_to_harvest: i64::from(cycle_days) - days_since_sowing,
        }
    }
}

impl Default for CropCalendar {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_cycles() -> Vec<CropCycle> {
    [
        ("Rice", 120),
        ("Wheat", 130),
        ("Cotton", 160),
        ("Sugarcane", 365),
        ("Maize", 100),
        ("Soybean", 100),
        ("Groundnut", 110),
        ("Tomato", 90),
        ("Onion", 120),
        ("Potato", 100),
        ("Bajra", 85),
        ("Jowar", 110),
        ("Barley", 120),
        ("Chickpea", 110),
        ("Tur", 170),
        ("Moong", 70),
        ("Mustard", 120),
        ("Chilli", 150),
        ("Banana", 330),
        ("Turmeric", 270),
    ]
    .into_iter()
    .map(|(crop, days)| CropCycle { crop, days })
    .collect()
}
