//! Crop-side inputs to the advisory engine: growth stage, weather snapshot,
//! the sowing calendar and field condition checks.

mod conditions;
pub mod domain;
mod growth;

pub use conditions::{
    analyze_weather, assess_health, irrigation_advice, AlertLevel, AlertMessage, CropHealth,
    HealthStatus, IrrigationAdvice, IrrigationUrgency, WeatherAlert,
};
pub use domain::{GrowthStage, WeatherSnapshot};
pub use growth::{CropCalendar, CropGrowth};
