//! Advisory rules, mandi price scoring and farm profile storage behind the
//! AgroPulse farmer dashboard.

pub mod advisory;
pub mod config;
pub mod crop;
pub mod error;
pub mod market;
pub mod profile;
pub mod telemetry;
