//! Farmer profile and farm details, persisted behind [`ProfileStore`].

mod domain;
mod store;

pub use domain::{FarmDetails, FarmerProfile, ProfileRecord, Season};
pub use store::{JsonFileProfileStore, ProfileStore, ProfileStoreError};
