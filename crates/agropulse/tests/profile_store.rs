use chrono::{NaiveDate, TimeZone, Utc};

use agropulse::crop::{CropCalendar, GrowthStage};
use agropulse::profile::{
    FarmDetails, FarmerProfile, JsonFileProfileStore, ProfileRecord, ProfileStore,
    ProfileStoreError, Season,
};

fn farmer() -> FarmerProfile {
    let created = Utc
        .with_ymd_and_hms(2025, 7, 2, 6, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut farmer = FarmerProfile::new("Lakshmi Reddy", "lakshmi@example.in", created);
    farmer.state = "Karnataka".to_string();
    farmer.latitude = 12.97;
    farmer.longitude = 77.59;
    farmer
}

#[test]
fn registration_survives_a_new_store_handle() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("agropulse").join("profile.json");

    let farmer = farmer();
    let farm = FarmDetails {
        id: "farm_7".to_string(),
        farmer_id: farmer.id.clone(),
        crop_type: "Maize".to_string(),
        sowing_date: NaiveDate::from_ymd_opt(2025, 7, 10).expect("valid date"),
        season: Season::Kharif,
        farm_size: 3.0,
        farm_size_unit: "acres".to_string(),
    };
    JsonFileProfileStore::new(&path)
        .save(&ProfileRecord::new(farmer).with_farm(farm))
        .expect("save");

    let reloaded = JsonFileProfileStore::new(&path)
        .load()
        .expect("load")
        .expect("record present");
    assert_eq!(reloaded.farmer.state_filter(), Some("Karnataka"));

    let farm = reloaded.farm.expect("farm present");
    let today = NaiveDate::from_ymd_opt(2025, 9, 20).expect("valid date");
    let growth = farm.growth(&CropCalendar::standard(), today);
    assert_eq!(growth.days_since_sowing, 72);
    assert_ne!(growth.stage, GrowthStage::Seedling);
}

#[test]
fn invalid_email_is_not_written() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileProfileStore::new(dir.path().join("profile.json"));

    let mut farmer = farmer();
    farmer.email = "not-an-email".to_string();

    let err = store
        .save(&ProfileRecord::new(farmer))
        .expect_err("invalid email");
    assert!(matches!(err, ProfileStoreError::Invalid(_)));
    assert!(store.load().expect("load").is_none());
}
