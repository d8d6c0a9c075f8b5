use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn ensure_finite(&self) -> Result<(), DistanceError> {
        if !self.latitude.is_finite() {
            return Err(DistanceError::NonFinite {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() {
            return Err(DistanceError::NonFinite {
                field: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    #[error("{field} must be a finite number of degrees, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> Result<f64, DistanceError> {
    from.ensure_finite()?;
    to.ensure_finite()?;

    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}

/// Distance rounded to the nearest kilometre for display.
pub fn rounded_km(from: GeoPoint, to: GeoPoint) -> Result<u32, DistanceError> {
    haversine_km(from, to).map(|km| km.round() as u32)
}
