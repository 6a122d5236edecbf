use thiserror::Error;

#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }

        Ok(Coordinate { latitude, longitude })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("invalid location latitude: {0}, must be between -90 and 90")]
    InvalidLatitude(f64),
    #[error("invalid location longitude: {0}, must be between -180 and 180")]
    InvalidLongitude(f64),
}
