use crate::domain::ReferenceZone;
use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for ReferenceZone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(&value), &"'local', 'utc' or a UTC offset like '+02:00'"))
    }
}
