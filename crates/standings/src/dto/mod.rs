pub mod dashboard;
pub mod regatta;
pub mod results;
pub mod snapshot;
pub mod team;

use serde::{Deserialize, Deserializer};

/// The backend encodes an empty list as `null`; treat both the same.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
