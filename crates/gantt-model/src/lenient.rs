//! Tolerant field decoders
//!
//! Data sources send `null` for fields they have no value for, and empty or
//! unfamiliar strings for classifications. These decoders turn such values
//! into defaults so one sloppy record cannot reject a whole document.

use crate::status::SpaceType;
use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`
///
/// # Errors
/// Propagates errors for values that are present but of the wrong type.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a space type; `null`, `""` and unknown names become `None`
///
/// # Errors
/// Propagates errors for non-string values.
pub fn space_type<'de, D>(deserializer: D) -> Result<Option<SpaceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Decode a space type; `null` and `""` become `None`, unknown names fail
///
/// # Errors
/// Returns a custom error naming the unknown space type.
pub fn blank_space_type<'de, D>(deserializer: D) -> Result<Option<SpaceType>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_optional_space_type(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parse a space type where an empty string means "none"
///
/// # Errors
/// Returns [`UnknownVariant`](crate::UnknownVariant) for non-empty unknown names.
pub fn parse_optional_space_type(
    value: &str,
) -> Result<Option<SpaceType>, crate::status::UnknownVariant> {
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}
