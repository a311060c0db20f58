//! Presence-aware field wrapper for partial updates.
//!
//! A JSON body like `{"contact_info": null}` must clear the column, while a
//! body that omits `contact_info` must leave it alone. `Option<T>` cannot tell
//! those apart, so PATCH DTOs declare their fields as `Patch<T>` together with
//! `#[serde(default)]`: a missing key stays [`Patch::Absent`], an explicit
//! `null` becomes [`Patch::Null`] and anything else is [`Patch::Value`].

use serde::{Deserialize, Deserializer};

use crate::core::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not sent
    Absent,
    /// The key was sent as `null`
    Null,
    /// The key was sent with a value
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn map<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }

    /// `None` when absent, `Some(None)` for explicit null, `Some(Some(v))` for a value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// For non-nullable columns: absent is fine, explicit null is rejected
    pub fn required(self, field: &str) -> Result<Option<T>, AppError> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(AppError::Validation(format!("{} cannot be null", field))),
            Patch::Value(v) => Ok(Some(v)),
        }
    }
}
