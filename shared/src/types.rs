//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS fix captured with a submission, kept as display strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    pub latitude: String,
    pub longitude: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
}

impl GeoLocation {
    pub fn new(latitude: &str, longitude: &str) -> Self {
        Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            accuracy: None,
        }
    }

    /// Composite "lat, lon" display value
    pub fn coordinates(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// Change notification for a namespaced storage key.
///
/// `new_value` is the serialized value after the change, `None` when the key
/// was removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    pub key: String,
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn changed(key: &str, new_value: String) -> Self {
        Self {
            key: key.to_string(),
            new_value: Some(new_value),
        }
    }

    pub fn removed(key: &str) -> Self {
        Self {
            key: key.to_string(),
            new_value: None,
        }
    }
}
