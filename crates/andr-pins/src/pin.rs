use crate::{PinError, PinResult};

use andr_session::Identity;

use serde::{Deserialize, Serialize};

/// A named location saved by one user.
///
/// An `id` of 0 means the store has not assigned one yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    id: u64,
    user_id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl Pin {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> PinResult<Self> {
        let pin = Self {
            id: 0,
            user_id: user_id.into(),
            name: name.into(),
            description: description.filter(|text| !text.trim().is_empty()),
            latitude,
            longitude,
        };
        pin.validate()?;
        Ok(pin)
    }

    /// A new pin owned by `owner`.
    pub fn for_identity(
        owner: &Identity,
        name: impl Into<String>,
        description: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> PinResult<Self> {
        Self::new(owner.id(), name, description, latitude, longitude)
    }

    /// Targets an existing id; adding it replaces whatever is stored there.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn validate(&self) -> PinResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(PinError::invalid_pin("user id cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(PinError::invalid_pin("name cannot be empty"));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PinError::invalid_pin(format!(
                "latitude {} is outside -90..=90",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PinError::invalid_pin(format!(
                "longitude {} is outside -180..=180",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
