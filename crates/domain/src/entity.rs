//! Entity — one addressable value of a device under one domain.
//!
//! Entities are not stored; they are re-derived from every event.

use crate::catalog;
use crate::classify::Domain;
use crate::topic;
use crate::value::Value;

/// A derived, publishable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Platform domain.
    pub domain: Domain,
    /// Slugged object id, e.g. `testing_temperature`.
    pub id: String,
    /// Name of the value in the event (`"Temperature"`).
    pub value_name: String,
    /// Value after the catalog transform.
    pub state: Value,
}

impl Entity {
    /// Derive an entity for `value_name` of the device called `device_name`.
    ///
    /// The raw value is passed through [`catalog::transform_state`].
    #[must_use]
    pub fn derive(domain: Domain, device_name: &str, value_name: &str, raw: Value) -> Self {
        Self {
            domain,
            id: slug(&format!("{device_name} {value_name}")),
            value_name: value_name.to_string(),
            state: catalog::transform_state(value_name, raw),
        }
    }

    /// Device class advertised in discovery, if any.
    #[must_use]
    pub fn device_class(&self) -> Option<&'static str> {
        catalog::device_class(&self.value_name)
    }

    /// Unit advertised in discovery; empty when the value has none.
    #[must_use]
    pub fn unit_of_measurement(&self) -> &'static str {
        catalog::unit_of_measurement(&self.value_name)
    }

    /// Relative discovery topic.
    #[must_use]
    pub fn config_topic(&self) -> String {
        topic::config_topic(self.domain, &self.id)
    }

    /// Relative state topic.
    #[must_use]
    pub fn state_topic(&self) -> String {
        topic::state_topic(self.domain, &self.id)
    }
}

/// Lower-case `text` and replace every space with `_`.
#[must_use]
pub fn slug(text: &str) -> String {
    text.to_lowercase().replace(' ', "_")
}
