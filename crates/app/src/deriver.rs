//! Entity derivation — expands an event into addressable entities.

use rfxmqtt_domain::classify::classify;
use rfxmqtt_domain::entity::Entity;
use rfxmqtt_domain::event::Event;

use crate::registry::EntityConfig;

/// Derive one entity per (domain, value) pair of `event`.
///
/// Domains come out in classification order, values in decoder order.
/// When an event belongs to several domains every value appears once per
/// domain with the same entity id; callers see one entity per topic.
pub fn derive<'a>(event: &'a Event, config: &'a EntityConfig) -> impl Iterator<Item = Entity> + 'a {
    classify(event).into_iter().flat_map(move |domain| {
        event
            .values
            .iter()
            .map(move |(name, raw)| Entity::derive(domain, &config.name, name, raw.clone()))
    })
}
