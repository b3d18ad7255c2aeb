//! Capability binding.
//!
//! Binding attaches a [`Client`] to an entity in place so the entity's
//! instance operations (`Status::reply`, `User::friends`, ...) can issue
//! requests. Each type decides what else binding means through
//! [`Entity::bless`]: statuses and messages bind their nested users, and the
//! client's own [`User`](crate::User) record gains
//! [`SelfCapabilities`](crate::SelfCapabilities).

use crate::client::Client;
use crate::schema::Entity;

/// Bind one entity and hand it back.
pub fn bind<E: Entity>(mut entity: E, client: &Client) -> E {
    entity.bless(client);
    entity
}

/// Bind every entity of a sequence independently and hand the sequence back.
pub fn bind_all<E: Entity>(mut entities: Vec<E>, client: &Client) -> Vec<E> {
    for entity in &mut entities {
        entity.bless(client);
    }
    entities
}
