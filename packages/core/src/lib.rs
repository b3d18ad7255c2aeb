//! Client library for a Twitter-style REST API.
//!
//! HTTP/JSON responses become typed, schema-described entities; requests are
//! built from loosely-typed caller input (numeric ids, screen names, or
//! entities already in hand) and dispatched through a pluggable
//! [`Transport`].
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`schema`] | [`Schema`], the [`Entity`] and [`Attributes`] traits, structural [`equals`] |
//! | [`model`] | [`User`], [`Status`], [`Message`] and the other entity types |
//! | [`marshal`] | Raw JSON → [`Payload`] of hydrated entities |
//! | [`bind`] | Attaching a [`Client`] to entities |
//! | [`client`] | [`Client`] and its request dispatcher |
//! | [`config`] | [`ClientConfig`], process-wide default, per-client overrides |
//! | [`transport`] | The [`Transport`] seam |
//! | [`timestamp`] | Wire timestamp parsing and formatting |
//! | [`render`] | Plain-text rendering for terminals |
//!
//! Request planning (routing tables and identifier resolution) lives in the
//! I/O-free `warbler-routing` crate and is re-exported here.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use warbler::{Action, Client};
//! use warbler_http::{BearerToken, HttpTransport};
//!
//! let transport = HttpTransport::new(&warbler::default_config(), BearerToken::new("..."))?;
//! let client = Client::builder(transport).login("mylogin").build();
//!
//! for friend in client.user(Action::Friends, "cafe_paradiso", &[])?.into_many() {
//!     println!("{}", friend.screen_name.unwrap_or_default());
//! }
//!
//! let me = client.my(Action::Info, &[])?.into_one()?;
//! let followers = me.self_capabilities().map(|caps| caps.followers()).transpose()?;
//! ```

pub mod bind;
pub mod client;
pub mod config;
pub mod error;
pub mod marshal;
pub mod model;
pub mod render;
pub mod schema;
pub mod timestamp;
pub mod transport;

#[cfg(test)]
mod testing;

pub use bind::{bind, bind_all};
pub use client::{Client, ClientBuilder};
pub use config::{configure, default_config, ClientConfig, ConfigOverrides, Protocol};
pub use error::{Error, HydrationError, Result};
pub use marshal::{unmarshal, Batch, Payload, Raw, Rejected};
pub use model::{
    Entities, HashTag, Location, Media, Message, PlaceType, RateLimitStatus, SelfCapabilities,
    Status, Trend, Trendline, Url, User, UserMention,
};
pub use schema::{equals, Attributes, Entity, FieldMap, Schema};
pub use transport::{Transport, TransportError};

pub use warbler_routing::{
    Action, IntoMessageValue, IntoReference, IntoStatusValue, MessageValue, Method, Params,
    Reference, RequestPlan, Resource, RoutingError, StatusValue,
};
