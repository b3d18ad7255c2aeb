//! Entity types.
//!
//! | Type | Kind | Nested entities |
//! |------|------|-----------------|
//! | [`User`] | user profile | |
//! | [`Status`] | tweet | `user`, `entities` |
//! | [`Message`] | direct message | `sender`, `recipient` |
//! | [`Entities`] | tweet entity container | `urls`, `media`, `user_mentions`, `hashtags` |
//! | [`Url`], [`Media`], [`UserMention`], [`HashTag`] | tweet entities | |
//! | [`Location`] | trend location | `placeType` |
//! | [`PlaceType`] | location granularity | |
//! | [`Trendline`] | trend snapshot | `trends` |
//! | [`Trend`] | trending topic | |
//! | [`RateLimitStatus`] | hourly allowance | |
//!
//! Every field is optional: absent wire keys stay `None`, unknown keys are
//! dropped. Binding state lives in private fields that never serialize and
//! never take part in equality.

mod entities;
mod location;
mod message;
mod rate_limit;
mod status;
mod trends;
mod user;

pub use entities::{Entities, HashTag, Media, Url, UserMention};
pub use location::{Location, PlaceType};
pub use message::Message;
pub use rate_limit::RateLimitStatus;
pub use status::Status;
pub use trends::{Trend, Trendline};
pub use user::{SelfCapabilities, User};
