//! Users, and the extra capabilities of the authenticated user's own record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use warbler_routing::{Action, IntoReference, Reference, RoutingError};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::marshal::Batch;
use crate::schema::{structural_value, Entity, Schema};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text location from the profile, not a [`Location`](super::Location).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Seconds east of UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friends_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourites_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses_count: Option<u64>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: Option<Client>,
    #[serde(skip)]
    me: Option<SelfCapabilities>,
}

impl Entity for User {
    const SCHEMA: &'static Schema = &Schema {
        kind: "User",
        attributes: &[
            "id",
            "name",
            "screen_name",
            "description",
            "location",
            "url",
            "protected",
            "verified",
            "lang",
            "profile_image_url",
            "utc_offset",
            "time_zone",
            "following",
            "notifications",
            "followers_count",
            "friends_count",
            "favourites_count",
            "statuses_count",
            "created_at",
        ],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }

    /// Attaches the client and, when this is the client's own login, the
    /// [`SelfCapabilities`] for this instance. Rebinding to a client with a
    /// different login drops capabilities granted earlier.
    fn bless(&mut self, client: &Client) {
        self.client = Some(client.clone());
        let own = is_login(self.screen_name.as_deref(), client);
        match (self.me.is_some(), own) {
            (false, true) => self.me = Some(SelfCapabilities::new(client.clone())),
            (true, false) => {
                warn!(
                    screen_name = self.screen_name.as_deref().unwrap_or(""),
                    "dropping self capabilities: user is not the client's login"
                );
                self.me = None;
            }
            _ => {}
        }
    }
}

structural_value!(User);

fn is_login(screen_name: Option<&str>, client: &Client) -> bool {
    match (screen_name, client.login()) {
        (Some(name), Some(login)) => name == login,
        _ => false,
    }
}

impl User {
    fn bound(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(Error::Unbound("User"))
    }

    /// Users this user follows.
    pub fn friends(&self) -> Result<Batch<User>> {
        Ok(self.bound()?.user(Action::Friends, self, &[])?.into_many())
    }

    /// Whether this is the bound client's authenticated user.
    pub fn is_me(&self) -> Result<bool> {
        Ok(is_login(self.screen_name.as_deref(), self.bound()?))
    }

    /// Present only on the authenticated user's own record, once bound.
    pub fn self_capabilities(&self) -> Option<&SelfCapabilities> {
        self.me.as_ref()
    }
}

impl IntoReference for &User {
    fn into_reference(self) -> std::result::Result<Reference, RoutingError> {
        self.id.map(Reference::Id).ok_or_else(|| {
            RoutingError::InvalidReference(format!(
                "user {} has no id",
                self.screen_name.as_deref().unwrap_or("<unnamed>")
            ))
        })
    }
}

/// Operations only the authenticated user can perform on their own record.
#[derive(Debug, Clone)]
pub struct SelfCapabilities {
    client: Client,
}

impl SelfCapabilities {
    fn new(client: Client) -> Self {
        Self { client }
    }

    /// The authenticated user's followers.
    pub fn followers(&self) -> Result<Batch<User>> {
        Ok(self.client.my(Action::Followers, &[])?.into_many())
    }

    /// Follow `user`.
    pub fn befriend(&self, user: impl IntoReference) -> Result<User> {
        self.client.friend(Action::Add, user)
    }

    /// Stop following `user`.
    pub fn defriend(&self, user: impl IntoReference) -> Result<User> {
        self.client.friend(Action::Remove, user)
    }
}

// --- tests ------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attributes;
    use crate::testing::{client_for, NullTransport};
    use serde_json::json;

    fn named(screen_name: &str) -> User {
        User {
            id: Some(1),
            screen_name: Some(screen_name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn own_record_gains_self_capabilities() {
        let client = client_for("mylogin", NullTransport);
        let mut me = named("mylogin");
        me.bless(&client);
        assert!(me.self_capabilities().is_some());
        assert!(me.is_me().unwrap());
    }

    #[test]
    fn other_users_do_not() {
        let client = client_for("mylogin", NullTransport);
        let mut other = named("someoneelse");
        other.bless(&client);
        assert!(other.client().is_some());
        assert!(other.self_capabilities().is_none());
        assert!(!other.is_me().unwrap());
    }

    #[test]
    fn login_comparison_is_exact() {
        let client = client_for("MyLogin", NullTransport);
        let mut user = named("mylogin");
        user.bless(&client);
        assert!(user.self_capabilities().is_none());
    }

    #[test]
    fn capabilities_are_per_instance() {
        let client = client_for("mylogin", NullTransport);
        let mut bound = named("mylogin");
        let unbound = named("mylogin");
        bound.bless(&client);
        assert!(bound.self_capabilities().is_some());
        assert!(unbound.self_capabilities().is_none());
    }

    #[test]
    fn rebinding_to_another_login_drops_capabilities() {
        let mut user = named("mylogin");
        user.bless(&client_for("mylogin", NullTransport));
        user.bless(&client_for("other", NullTransport));
        assert!(user.self_capabilities().is_none());
    }

    #[test]
    fn unbound_operations_fail() {
        let user = named("jdoe");
        assert!(matches!(user.friends(), Err(Error::Unbound("User"))));
        assert!(matches!(user.is_me(), Err(Error::Unbound("User"))));
    }

    #[test]
    fn binding_does_not_affect_equality() {
        let plain = named("mylogin");
        let mut bound = plain.clone();
        bound.bless(&client_for("mylogin", NullTransport));
        assert_eq!(plain, bound);
    }

    #[test]
    fn clone_equal_then_mutation_diverges() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "screen_name": "jdoe",
            "followers_count": 10,
            "created_at": "Wed Aug 27 13:08:45 +0000 2008"
        }))
        .unwrap();
        let mut copy = user.clone();
        assert_eq!(user, copy);
        copy.followers_count = Some(11);
        assert_ne!(user, copy);
    }

    #[test]
    fn field_map_roundtrip() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "name": "Jane Doe",
            "screen_name": "jdoe",
            "protected": false,
            "utc_offset": -18000,
            "created_at": "Wed Aug 27 13:08:45 +0000 2008",
            "unknown_field": "ignored"
        }))
        .unwrap();
        let map = user.to_field_map();
        assert!(!map.contains_key("unknown_field"));
        assert!(!map.contains_key("description"));
        assert_eq!(User::from_fields(map).unwrap(), user);
    }

    #[test]
    fn entity_reference_uses_id() {
        let user = User {
            id: Some(42),
            ..Default::default()
        };
        assert_eq!((&user).into_reference(), Ok(Reference::Id(42)));
        assert!((&User::default()).into_reference().is_err());
    }

    #[test]
    fn display_without_text() {
        assert_eq!(named("x").to_string(), "<User 1>");
    }
}
