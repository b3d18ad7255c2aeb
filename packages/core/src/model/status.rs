//! Statuses (tweets).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warbler_routing::{Action, IntoReference, IntoStatusValue, Reference, RoutingError, StatusValue};

use crate::client::Client;
use crate::error::{Error, HydrationError, Result};
use crate::schema::{structural_value, Entity, Schema};

use super::{Entities, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The posting application, usually an HTML anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweeted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,

    #[serde(default, skip_serializing)]
    id_str: Option<String>,
    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Status {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Status",
        attributes: &[
            "id",
            "text",
            "source",
            "truncated",
            "created_at",
            "in_reply_to_status_id",
            "in_reply_to_user_id",
            "in_reply_to_screen_name",
            "favorited",
            "retweeted",
            "retweet_count",
            "user",
            "entities",
        ],
    };

    /// Backfills `id` from the wire's `id_str` when only the string form
    /// was sent.
    fn hydrated(&mut self) -> std::result::Result<(), HydrationError> {
        if self.id.is_none() {
            self.id = backfill_id("Status", self.id_str.as_deref())?;
        }
        Ok(())
    }

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }

    fn bless(&mut self, client: &Client) {
        self.client = Some(client.clone());
        if let Some(user) = self.user.as_mut() {
            user.bless(client);
        }
    }
}

structural_value!(Status);

pub(super) fn backfill_id(
    kind: &'static str,
    id_str: Option<&str>,
) -> std::result::Result<Option<u64>, HydrationError> {
    id_str
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| HydrationError::new(kind, format!("id_str {:?} is not numeric", s)))
        })
        .transpose()
}

impl Status {
    fn bound(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(Error::Unbound("Status"))
    }

    /// Post `text` as a reply to this status.
    pub fn reply(&self, text: impl Into<String>) -> Result<Status> {
        let client = self.bound()?;
        let value = StatusValue::reply(text, self)?;
        client.status(Action::Reply, value)
    }

    pub fn delete(&self) -> Result<Status> {
        self.bound()?.status(Action::Delete, self)
    }

    /// Mark this status as a favorite of the authenticated user.
    pub fn favorite(&self) -> Result<Status> {
        self.bound()?.favorite(Action::Add, self)
    }
}

impl IntoReference for &Status {
    fn into_reference(self) -> std::result::Result<Reference, RoutingError> {
        self.id
            .map(Reference::Id)
            .ok_or_else(|| RoutingError::InvalidReference("status has no id".into()))
    }
}

impl IntoStatusValue for &Status {
    fn into_status_value(self) -> std::result::Result<StatusValue, RoutingError> {
        self.into_reference().map(StatusValue::Target)
    }
}
