//! Direct messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warbler_routing::{
    Action, IntoMessageValue, IntoReference, MessageValue, Reference, RoutingError,
};

use crate::client::Client;
use crate::error::{Error, HydrationError, Result};
use crate::schema::{structural_value, Entity, Schema};

use super::status::backfill_id;
use super::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<User>,

    #[serde(default, skip_serializing)]
    id_str: Option<String>,
    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Message {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Message",
        attributes: &[
            "id",
            "text",
            "created_at",
            "sender_id",
            "sender_screen_name",
            "recipient_id",
            "recipient_screen_name",
            "sender",
            "recipient",
        ],
    };

    fn hydrated(&mut self) -> std::result::Result<(), HydrationError> {
        if self.id.is_none() {
            self.id = backfill_id("Message", self.id_str.as_deref())?;
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
        for user in [self.sender.as_mut(), self.recipient.as_mut()].into_iter().flatten() {
            user.bless(client);
        }
    }
}

structural_value!(Message);

impl Message {
    fn bound(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(Error::Unbound("Message"))
    }

    /// Whoever sent this message: the `sender_id`, then the nested sender's
    /// id, then the sender's screen name.
    fn sender_reference(&self) -> std::result::Result<Reference, RoutingError> {
        if let Some(id) = self.sender_id {
            return Ok(Reference::Id(id));
        }
        if let Some(sender) = &self.sender {
            if sender.id.is_some() {
                return sender.into_reference();
            }
        }
        match &self.sender_screen_name {
            Some(name) => Reference::name(name),
            None => Err(RoutingError::InvalidReference(
                "message has no sender to reply to".into(),
            )),
        }
    }

    /// Send `text` back to this message's sender.
    pub fn reply(&self, text: impl Into<String>) -> Result<Message> {
        let client = self.bound()?;
        let value = MessageValue::post(text, self.sender_reference())?;
        client.message(Action::Post, value)
    }

    pub fn delete(&self) -> Result<Message> {
        self.bound()?.message(Action::Delete, self)
    }
}

impl IntoReference for &Message {
    fn into_reference(self) -> std::result::Result<Reference, RoutingError> {
        self.id
            .map(Reference::Id)
            .ok_or_else(|| RoutingError::InvalidReference("message has no id".into()))
    }
}

impl IntoMessageValue for &Message {
    fn into_message_value(self) -> std::result::Result<MessageValue, RoutingError> {
        self.into_reference().map(MessageValue::Target)
    }
}
