//! Tweet entities: the links, media, mentions and hashtags extracted from a
//! status text, each carrying its `[start, end)` character indices.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warbler_routing::{IntoReference, Reference, RoutingError};

use crate::client::Client;
use crate::schema::{structural_value, Entity, Schema};

/// Container for the entity lists of one status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<Url>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mentions: Option<Vec<UserMention>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<HashTag>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Entities {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Entities",
        attributes: &["urls", "media", "user_mentions", "hashtags"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Url {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Url {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Url",
        attributes: &["url", "expanded_url", "display_url", "indices"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

/// An uploaded photo. `sizes` is kept as raw JSON (`thumb`, `small`, ...
/// mapped to `{w, h, resize}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url_https: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Media {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Media",
        attributes: &[
            "id",
            "media_url",
            "media_url_https",
            "url",
            "display_url",
            "expanded_url",
            "sizes",
            "type",
            "indices",
        ],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for UserMention {
    const SCHEMA: &'static Schema = &Schema {
        kind: "UserMention",
        attributes: &["id", "screen_name", "name", "indices"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for HashTag {
    const SCHEMA: &'static Schema = &Schema {
        kind: "HashTag",
        attributes: &["text", "indices"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

structural_value!(Entities, Url, Media, UserMention, HashTag);

impl IntoReference for &UserMention {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        match (self.id, &self.screen_name) {
            (Some(id), _) => Ok(Reference::Id(id)),
            (None, Some(name)) => Reference::name(name),
            (None, None) => Err(RoutingError::InvalidReference(
                "user mention has neither id nor screen_name".into(),
            )),
        }
    }
}

impl IntoReference for &Media {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        self.id
            .map(Reference::Id)
            .ok_or_else(|| RoutingError::InvalidReference("media has no id".into()))
    }
}
