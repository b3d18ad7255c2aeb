//! Places that trends are reported for.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::schema::{structural_value, Entity, Schema};

/// Granularity of a [`Location`]: `Country` (12), `Town` (7), `Supername` (19)...
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for PlaceType {
    const SCHEMA: &'static Schema = &Schema {
        kind: "PlaceType",
        attributes: &["name", "code"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

/// A Where-On-Earth location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woeid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "countryCode", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "parentid", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(rename = "placeType", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<PlaceType>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Location {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Location",
        attributes: &[
            "name",
            "woeid",
            "country",
            "url",
            "countryCode",
            "parentid",
            "placeType",
        ],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

structural_value!(PlaceType, Location);
