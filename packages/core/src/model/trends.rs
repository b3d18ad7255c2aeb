//! Trending topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::schema::{structural_value, Entity, Schema};
use crate::timestamp;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Trend {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Trend",
        attributes: &["name", "url", "query"],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

/// One snapshot of trends.
///
/// The `current`, `daily` and `weekly` endpoints wrap their snapshots in an
/// envelope keyed by snapshot time:
///
/// ```text
/// {"trends": {"2011-10-06 00:00": [...], "2011-10-06 01:00": [...]}, "as_of": 1317929777}
/// ```
///
/// [`unmarshal`](crate::unmarshal) turns each key into its own `Trendline`,
/// in time order, with `as_of` taken from the key. A key that is not a
/// timestamp falls back to the envelope's `as_of`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trendline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trends: Option<Vec<Trend>>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for Trendline {
    const SCHEMA: &'static Schema = &Schema {
        kind: "Trendline",
        attributes: &["trends", "as_of", "type"],
    };

    fn unwrap_envelope(raw: Value) -> Value {
        let mut envelope = match raw {
            Value::Object(envelope) => envelope,
            other => return other,
        };
        let snapshots = match envelope.remove("trends") {
            Some(Value::Object(snapshots)) => snapshots,
            Some(flat) => {
                envelope.insert("trends".into(), flat);
                return Value::Object(envelope);
            }
            None => return Value::Object(envelope),
        };
        let fallback = envelope.get("as_of").cloned().unwrap_or(Value::Null);
        let kind = envelope.get("type").cloned();

        let mut keys: Vec<_> = snapshots.keys().cloned().collect();
        keys.sort();
        let lines = keys
            .into_iter()
            .map(|key| {
                let as_of = match timestamp::parse(&key) {
                    Ok(_) => Value::String(key.clone()),
                    Err(_) => fallback.clone(),
                };
                let mut line = serde_json::Map::new();
                line.insert("trends".into(), snapshots.get(&key).cloned().unwrap_or(Value::Null));
                line.insert("as_of".into(), as_of);
                if let Some(kind) = &kind {
                    line.insert("type".into(), kind.clone());
                }
                Value::Object(line)
            })
            .collect();
        Value::Array(lines)
    }

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

structural_value!(Trend, Trendline);
