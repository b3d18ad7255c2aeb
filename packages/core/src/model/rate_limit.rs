use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::schema::{structural_value, Entity, Schema};

/// Remaining request allowance for the current hour. Data only; the client
/// does not enforce it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_hits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_time_in_seconds: Option<i64>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reset_time: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: Option<Client>,
}

impl Entity for RateLimitStatus {
    const SCHEMA: &'static Schema = &Schema {
        kind: "RateLimitStatus",
        attributes: &[
            "remaining_hits",
            "hourly_limit",
            "reset_time_in_seconds",
            "reset_time",
        ],
    };

    fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    fn client_slot(&mut self) -> &mut Option<Client> {
        &mut self.client
    }
}

structural_value!(RateLimitStatus);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hydrates_reset_time() {
        let status: RateLimitStatus = serde_json::from_value(json!({
            "remaining_hits": 149,
            "hourly_limit": 150,
            "reset_time_in_seconds": 1317931200,
            "reset_time": "Thu Oct 06 20:00:00 +0000 2011"
        }))
        .unwrap();
        assert_eq!(status.remaining_hits, Some(149));
        assert_eq!(
            status.reset_time.map(|t| t.timestamp()),
            status.reset_time_in_seconds
        );
    }
}
