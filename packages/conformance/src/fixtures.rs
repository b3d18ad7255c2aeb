//! Canned wire payloads, shaped like real API responses.

/// Login used by clients in the suite.
pub const LOGIN: &str = "mylogin";

pub const BORIS: &str = r#"{"id":395783,"screen_name":"boris_johnson_is_funny_as_hell","location":"London"}"#;

/// The authenticated user's own record.
pub const ME: &str = r#"{
    "id": 9000,
    "name": "My Login",
    "screen_name": "mylogin",
    "followers_count": 2,
    "friends_count": 1,
    "created_at": "Wed Aug 27 13:08:45 +0000 2008"
}"#;

pub const FRIENDS: &str = r#"[
    {"id": 1, "screen_name": "cafe_regular", "name": "A Regular"},
    {"id": 2, "screen_name": "barista", "name": "The Barista", "protected": true}
]"#;

pub const FOLLOWERS: &str = r#"[
    {"id": 3, "screen_name": "fan_one"},
    {"id": 4, "screen_name": "fan_two"}
]"#;

pub const STATUS: &str = r#"{
    "id": 1472669360,
    "id_str": "1472669360",
    "text": "At least I can get your humor through tweets. RT @abdur: I don't mean this in a bad way, but genetically speaking your a cul-de-sac.",
    "source": "<a href=\"http://www.tweetdeck.com/\">TweetDeck</a>",
    "truncated": false,
    "created_at": "Tue Apr 07 22:52:51 +0000 2009",
    "in_reply_to_status_id": null,
    "in_reply_to_user_id": null,
    "favorited": false,
    "retweet_count": 4,
    "user": {
        "id": 1401881,
        "screen_name": "dougw",
        "name": "Doug Williams",
        "followers_count": 1031,
        "created_at": "Sun Mar 18 06:42:26 +0000 2007"
    },
    "entities": {
        "urls": [],
        "hashtags": [],
        "user_mentions": [{"id": 3, "screen_name": "abdur", "name": "Abdur", "indices": [50, 56]}]
    }
}"#;

/// Three statuses, the middle one with an unparsable timestamp.
pub const TIMELINE_WITH_ONE_BAD: &str = r#"[
    {"id": 1, "text": "first", "user": {"id": 10, "screen_name": "jdoe"}},
    {"id": 2, "text": "second", "created_at": "the day before yesterday"},
    {"id": 3, "text": "third", "user": {"id": 9000, "screen_name": "mylogin"}}
]"#;

pub const MESSAGE: &str = r#"{
    "id_str": "88619848",
    "text": "meet at the cafe?",
    "created_at": "Sat Jan 10 00:33:08 +0000 2009",
    "sender_id": 1,
    "sender_screen_name": "jdoe",
    "recipient_id": 9000,
    "recipient_screen_name": "mylogin",
    "sender": {"id": 1, "screen_name": "jdoe"},
    "recipient": {"id": 9000, "screen_name": "mylogin"}
}"#;

pub const MESSAGES: &str = r#"[
    {"id": 1, "text": "one", "sender_screen_name": "jdoe"},
    {"id": 2, "text": "two", "sender_screen_name": "jdoe"}
]"#;

pub const RATE_LIMIT: &str = r#"{
    "remaining_hits": 149,
    "hourly_limit": 150,
    "reset_time_in_seconds": 1317931200,
    "reset_time": "Thu Oct 06 20:00:00 +0000 2011"
}"#;

/// `current` trends keyed by snapshot time.
pub const TRENDS_CURRENT: &str = r##"{
    "trends": {
        "2011-10-06 19:36:17": [
            {"name": "#rustlang", "query": "%23rustlang"},
            {"name": "Steve Jobs", "query": "%22Steve+Jobs%22"}
        ]
    },
    "as_of": 1317929777
}"##;

/// `daily` trends with two hourly snapshots, listed out of order.
pub const TRENDS_DAILY: &str = r##"{
    "trends": {
        "2011-10-06 01:00": [{"name": "#oneam", "query": "%23oneam"}],
        "2011-10-06 00:00": [
            {"name": "#midnight", "query": "%23midnight"},
            {"name": "Steve Jobs", "query": "%22Steve+Jobs%22"}
        ]
    },
    "as_of": 1317929777
}"##;

pub const TREND_LOCATIONS: &str = r#"[
    {"name": "Worldwide", "woeid": 1, "country": "", "countryCode": null, "parentid": 0,
     "url": "http://where.yahooapis.com/v1/place/1",
     "placeType": {"name": "Supername", "code": 19}},
    {"name": "London", "woeid": 44418, "country": "United Kingdom", "countryCode": "GB", "parentid": 23424975,
     "url": "http://where.yahooapis.com/v1/place/44418",
     "placeType": {"name": "Town", "code": 7}}
]"#;

pub const MEDIA_ENTITIES: &str = r#"{
    "media": [{
        "id": 114080493040967680,
        "media_url": "http://p.twimg.com/AZVLmp-CIAAbkyy.jpg",
        "media_url_https": "https://p.twimg.com/AZVLmp-CIAAbkyy.jpg",
        "url": "http://t.co/rJC5Pxsu",
        "display_url": "pic.twitter.com/rJC5Pxsu",
        "expanded_url": "http://twitter.com/yunorno/status/114080493036773378/photo/1",
        "sizes": {"thumb": {"h": 150, "w": 150, "resize": "crop"}},
        "type": "photo",
        "indices": [22, 42]
    }],
    "urls": [{"url": "http://t.co/0JG5Mcq", "expanded_url": "http://blog.example.com/", "display_url": "blog.example.com", "indices": [84, 103]}],
    "hashtags": [{"text": "rustlang", "indices": [5, 14]}],
    "user_mentions": []
}"#;
