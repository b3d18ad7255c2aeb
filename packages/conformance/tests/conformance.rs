//! End-to-end conformance tests for the warbler client.
//!
//! Most tests drive a [`Client`] over a [`RecordingTransport`], which answers
//! by path and records every call so pre-flight failures can be shown to
//! never reach the transport. The `http_*` tests go through the real
//! [`HttpTransport`] against an in-process fake API host
//! ([`warbler_conformance::spawn_api`]).
//!
//! # Coverage
//!
//! | Test | Behaviour |
//! |------|-----------|
//! | `boris_user_scenario` | unmarshal a user, identifier, no self capabilities |
//! | `boris_gains_capabilities_only_for_matching_login` | capability binding |
//! | `cafe_paradiso_friends` | name reference → `screen_name`, friends endpoint |
//! | `reference_forms_resolve_to_the_same_parameter` | `42`, entity with id 42, `"jdoe"` |
//! | `invalid_references_never_reach_transport` | pre-flight `InvalidReference` |
//! | `unsupported_action_never_reaches_transport` | pre-flight `UnsupportedAction` |
//! | `message_get_is_never_implemented` | `NotImplemented` for any argument |
//! | `plural_payload_isolates_bad_element` | N−1 of N hydrate |
//! | `every_entity_type_roundtrips` | field-map projection round-trip |
//! | `equality_clone_and_mutation` | structural equality |
//! | `equality_is_receiver_driven` | asymmetric cross-type equality |
//! | `self_capabilities_followers_and_befriend` | `SelfCapabilities` operations |
//! | `status_operations_from_bound_entity` | reply, favorite, delete |
//! | `message_reply_goes_to_sender` | direct message reply |
//! | `messages_timeline_and_favorites` | list endpoints |
//! | `trends_and_locations` | one trendline per snapshot, locations |
//! | `transport_failure_is_post_flight` | error propagation |
//! | `malformed_response_is_reported` | non-JSON body |
//! | `status_value_shapes` | status argument mismatches |
//! | `configure_affects_only_new_clients` | process-wide default configuration |
//! | `http_get_with_identity_and_auth_headers` | real HTTP GET |
//! | `http_post_sends_form_body` | real HTTP POST |
//! | `http_error_status_is_transport_error` | non-2xx mapping |
//! | `http_connection_failure` | refused connection |

use serde_json::json;
use warbler::{
    configure, equals, unmarshal, Action, Attributes, Client, Entities, Entity, Error,
    HashTag, Location, Media, Message, MessageValue, Method, PlaceType, RateLimitStatus,
    Reference, Status, StatusValue, Trend, Trendline, TransportError, Url, User, UserMention,
};
use warbler_conformance::fixtures::{self, LOGIN};
use warbler_conformance::{spawn_api, RecordingTransport};
use warbler_http::{BearerToken, HttpTransport};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client(transport: &RecordingTransport) -> Client {
    Client::builder(transport.clone()).login(LOGIN).build()
}

fn param<'a>(call: &'a warbler_conformance::Call, key: &str) -> Option<&'a str> {
    call.params.get(key).map(String::as_str)
}

fn fields(raw: &str) -> warbler::FieldMap {
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        other => panic!("fixture is not an object: {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Marshalling and binding
// ---------------------------------------------------------------------------

#[test]
fn boris_user_scenario() {
    let user = unmarshal::<User>(fixtures::BORIS).unwrap().into_one().unwrap();
    assert_eq!(user.identifier(), Some(395783));
    assert_eq!(user.screen_name.as_deref(), Some("boris_johnson_is_funny_as_hell"));
    assert_eq!(user.location.as_deref(), Some("London"));
    assert!(user.client().is_none());
    assert!(user.self_capabilities().is_none());
}

#[test]
fn boris_gains_capabilities_only_for_matching_login() {
    let transport = RecordingTransport::new([("/1/users/show.json", fixtures::BORIS)]);

    let other = client(&transport);
    let user = other.user(Action::Info, 395783u64, &[]).unwrap().into_one().unwrap();
    assert!(user.client().is_some());
    assert!(user.self_capabilities().is_none());

    let boris = Client::builder(transport.clone())
        .login("boris_johnson_is_funny_as_hell")
        .build();
    let user = boris.user(Action::Info, 395783u64, &[]).unwrap().into_one().unwrap();
    assert!(user.self_capabilities().is_some());
    assert!(user.is_me().unwrap());
}

#[test]
fn plural_payload_isolates_bad_element() {
    let batch = unmarshal::<Status>(fixtures::TIMELINE_WITH_ONE_BAD)
        .unwrap()
        .into_many();
    let ids: Vec<_> = batch.iter().filter_map(|s| s.id).collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].index, 1);
}

#[test]
fn every_entity_type_roundtrips() {
    fn roundtrip<E: Entity + PartialEq>(raw: &str) {
        let entity = E::from_fields(fields(raw)).unwrap();
        let projected = entity.to_field_map();
        let back = E::from_fields(projected.clone()).unwrap();
        assert!(back == entity, "{} did not round-trip", E::SCHEMA.kind);
        assert_eq!(back.to_field_map(), projected);
    }

    roundtrip::<User>(fixtures::ME);
    roundtrip::<Status>(fixtures::STATUS);
    roundtrip::<Message>(fixtures::MESSAGE);
    roundtrip::<RateLimitStatus>(fixtures::RATE_LIMIT);
    roundtrip::<Trendline>(r##"{"trends":[{"name":"#rustlang","query":"%23rustlang"}],"as_of":"Thu Oct 06 19:36:17 +0000 2011"}"##);
    roundtrip::<Entities>(fixtures::MEDIA_ENTITIES);
    roundtrip::<Location>(r#"{"name":"London","woeid":44418,"countryCode":"GB","parentid":23424975,"placeType":{"name":"Town","code":7}}"#);
    roundtrip::<PlaceType>(r#"{"name":"Town","code":7}"#);
    roundtrip::<Trend>(r#"{"name":"Steve Jobs","url":"http://search.twitter.com/search?q=%22Steve+Jobs%22","query":"%22Steve+Jobs%22"}"#);
    roundtrip::<Url>(r#"{"url":"http://t.co/0JG5Mcq","display_url":"blog.example.com","indices":[84,103]}"#);
    roundtrip::<Media>(r#"{"id":1,"type":"photo","sizes":{"thumb":{"h":150,"w":150,"resize":"crop"}},"indices":[22,42]}"#);
    roundtrip::<UserMention>(r#"{"id":3,"screen_name":"abdur","name":"Abdur","indices":[50,56]}"#);
    roundtrip::<HashTag>(r#"{"text":"rustlang","indices":[5,14]}"#);
}

#[test]
fn equality_clone_and_mutation() {
    let status = Status::from_fields(fields(fixtures::STATUS)).unwrap();
    let mut copy = status.clone();
    assert_eq!(status, copy);

    copy.text = Some("edited".into());
    assert_ne!(status, copy);

    let mut copy = status.clone();
    if let Some(user) = copy.user.as_mut() {
        user.name = Some("Someone Else".into());
    }
    assert_ne!(status, copy);
}

#[test]
fn equality_is_receiver_driven() {
    let media = Media::from_fields(fields(
        r#"{"id":9,"url":"http://t.co/a","display_url":"pic","expanded_url":"http://x","indices":[0,5]}"#,
    ))
    .unwrap();
    let url = Url::from_fields(fields(
        r#"{"url":"http://t.co/a","display_url":"pic","expanded_url":"http://x","indices":[0,5]}"#,
    ))
    .unwrap();

    assert!(equals(&url, &media).unwrap());
    assert!(matches!(
        equals(&media, &url),
        Err(Error::MissingCapability { attribute: "id", .. })
    ));
}

// ---------------------------------------------------------------------------
// Dispatch and identifier resolution
// ---------------------------------------------------------------------------

#[test]
fn cafe_paradiso_friends() {
    let transport = RecordingTransport::new([("/1/statuses/friends.json", fixtures::FRIENDS)]);
    let friends = client(&transport)
        .user(Action::Friends, "cafe_paradiso", &[])
        .unwrap()
        .into_many();

    let call = transport.single_call();
    assert_eq!(call.method, Method::Get);
    assert_eq!(call.path, "/1/statuses/friends.json");
    assert_eq!(call.params.len(), 1);
    assert_eq!(param(&call, "screen_name"), Some("cafe_paradiso"));

    assert_eq!(friends.len(), 2);
    assert!(friends.iter().all(|f| f.client().is_some()));
}

#[test]
fn reference_forms_resolve_to_the_same_parameter() {
    let transport = RecordingTransport::new([("/1/users/show.json", fixtures::BORIS)]);
    let client = client(&transport);
    let mut entity = User::default();
    entity.id = Some(42);

    client.user(Action::Info, 42u64, &[]).unwrap();
    client.user(Action::Info, &entity, &[]).unwrap();
    client.user(Action::Info, json!(42), &[]).unwrap();
    client.user(Action::Info, "jdoe", &[]).unwrap();
    client.user(Action::Info, "@jdoe", &[]).unwrap();

    let calls = transport.calls();
    for call in &calls[..3] {
        assert_eq!(param(call, "user_id"), Some("42"));
        assert_eq!(param(call, "screen_name"), None);
    }
    for call in &calls[3..] {
        assert_eq!(param(call, "screen_name"), Some("jdoe"));
        assert_eq!(param(call, "user_id"), None);
    }
}

#[test]
fn invalid_references_never_reach_transport() {
    let transport = RecordingTransport::new([("/1/users/show.json", fixtures::BORIS)]);
    let client = client(&transport);

    for err in [
        client.user(Action::Info, json!(null), &[]).unwrap_err(),
        client.user(Action::Info, json!({"id": 42}), &[]).unwrap_err(),
        client.user(Action::Info, -1i64, &[]).unwrap_err(),
        client.user(Action::Info, "", &[]).unwrap_err(),
        client.user(Action::Info, "not a name", &[]).unwrap_err(),
        client.user(Action::Info, &User::default(), &[]).unwrap_err(),
    ] {
        assert!(matches!(err, Error::InvalidReference(_)), "{:?}", err);
        assert!(err.is_preflight());
    }
    transport.assert_no_calls();
}

#[test]
fn unsupported_action_never_reaches_transport() {
    let transport = RecordingTransport::default();
    let client = client(&transport);

    assert!(matches!(
        client.user(Action::Post, 42u64, &[]),
        Err(Error::UnsupportedAction { .. })
    ));
    assert!(matches!(
        client.block(Action::List, "jdoe"),
        Err(Error::UnsupportedAction { .. })
    ));
    assert!(matches!(
        client.messages(Action::Public, &[]),
        Err(Error::UnsupportedAction { .. })
    ));
    assert!(matches!(
        "frobnicate".parse::<Action>(),
        Err(_)
    ));
    transport.assert_no_calls();
}

#[test]
fn message_get_is_never_implemented() {
    let transport = RecordingTransport::default();
    let client = client(&transport);
    let message = Message::from_fields(fields(fixtures::MESSAGE)).unwrap();

    let attempts = [
        client.message(Action::Get, 1u64),
        client.message(Action::Get, &json!("jdoe")),
        client.message(Action::Get, &json!(null)),
        client.message(Action::Get, &message),
        client.message(Action::Get, MessageValue::post("hi", "jdoe").unwrap()),
    ];
    for attempt in attempts {
        assert!(matches!(attempt, Err(Error::NotImplemented { .. })), "{:?}", attempt);
    }
    transport.assert_no_calls();
}

// ---------------------------------------------------------------------------
// Instance operations
// ---------------------------------------------------------------------------

#[test]
fn self_capabilities_followers_and_befriend() {
    let transport = RecordingTransport::new([
        ("/1/users/show.json", fixtures::ME),
        ("/1/statuses/followers.json", fixtures::FOLLOWERS),
        ("/1/friendships/create.json", fixtures::BORIS),
        ("/1/friendships/destroy.json", fixtures::BORIS),
    ]);
    let me = client(&transport).my(Action::Info, &[]).unwrap().into_one().unwrap();
    let caps = me.self_capabilities().expect("own record has self capabilities");

    let followers = caps.followers().unwrap();
    assert_eq!(followers.len(), 2);

    let friend = caps.befriend("boris_johnson_is_funny_as_hell").unwrap();
    assert_eq!(friend.id, Some(395783));
    caps.defriend(&friend).unwrap();

    let calls = transport.calls();
    assert_eq!(param(&calls[0], "screen_name"), Some(LOGIN));
    assert_eq!(calls[1].path, "/1/statuses/followers.json");
    assert_eq!(param(&calls[1], "screen_name"), Some(LOGIN));
    assert_eq!(calls[2].method, Method::Post);
    assert_eq!(param(&calls[2], "screen_name"), Some("boris_johnson_is_funny_as_hell"));
    assert_eq!(calls[3].method, Method::Delete);
    assert_eq!(param(&calls[3], "user_id"), Some("395783"));
}

#[test]
fn status_operations_from_bound_entity() {
    let transport = RecordingTransport::new([
        ("/1/statuses/show.json", fixtures::STATUS),
        ("/1/statuses/update.json", fixtures::STATUS),
        ("/1/favorites/create.json", fixtures::STATUS),
        ("/1/statuses/destroy.json", fixtures::STATUS),
    ]);
    let status = client(&transport).status(Action::Get, 1472669360u64).unwrap();

    status.reply("@dougw ha").unwrap();
    status.favorite().unwrap();
    status.delete().unwrap();

    let calls = transport.calls();
    assert_eq!(param(&calls[0], "id"), Some("1472669360"));
    assert_eq!(calls[1].method, Method::Post);
    assert_eq!(param(&calls[1], "status"), Some("@dougw ha"));
    assert_eq!(param(&calls[1], "in_reply_to_status_id"), Some("1472669360"));
    assert_eq!(param(&calls[1], "source"), Some("warbler"));
    assert_eq!(calls[2].path, "/1/favorites/create.json");
    assert_eq!(param(&calls[2], "id"), Some("1472669360"));
    assert_eq!(calls[3].method, Method::Delete);
}

#[test]
fn message_reply_goes_to_sender() {
    let transport = RecordingTransport::new([
        ("/1/direct_messages/new.json", fixtures::MESSAGE),
        ("/1/direct_messages/destroy.json", fixtures::MESSAGE),
    ]);
    let client = client(&transport);
    let message = client
        .message(Action::Post, MessageValue::post("meet at the cafe?", 9000u64).unwrap())
        .unwrap();
    assert_eq!(message.id, Some(88619848));
    assert!(message.recipient.as_ref().unwrap().self_capabilities().is_some());

    message.reply("sure").unwrap();
    message.delete().unwrap();

    let calls = transport.calls();
    assert_eq!(param(&calls[0], "user_id"), Some("9000"));
    assert_eq!(param(&calls[1], "text"), Some("sure"));
    assert_eq!(param(&calls[1], "user_id"), Some("1"));
    assert_eq!(param(&calls[2], "id"), Some("88619848"));
}

#[test]
fn messages_timeline_and_favorites() {
    let transport = RecordingTransport::new([
        ("/1/direct_messages.json", fixtures::MESSAGES),
        ("/1/direct_messages/sent.json", fixtures::MESSAGES),
        ("/1/statuses/user_timeline.json", fixtures::TIMELINE_WITH_ONE_BAD),
        ("/1/statuses/public_timeline.json", fixtures::TIMELINE_WITH_ONE_BAD),
        ("/1/favorites.json", fixtures::TIMELINE_WITH_ONE_BAD),
    ]);
    let client = client(&transport);

    assert_eq!(client.messages(Action::Received, &[]).unwrap().len(), 2);
    assert_eq!(client.messages(Action::Sent, &[]).unwrap().len(), 2);

    let timeline = client.timeline_for(Action::User, "jdoe", &[]).unwrap();
    assert_eq!(timeline.len(), 2);
    assert!(!timeline.is_complete());
    let own = timeline
        .iter()
        .filter_map(|s| s.user.as_ref())
        .filter(|u| u.self_capabilities().is_some())
        .count();
    assert_eq!(own, 1);

    client.timeline(Action::Public, &[]).unwrap();
    client.favorites(&[]).unwrap();
    client.favorites_of(Reference::Id(7), &[]).unwrap();

    let calls = transport.calls();
    assert_eq!(param(&calls[2], "screen_name"), Some("jdoe"));
    assert!(calls[3].params.is_empty());
    assert!(calls[4].params.is_empty());
    assert_eq!(param(&calls[5], "user_id"), Some("7"));
}

#[test]
fn trends_and_locations() {
    let transport = RecordingTransport::new([
        ("/1/trends/current.json", fixtures::TRENDS_CURRENT),
        ("/1/trends/daily.json", fixtures::TRENDS_DAILY),
        ("/1/trends/available.json", fixtures::TREND_LOCATIONS),
        ("/1/account/rate_limit_status.json", fixtures::RATE_LIMIT),
    ]);
    let client = client(&transport);

    let lines = client.trends(Action::Current).unwrap();
    let names: Vec<_> = lines
        .iter()
        .flat_map(|l| l.trends.iter().flatten())
        .filter_map(|t| t.name.as_deref())
        .collect();
    assert_eq!(names, ["#rustlang", "Steve Jobs"]);

    let daily = client.trends(Action::Daily).unwrap();
    assert_eq!(daily.len(), 2);
    let firsts: Vec<_> = daily
        .iter()
        .map(|l| l.trends.iter().flatten().next().and_then(|t| t.name.clone()))
        .collect();
    assert_eq!(firsts, [Some("#midnight".to_string()), Some("#oneam".to_string())]);
    assert!(daily.entities[0].as_of < daily.entities[1].as_of);

    let locations = client.trend_locations().unwrap();
    let london = locations.iter().find(|l| l.woeid == Some(44418)).unwrap();
    assert_eq!(london.place_type.as_ref().and_then(|p| p.code), Some(7));

    let limit = client.account_info(Action::RateLimitStatus).unwrap();
    assert_eq!(limit.remaining_hits, Some(149));
}

#[test]
fn transport_failure_is_post_flight() {
    let transport = RecordingTransport::default();
    let err = client(&transport).user(Action::Info, 1u64, &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Status { status: 404, .. })
    ));
    assert!(!err.is_preflight());
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn malformed_response_is_reported() {
    let transport = RecordingTransport::new([("/1/users/show.json", "<html>over capacity</html>")]);
    assert!(matches!(
        client(&transport).user(Action::Info, 1u64, &[]),
        Err(Error::MalformedPayload(_))
    ));
}

#[test]
fn configure_affects_only_new_clients() {
    let transport = RecordingTransport::default();
    let before = client(&transport);

    configure(|c| c.application_url = "https://conformance.test/warbler".into());
    let after = client(&transport);

    assert_ne!(before.config().application_url, "https://conformance.test/warbler");
    assert_eq!(after.config().application_url, "https://conformance.test/warbler");
}

#[test]
fn status_value_shapes() {
    let transport = RecordingTransport::default();
    let client = client(&transport);
    assert!(matches!(
        client.status(Action::Reply, "no target"),
        Err(Error::InvalidReference(_))
    ));
    assert!(matches!(
        client.status(Action::Delete, StatusValue::Target(Reference::Name("jdoe".into()))),
        Err(Error::InvalidReference(_))
    ));
    transport.assert_no_calls();
}

// ---------------------------------------------------------------------------
// Real HTTP
// ---------------------------------------------------------------------------

#[test]
fn http_get_with_identity_and_auth_headers() {
    let api = spawn_api([("/1/users/show.json", 200, fixtures::BORIS.to_string())]);
    let transport = HttpTransport::new(&api.config(), BearerToken::new("conformance")).unwrap();
    let client = Client::builder(transport).login(LOGIN).build();

    let user = client
        .user(Action::Info, "boris_johnson_is_funny_as_hell", &[])
        .unwrap()
        .into_one()
        .unwrap();
    assert_eq!(user.id, Some(395783));

    let received = api.received();
    assert_eq!(received.len(), 1);
    let request = &received[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.query.as_deref(), Some("screen_name=boris_johnson_is_funny_as_hell"));
    assert_eq!(request.header("authorization"), Some("Bearer conformance"));
    assert_eq!(request.header("x-twitter-client"), Some("warbler"));
    assert!(request
        .header("user-agent")
        .is_some_and(|ua| ua.starts_with("warbler/")));
}

#[test]
fn http_post_sends_form_body() {
    let api = spawn_api([("/1/statuses/update.json", 200, fixtures::STATUS.to_string())]);
    let transport = HttpTransport::new(&api.config(), BearerToken::new("conformance")).unwrap();
    let client = Client::builder(transport).login(LOGIN).build();

    let status = client.status(Action::Post, "hello from the suite").unwrap();
    assert_eq!(status.id, Some(1472669360));

    let request = &api.received()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.query, None);
    assert_eq!(request.body, "source=warbler&status=hello+from+the+suite");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn http_error_status_is_transport_error() {
    let api = spawn_api([(
        "/1/statuses/show.json",
        403,
        r#"{"error":"Sorry, you are not authorized to see this status."}"#.to_string(),
    )]);
    let transport = HttpTransport::new(&api.config(), BearerToken::new("conformance")).unwrap();
    let client = Client::builder(transport).login(LOGIN).build();

    match client.status(Action::Get, 1u64) {
        Err(Error::Transport(TransportError::Status { status, body })) => {
            assert_eq!(status, 403);
            assert!(body.contains("not authorized"));
        }
        other => panic!("expected a 403 transport error, got {:?}", other),
    }
}

#[test]
fn http_connection_failure() {
    // Nothing listens on port 1.
    let config = warbler::ClientConfig::default().with_overrides(&warbler::ConfigOverrides {
        host: Some("127.0.0.1".into()),
        port: Some(1),
        protocol: Some(warbler::Protocol::Http),
        ..Default::default()
    });
    let transport = HttpTransport::new(&config, BearerToken::new("conformance")).unwrap();
    let err = Client::builder(transport)
        .build()
        .user(Action::Info, 1u64, &[])
        .unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Connection(_))));
}
