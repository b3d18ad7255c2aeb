//! Request plans: the pure result of routing plus identifier resolution.
//!
//! A [`RequestPlan`] is everything the transport needs: method, path and
//! parameters. Building one never performs I/O, so every pre-flight failure
//! ([`RoutingError`]) surfaces here, before a request exists.
//!
//! Each `plan_*` function routes first and resolves its arguments second.
//! That ordering makes structurally excluded actions (message `get`) fail
//! with [`RoutingError::NotImplemented`] whatever arguments accompany them.

use std::collections::BTreeMap;

use serde_json::Value;
use urlencoding::encode;

use crate::action::{Action, Method, Resource};
use crate::error::RoutingError;
use crate::reference::{IntoReference, Reference};
use crate::table::table;

/// Request parameters, ordered by key so plans compare and print stably.
pub type Params = BTreeMap<String, String>;

/// A fully resolved request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub resource: Resource,
    pub action: Action,
    pub method: Method,
    pub path: String,
    pub params: Params,
}

impl RequestPlan {
    /// Route `action` on `resource` and start an empty plan.
    pub fn route(resource: Resource, action: Action) -> Result<Self, RoutingError> {
        let route = table(resource).route(action)?;
        Ok(Self {
            resource,
            action,
            method: route.method,
            path: route.path.to_string(),
            params: Params::new(),
        })
    }

    /// Add or replace one parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge caller-supplied extra parameters. Keys the plan already holds
    /// (the resolved identifier, posted text) are left untouched.
    pub fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        for (key, value) in options {
            self.params
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        self
    }

    fn with_pair(self, (key, value): (&'static str, String)) -> Self {
        self.with_param(key, value)
    }

    /// `k1=v1&k2=v2`, percent-encoded, in key order. Empty when there are no
    /// parameters.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Formats as `METHOD path[?query]`, e.g. `GET /1/users/show.json?user_id=42`.
impl std::fmt::Display for RequestPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            write!(f, "{} {}", self.method, self.path)
        } else {
            write!(f, "{} {}?{}", self.method, self.path, self.query_string())
        }
    }
}

// --- status and message arguments -------------------------------------------
/// The argument of a status request: a status to act on, new text to post,
/// or a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Target(Reference),
    Text(String),
    Reply { text: String, in_reply_to: Reference },
}

impl StatusValue {
    pub fn reply(text: impl Into<String>, in_reply_to: impl IntoReference) -> Result<Self, RoutingError> {
        Ok(StatusValue::Reply {
            text: text.into(),
            in_reply_to: in_reply_to.into_reference()?,
        })
    }
}

/// Conversion of caller input into a [`StatusValue`]. Integers target an
/// existing status; strings are text to post.
pub trait IntoStatusValue {
    fn into_status_value(self) -> Result<StatusValue, RoutingError>;
}

impl IntoStatusValue for StatusValue {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        Ok(self)
    }
}

impl IntoStatusValue for u64 {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        Ok(StatusValue::Target(Reference::Id(self)))
    }
}

impl IntoStatusValue for i64 {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        self.into_reference().map(StatusValue::Target)
    }
}

impl IntoStatusValue for u32 {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        Ok(StatusValue::Target(Reference::Id(self.into())))
    }
}

impl IntoStatusValue for i32 {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        self.into_reference().map(StatusValue::Target)
    }
}

impl IntoStatusValue for &str {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        Ok(StatusValue::Text(self.to_string()))
    }
}

impl IntoStatusValue for String {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        Ok(StatusValue::Text(self))
    }
}

impl IntoStatusValue for &Value {
    fn into_status_value(self) -> Result<StatusValue, RoutingError> {
        match self {
            Value::String(s) => Ok(StatusValue::Text(s.clone())),
            other => other.into_reference().map(StatusValue::Target),
        }
    }
}

/// The argument of a direct-message request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValue {
    Target(Reference),
    Post { text: String, recipient: Reference },
}

impl MessageValue {
    pub fn post(text: impl Into<String>, recipient: impl IntoReference) -> Result<Self, RoutingError> {
        Ok(MessageValue::Post {
            text: text.into(),
            recipient: recipient.into_reference()?,
        })
    }
}

/// Conversion of caller input into a [`MessageValue`].
pub trait IntoMessageValue {
    fn into_message_value(self) -> Result<MessageValue, RoutingError>;
}

impl IntoMessageValue for MessageValue {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        Ok(self)
    }
}

impl IntoMessageValue for u64 {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        Ok(MessageValue::Target(Reference::Id(self)))
    }
}

impl IntoMessageValue for u32 {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        Ok(MessageValue::Target(Reference::Id(self.into())))
    }
}

impl IntoMessageValue for i64 {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        self.into_reference().map(MessageValue::Target)
    }
}

impl IntoMessageValue for i32 {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        self.into_reference().map(MessageValue::Target)
    }
}

impl IntoMessageValue for &Value {
    fn into_message_value(self) -> Result<MessageValue, RoutingError> {
        self.into_reference().map(MessageValue::Target)
    }
}

// --- planning ---------------------------------------------------------------
/// `user(reference, action)`: info, friends or followers of a user.
pub fn plan_user(action: Action, reference: impl IntoReference) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::User, action)?;
    Ok(plan.with_pair(reference.into_reference()?.user_param()))
}

/// `status(action, value)`: get, post, delete or reply.
pub fn plan_status(action: Action, value: impl IntoStatusValue) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Status, action)?;
    match (action, value.into_status_value()?) {
        (Action::Get | Action::Delete, StatusValue::Target(r)) => Ok(plan.with_pair(r.id_param()?)),
        (Action::Post, StatusValue::Text(text)) => Ok(plan.with_param("status", text)),
        (Action::Reply, StatusValue::Reply { text, in_reply_to }) => {
            let (_, id) = in_reply_to.id_param()?;
            Ok(plan
                .with_param("status", text)
                .with_param("in_reply_to_status_id", id))
        }
        (action, value) => Err(RoutingError::invalid(format!(
            "status {} cannot take {:?}",
            action, value
        ))),
    }
}

/// `message(action, value)`: post or delete a direct message.
pub fn plan_message(action: Action, value: impl IntoMessageValue) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Message, action)?;
    match (action, value.into_message_value()?) {
        (Action::Delete, MessageValue::Target(r)) => Ok(plan.with_pair(r.id_param()?)),
        (Action::Post, MessageValue::Post { text, recipient }) => Ok(plan
            .with_param("text", text)
            .with_pair(recipient.user_param())),
        (action, value) => Err(RoutingError::invalid(format!(
            "message {} cannot take {:?}",
            action, value
        ))),
    }
}

/// `messages(action)`: received or sent direct messages.
pub fn plan_messages(action: Action) -> Result<RequestPlan, RoutingError> {
    RequestPlan::route(Resource::Messages, action)
}

/// `friend(action, reference)`: befriend or defriend a user.
pub fn plan_friendship(action: Action, reference: impl IntoReference) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Friendship, action)?;
    Ok(plan.with_pair(reference.into_reference()?.user_param()))
}

/// `timeline_for(action, reference)`: the reference, when given, selects
/// whose timeline is read.
pub fn plan_timeline(
    action: Action,
    reference: Option<impl IntoReference>,
) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Timeline, action)?;
    Ok(match reference {
        Some(r) => plan.with_pair(r.into_reference()?.user_param()),
        None => plan,
    })
}

/// `favorites`: `list` takes an optional user, `add`/`remove` a status.
pub fn plan_favorites(
    action: Action,
    reference: Option<impl IntoReference>,
) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Favorites, action)?;
    let reference = reference.map(IntoReference::into_reference).transpose()?;
    match (action, reference) {
        (Action::List, None) => Ok(plan),
        (Action::List, Some(user)) => Ok(plan.with_pair(user.user_param())),
        (_, Some(status)) => Ok(plan.with_pair(status.id_param()?)),
        (action, None) => Err(RoutingError::invalid(format!(
            "favorites {} requires a status id",
            action
        ))),
    }
}

/// `block(action, reference)`: block or unblock a user.
pub fn plan_block(action: Action, reference: impl IntoReference) -> Result<RequestPlan, RoutingError> {
    let plan = RequestPlan::route(Resource::Block, action)?;
    Ok(plan.with_pair(reference.into_reference()?.user_param()))
}

/// `account(action)`: account-level reads such as the rate-limit status.
pub fn plan_account(action: Action) -> Result<RequestPlan, RoutingError> {
    RequestPlan::route(Resource::Account, action)
}

/// `trends(action)`: trend lines and the locations they are available for.
pub fn plan_trends(action: Action) -> Result<RequestPlan, RoutingError> {
    RequestPlan::route(Resource::Trends, action)
}
