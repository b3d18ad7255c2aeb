//! Action keywords, HTTP methods and API resources.
//!
//! Actions are the logical verbs callers use (`info`, `friends`, `post`, …).
//! Which actions a [`Resource`] understands is decided by its routing table,
//! not by this module: an [`Action`] is just a keyword.

use crate::error::RoutingError;

/// A logical action keyword.
///
/// Parses from its snake_case spelling, with or without a leading `:`
/// (`"info"` and `":info"` are equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Info,
    Friends,
    Followers,
    Get,
    Post,
    Delete,
    Reply,
    Add,
    Remove,
    Received,
    Sent,
    Public,
    Home,
    User,
    Me,
    Mentions,
    List,
    RateLimitStatus,
    Current,
    Daily,
    Weekly,
    Locations,
}

impl Action {
    /// Every action keyword, in declaration order.
    pub const ALL: [Action; 22] = [
        Action::Info,
        Action::Friends,
        Action::Followers,
        Action::Get,
        Action::Post,
        Action::Delete,
        Action::Reply,
        Action::Add,
        Action::Remove,
        Action::Received,
        Action::Sent,
        Action::Public,
        Action::Home,
        Action::User,
        Action::Me,
        Action::Mentions,
        Action::List,
        Action::RateLimitStatus,
        Action::Current,
        Action::Daily,
        Action::Weekly,
        Action::Locations,
    ];

    /// The keyword as written on the wire and on the command line.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Info => "info",
            Action::Friends => "friends",
            Action::Followers => "followers",
            Action::Get => "get",
            Action::Post => "post",
            Action::Delete => "delete",
            Action::Reply => "reply",
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Received => "received",
            Action::Sent => "sent",
            Action::Public => "public",
            Action::Home => "home",
            Action::User => "user",
            Action::Me => "me",
            Action::Mentions => "mentions",
            Action::List => "list",
            Action::RateLimitStatus => "rate_limit_status",
            Action::Current => "current",
            Action::Daily => "daily",
            Action::Weekly => "weekly",
            Action::Locations => "locations",
        }
    }
}

/// Formats the action as its bare keyword (e.g. `"friends"`).
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parses an [`Action`] from its keyword, tolerating a leading `:`.
impl std::str::FromStr for Action {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s.trim().trim_start_matches(':');
        Action::ALL
            .into_iter()
            .find(|a| a.keyword() == keyword)
            .ok_or_else(|| format!("unknown action keyword {:?}", s))
    }
}

/// HTTP method a route is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API resource with its own routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Status,
    Message,
    Messages,
    Friendship,
    Timeline,
    Favorites,
    Block,
    Account,
    Trends,
}

impl Resource {
    /// Parse an action keyword in the context of this resource.
    ///
    /// Unknown keywords are reported as [`RoutingError::UnsupportedAction`]
    /// for this resource, the same error an unrouted known keyword produces.
    pub fn parse_action(&self, keyword: &str) -> Result<Action, RoutingError> {
        keyword
            .parse::<Action>()
            .map_err(|_| RoutingError::unsupported(*self, keyword))
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::User => "user",
            Resource::Status => "status",
            Resource::Message => "message",
            Resource::Messages => "messages",
            Resource::Friendship => "friendship",
            Resource::Timeline => "timeline",
            Resource::Favorites => "favorites",
            Resource::Block => "block",
            Resource::Account => "account",
            Resource::Trends => "trends",
        };
        f.write_str(name)
    }
}
