//! Per-resource routing tables.
//!
//! Each [`Resource`] owns a static [`RoutingTable`] mapping action keywords
//! to a `(method, path)` pair. Looking up an action that is not in the
//! table fails with [`RoutingError::UnsupportedAction`]; looking up an action
//! the resource structurally excludes fails with
//! [`RoutingError::NotImplemented`].
//!
//! | Resource | Actions |
//! |----------|---------|
//! | user | `info`, `friends`, `followers` |
//! | status | `get`, `post`, `delete`, `reply` |
//! | message | `post`, `delete` (`get` is not implemented) |
//! | messages | `received`, `sent` |
//! | friendship | `add`, `remove` |
//! | timeline | `public`, `friends`, `home`, `user`, `me`, `mentions` |
//! | favorites | `list`, `add`, `remove` |
//! | block | `add`, `remove` |
//! | account | `rate_limit_status` |
//! | trends | `current`, `daily`, `weekly`, `locations` |

use crate::action::{Action, Method, Resource};
use crate::error::RoutingError;

/// One entry of a routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub method: Method,
    pub path: &'static str,
}

const fn route(action: Action, method: Method, path: &'static str) -> Route {
    Route {
        action,
        method,
        path,
    }
}

/// The action → endpoint map of a single resource.
#[derive(Debug)]
pub struct RoutingTable {
    pub resource: Resource,
    pub routes: &'static [Route],
    /// Actions that are permanently unavailable for this resource.
    pub unimplemented: &'static [Action],
}

impl RoutingTable {
    /// Select the endpoint for `action`.
    pub fn route(&self, action: Action) -> Result<&'static Route, RoutingError> {
        if self.unimplemented.contains(&action) {
            return Err(RoutingError::NotImplemented {
                resource: self.resource,
                action,
            });
        }
        self.routes
            .iter()
            .find(|r| r.action == action)
            .ok_or_else(|| RoutingError::unsupported(self.resource, action))
    }

    /// Actions this table routes, in table order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.routes.iter().map(|r| r.action)
    }
}

/// The routing table for `resource`.
pub fn table(resource: Resource) -> &'static RoutingTable {
    match resource {
        Resource::User => &USER,
        Resource::Status => &STATUS,
        Resource::Message => &MESSAGE,
        Resource::Messages => &MESSAGES,
        Resource::Friendship => &FRIENDSHIP,
        Resource::Timeline => &TIMELINE,
        Resource::Favorites => &FAVORITES,
        Resource::Block => &BLOCK,
        Resource::Account => &ACCOUNT,
        Resource::Trends => &TRENDS,
    }
}

static USER: RoutingTable = RoutingTable {
    resource: Resource::User,
    routes: &[
        route(Action::Info, Method::Get, "/1/users/show.json"),
        route(Action::Friends, Method::Get, "/1/statuses/friends.json"),
        route(Action::Followers, Method::Get, "/1/statuses/followers.json"),
    ],
    unimplemented: &[],
};

static STATUS: RoutingTable = RoutingTable {
    resource: Resource::Status,
    routes: &[
        route(Action::Get, Method::Get, "/1/statuses/show.json"),
        route(Action::Post, Method::Post, "/1/statuses/update.json"),
        route(Action::Delete, Method::Delete, "/1/statuses/destroy.json"),
        route(Action::Reply, Method::Post, "/1/statuses/update.json"),
    ],
    unimplemented: &[],
};

static MESSAGE: RoutingTable = RoutingTable {
    resource: Resource::Message,
    routes: &[
        route(Action::Post, Method::Post, "/1/direct_messages/new.json"),
        route(Action::Delete, Method::Delete, "/1/direct_messages/destroy.json"),
    ],
    unimplemented: &[Action::Get],
};

static MESSAGES: RoutingTable = RoutingTable {
    resource: Resource::Messages,
    routes: &[
        route(Action::Received, Method::Get, "/1/direct_messages.json"),
        route(Action::Sent, Method::Get, "/1/direct_messages/sent.json"),
    ],
    unimplemented: &[],
};

static FRIENDSHIP: RoutingTable = RoutingTable {
    resource: Resource::Friendship,
    routes: &[
        route(Action::Add, Method::Post, "/1/friendships/create.json"),
        route(Action::Remove, Method::Delete, "/1/friendships/destroy.json"),
    ],
    unimplemented: &[],
};

static TIMELINE: RoutingTable = RoutingTable {
    resource: Resource::Timeline,
    routes: &[
        route(Action::Public, Method::Get, "/1/statuses/public_timeline.json"),
        route(Action::Friends, Method::Get, "/1/statuses/friends_timeline.json"),
        route(Action::Home, Method::Get, "/1/statuses/home_timeline.json"),
        route(Action::User, Method::Get, "/1/statuses/user_timeline.json"),
        route(Action::Me, Method::Get, "/1/statuses/user_timeline.json"),
        route(Action::Mentions, Method::Get, "/1/statuses/mentions.json"),
    ],
    unimplemented: &[],
};

static FAVORITES: RoutingTable = RoutingTable {
    resource: Resource::Favorites,
    routes: &[
        route(Action::List, Method::Get, "/1/favorites.json"),
        route(Action::Add, Method::Post, "/1/favorites/create.json"),
        route(Action::Remove, Method::Delete, "/1/favorites/destroy.json"),
    ],
    unimplemented: &[],
};

static BLOCK: RoutingTable = RoutingTable {
    resource: Resource::Block,
    routes: &[
        route(Action::Add, Method::Post, "/1/blocks/create.json"),
        route(Action::Remove, Method::Delete, "/1/blocks/destroy.json"),
    ],
    unimplemented: &[],
};

static ACCOUNT: RoutingTable = RoutingTable {
    resource: Resource::Account,
    routes: &[route(
        Action::RateLimitStatus,
        Method::Get,
        "/1/account/rate_limit_status.json",
    )],
    unimplemented: &[],
};

static TRENDS: RoutingTable = RoutingTable {
    resource: Resource::Trends,
    routes: &[
        route(Action::Current, Method::Get, "/1/trends/current.json"),
        route(Action::Daily, Method::Get, "/1/trends/daily.json"),
        route(Action::Weekly, Method::Get, "/1/trends/weekly.json"),
        route(Action::Locations, Method::Get, "/1/trends/available.json"),
    ],
    unimplemented: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_friends_route() {
        let r = table(Resource::User).route(Action::Friends).unwrap();
        assert_eq!(r.method, Method::Get);
        assert_eq!(r.path, "/1/statuses/friends.json");
    }

    #[test]
    fn unrouted_action_is_unsupported() {
        assert_eq!(
            table(Resource::User).route(Action::Post),
            Err(RoutingError::UnsupportedAction {
                resource: Resource::User,
                action: "post".into(),
            })
        );
    }

    #[test]
    fn message_get_is_not_implemented() {
        assert_eq!(
            table(Resource::Message).route(Action::Get),
            Err(RoutingError::NotImplemented {
                resource: Resource::Message,
                action: Action::Get,
            })
        );
    }

    #[test]
    fn status_delete_uses_delete_method() {
        let r = table(Resource::Status).route(Action::Delete).unwrap();
        assert_eq!(r.method, Method::Delete);
    }

    #[test]
    fn every_table_is_keyed_by_its_resource() {
        for resource in [
            Resource::User,
            Resource::Status,
            Resource::Message,
            Resource::Messages,
            Resource::Friendship,
            Resource::Timeline,
            Resource::Favorites,
            Resource::Block,
            Resource::Account,
            Resource::Trends,
        ] {
            let t = table(resource);
            assert_eq!(t.resource, resource);
            assert!(t.actions().count() > 0);
            for route in t.routes {
                assert!(route.path.starts_with("/1/"), "{} has bad path", route.path);
            }
        }
    }

    #[test]
    fn no_action_is_both_routed_and_unimplemented() {
        let t = table(Resource::Message);
        for action in t.unimplemented {
            assert!(t.actions().all(|a| a != *action));
        }
    }
}
