//! The client context and its request dispatcher.
//!
//! Every dispatcher method follows the same sequence:
//!
//! 1. plan: route the action, then resolve the caller's reference
//!    (`warbler_routing::plan_*`, pure);
//! 2. invoke the [`Transport`];
//! 3. unmarshal the body into entities;
//! 4. bind them to this client;
//! 5. return them.
//!
//! Failures in step 1 never reach the transport.

use std::sync::Arc;

use tracing::debug;
use warbler_routing::{
    plan_account, plan_block, plan_favorites, plan_friendship, plan_message, plan_messages,
    plan_status, plan_timeline, plan_trends, plan_user, Action, IntoMessageValue, IntoReference,
    IntoStatusValue, Reference, RequestPlan, Resource, RoutingError,
};

use crate::config::{default_config, ClientConfig, ConfigOverrides};
use crate::error::{Error, Result};
use crate::marshal::{unmarshal, Batch, Payload};
use crate::model::{Location, Message, RateLimitStatus, Status, Trendline, User};
use crate::schema::Entity;
use crate::transport::Transport;

/// A configured, authenticated API client.
///
/// Cheap to clone: clones share one configuration and transport. Entities
/// bound to a client hold such a clone.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    login: Option<String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("login", &self.inner.login)
            .field("host", &self.inner.config.host)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    transport: Arc<dyn Transport>,
    login: Option<String>,
    config: Option<ClientConfig>,
    overrides: ConfigOverrides,
}

impl ClientBuilder {
    /// The screen name of the authenticated user.
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Start from `config` instead of the process-wide default.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Snapshot the configuration and build the client.
    pub fn build(self) -> Client {
        let base = self.config.unwrap_or_else(default_config);
        Client {
            inner: Arc::new(ClientInner {
                config: base.with_overrides(&self.overrides),
                login: self.login,
                transport: self.transport,
            }),
        }
    }
}

impl Client {
    pub fn builder(transport: impl Transport + 'static) -> ClientBuilder {
        Self::builder_shared(Arc::new(transport))
    }

    /// Like [`builder`](Self::builder) for a transport that is already shared.
    pub fn builder_shared(transport: Arc<dyn Transport>) -> ClientBuilder {
        ClientBuilder {
            transport,
            login: None,
            config: None,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn login(&self) -> Option<&str> {
        self.inner.login.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The client's own login as a reference. A missing login is an
    /// [`RoutingError::InvalidReference`], reported after routing.
    fn own_reference(&self) -> std::result::Result<Reference, RoutingError> {
        match self.login() {
            Some(login) => Reference::name(login),
            None => Err(RoutingError::InvalidReference(
                "client has no login".into(),
            )),
        }
    }

    fn execute<E: Entity>(&self, plan: RequestPlan) -> Result<Payload<E>> {
        debug!(%plan, kind = E::SCHEMA.kind, "dispatching request");
        let body = self
            .inner
            .transport
            .invoke(plan.method, &plan.path, &plan.params)?;
        let mut payload = unmarshal::<E>(body.as_str())?;
        payload.bind(self);
        Ok(payload)
    }

    // --- dispatcher ---------------------------------------------------------
    /// `info` returns one user; `friends` and `followers` return many.
    ///
    /// `options` are extra request parameters (`cursor`, `include_entities`,
    /// ...). They never replace the resolved identifier.
    pub fn user(
        &self,
        action: Action,
        user: impl IntoReference,
        options: &[(&str, &str)],
    ) -> Result<Payload<User>> {
        self.execute(plan_user(action, user)?.with_options(options))
    }

    /// [`user`](Self::user) for the client's own login.
    pub fn my(&self, action: Action, options: &[(&str, &str)]) -> Result<Payload<User>> {
        self.execute(plan_user(action, self.own_reference())?.with_options(options))
    }

    /// `get`, `delete`, `post` (text) or `reply`
    /// ([`StatusValue::Reply`](warbler_routing::StatusValue::Reply)). Posts
    /// and replies carry the configured `source`.
    pub fn status(&self, action: Action, value: impl IntoStatusValue) -> Result<Status> {
        let mut plan = plan_status(action, value)?;
        if matches!(action, Action::Post | Action::Reply) {
            plan = plan.with_param("source", self.config().source.clone());
        }
        self.execute(plan)?.into_one()
    }

    /// `post` ([`MessageValue::Post`](warbler_routing::MessageValue::Post))
    /// or `delete`. `get` is not implemented.
    pub fn message(&self, action: Action, value: impl IntoMessageValue) -> Result<Message> {
        self.execute(plan_message(action, value)?)?.into_one()
    }

    /// `received` or `sent` direct messages.
    pub fn messages(&self, action: Action, options: &[(&str, &str)]) -> Result<Batch<Message>> {
        Ok(self
            .execute(plan_messages(action)?.with_options(options))?
            .into_many())
    }

    /// `add` or `remove` a friendship; returns the other user.
    pub fn friend(&self, action: Action, user: impl IntoReference) -> Result<User> {
        self.execute(plan_friendship(action, user)?)?.into_one()
    }

    /// `public`, `friends`, `home`, `me` or `mentions` timeline of the
    /// authenticated user.
    pub fn timeline(&self, action: Action, options: &[(&str, &str)]) -> Result<Batch<Status>> {
        let plan = plan_timeline(action, None::<Reference>)?;
        Ok(self.execute(plan.with_options(options))?.into_many())
    }

    /// A timeline of the given user, usually `user`.
    pub fn timeline_for(
        &self,
        action: Action,
        user: impl IntoReference,
        options: &[(&str, &str)],
    ) -> Result<Batch<Status>> {
        let plan = plan_timeline(action, Some(user))?;
        Ok(self.execute(plan.with_options(options))?.into_many())
    }

    /// The authenticated user's favorites.
    pub fn favorites(&self, options: &[(&str, &str)]) -> Result<Batch<Status>> {
        let plan = plan_favorites(Action::List, None::<Reference>)?;
        Ok(self.execute(plan.with_options(options))?.into_many())
    }

    /// Another user's favorites.
    pub fn favorites_of(
        &self,
        user: impl IntoReference,
        options: &[(&str, &str)],
    ) -> Result<Batch<Status>> {
        let plan = plan_favorites(Action::List, Some(user))?;
        Ok(self.execute(plan.with_options(options))?.into_many())
    }

    /// `add` or `remove` a status from the authenticated user's favorites.
    pub fn favorite(&self, action: Action, status: impl IntoReference) -> Result<Status> {
        if action == Action::List {
            return Err(Error::UnsupportedAction {
                resource: Resource::Favorites,
                action: "list (use favorites)".into(),
            });
        }
        self.execute(plan_favorites(action, Some(status))?)?.into_one()
    }

    /// `add` or `remove` a block; returns the blocked user.
    pub fn block(&self, action: Action, user: impl IntoReference) -> Result<User> {
        self.execute(plan_block(action, user)?)?.into_one()
    }

    /// `rate_limit_status`.
    pub fn account_info(&self, action: Action) -> Result<RateLimitStatus> {
        self.execute(plan_account(action)?)?.into_one()
    }

    /// `current`, `daily` or `weekly` trends.
    pub fn trends(&self, action: Action) -> Result<Batch<Trendline>> {
        if action == Action::Locations {
            return Err(Error::UnsupportedAction {
                resource: Resource::Trends,
                action: "locations (use trend_locations)".into(),
            });
        }
        Ok(self.execute(plan_trends(action)?)?.into_many())
    }

    /// Locations trends are available for.
    pub fn trend_locations(&self) -> Result<Batch<Location>> {
        Ok(self.execute(plan_trends(Action::Locations)?)?.into_many())
    }
}
