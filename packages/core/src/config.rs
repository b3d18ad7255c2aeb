//! Client configuration.
//!
//! A process-wide default [`ClientConfig`] lives behind a lock and is changed
//! only through [`configure`]. Each [`Client`](crate::Client) snapshots the
//! default at construction, applies its own [`ConfigOverrides`], and never
//! sees later changes to the default.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `WARBLER_HOST` | `api.twitter.com` | `host` |
//! | `WARBLER_PORT` | `443` | `port` |
//! | `WARBLER_PROTOCOL` | `ssl` | `protocol` (`http` or `ssl`) |
//! | `WARBLER_PROXY_HOST` | (absent) | `proxy_host` |
//! | `WARBLER_PROXY_PORT` | (absent) | `proxy_port` |
//! | `WARBLER_PROXY_USER` | (absent) | `proxy_user` |
//! | `WARBLER_PROXY_PASS` | (absent) | `proxy_pass` |
//! | `WARBLER_USER_AGENT` | `warbler/<version>` | `user_agent` |
//! | `WARBLER_TIMEOUT_SECS` | `20` | `timeout` |
//! | `WARBLER_SOURCE` | `warbler` | `source` |
//! | `WARBLER_OAUTH_CONSUMER_TOKEN` | (absent) | `oauth_consumer_token` |
//! | `WARBLER_OAUTH_CONSUMER_SECRET` | (absent) | `oauth_consumer_secret` |

use std::sync::{LazyLock, PoisonError, RwLock};
use std::time::Duration;

/// Wire protocol used to reach the API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    Http,
    #[default]
    Ssl,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Ssl => "https",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Ssl => write!(f, "ssl"),
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "ssl" | "https" => Ok(Protocol::Ssl),
            other => Err(format!("unknown protocol: {}", other)),
        }
    }
}

/// Options for reaching and identifying to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,

    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,

    pub user_agent: String,
    /// Sent as `X-Twitter-Client`.
    pub application_name: String,
    /// Sent as `X-Twitter-Client-Version`.
    pub application_version: String,
    /// Sent as `X-Twitter-Client-URL`.
    pub application_url: String,
    /// Attribution added to posted statuses.
    pub source: String,

    /// Applied by the transport to each request.
    pub timeout: Duration,

    pub oauth_consumer_token: Option<String>,
    pub oauth_consumer_secret: Option<String>,
    pub oauth_request_token_path: String,
    pub oauth_access_token_path: String,
    pub oauth_authorize_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let version = env!("CARGO_PKG_VERSION");
        Self {
            host: "api.twitter.com".into(),
            port: 443,
            protocol: Protocol::Ssl,
            proxy_host: None,
            proxy_port: None,
            proxy_user: None,
            proxy_pass: None,
            user_agent: format!("warbler/{}", version),
            application_name: "warbler".into(),
            application_version: version.into(),
            application_url: "https://github.com/warbler-rs/warbler".into(),
            source: "warbler".into(),
            timeout: Duration::from_secs(20),
            oauth_consumer_token: None,
            oauth_consumer_secret: None,
            oauth_request_token_path: "/oauth/request_token".into(),
            oauth_access_token_path: "/oauth/access_token".into(),
            oauth_authorize_path: "/oauth/authorize".into(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with any `WARBLER_*` environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(host) = lookup("WARBLER_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("WARBLER_PORT") {
            config.port = parse_var("WARBLER_PORT", &port)?;
        }
        if let Some(protocol) = lookup("WARBLER_PROTOCOL") {
            config.protocol = protocol.parse()?;
        }
        config.proxy_host = lookup("WARBLER_PROXY_HOST");
        config.proxy_port = lookup("WARBLER_PROXY_PORT")
            .map(|p| parse_var("WARBLER_PROXY_PORT", &p))
            .transpose()?;
        config.proxy_user = lookup("WARBLER_PROXY_USER");
        config.proxy_pass = lookup("WARBLER_PROXY_PASS");
        if let Some(agent) = lookup("WARBLER_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("WARBLER_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("WARBLER_TIMEOUT_SECS", &secs)?);
        }
        if let Some(source) = lookup("WARBLER_SOURCE") {
            config.source = source;
        }
        config.oauth_consumer_token = lookup("WARBLER_OAUTH_CONSUMER_TOKEN");
        config.oauth_consumer_secret = lookup("WARBLER_OAUTH_CONSUMER_SECRET");
        Ok(config)
    }

    /// `https://api.twitter.com:443`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    /// `http://host:port` of the proxy, when one is configured.
    pub fn proxy_url(&self) -> Option<String> {
        let host = self.proxy_host.as_deref()?;
        Some(match self.proxy_port {
            Some(port) => format!("http://{}:{}", host, port),
            None => format!("http://{}", host),
        })
    }

    /// A copy with `overrides` applied on top.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        overrides.apply(&mut config);
        config
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("{} must be a number, got {:?}: {}", key, raw, e))
}

/// Per-client changes layered over the default configuration. Unset fields
/// keep the default's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<Protocol>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,
    pub user_agent: Option<String>,
    pub application_name: Option<String>,
    pub application_version: Option<String>,
    pub application_url: Option<String>,
    pub source: Option<String>,
    pub timeout: Option<Duration>,
    pub oauth_consumer_token: Option<String>,
    pub oauth_consumer_secret: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ClientConfig) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set(&mut config.host, &self.host);
        set(&mut config.port, &self.port);
        set(&mut config.protocol, &self.protocol);
        set_opt(&mut config.proxy_host, &self.proxy_host);
        set_opt(&mut config.proxy_port, &self.proxy_port);
        set_opt(&mut config.proxy_user, &self.proxy_user);
        set_opt(&mut config.proxy_pass, &self.proxy_pass);
        set(&mut config.user_agent, &self.user_agent);
        set(&mut config.application_name, &self.application_name);
        set(&mut config.application_version, &self.application_version);
        set(&mut config.application_url, &self.application_url);
        set(&mut config.source, &self.source);
        set(&mut config.timeout, &self.timeout);
        set_opt(&mut config.oauth_consumer_token, &self.oauth_consumer_token);
        set_opt(&mut config.oauth_consumer_secret, &self.oauth_consumer_secret);
    }
}

static DEFAULT_CONFIG: LazyLock<RwLock<ClientConfig>> =
    LazyLock::new(|| RwLock::new(ClientConfig::default()));

/// A snapshot of the process-wide default configuration.
pub fn default_config() -> ClientConfig {
    DEFAULT_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Change the process-wide default. Clients already built are unaffected.
///
/// The write lock is held while `f` runs, so `f` must not call
/// [`default_config`] or `configure` itself.
pub fn configure<F: FnOnce(&mut ClientConfig)>(f: F) {
    let mut config = DEFAULT_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut config);
}
