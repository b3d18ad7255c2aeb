//! The blocking HTTP [`Transport`].

use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use tracing::debug;
use warbler::{ClientConfig, Method, Params, Transport, TransportError};

use crate::auth::Authorizer;
use crate::error::{transport_error, HttpError};

const CLIENT_HEADER: &str = "x-twitter-client";
const CLIENT_VERSION_HEADER: &str = "x-twitter-client-version";
const CLIENT_URL_HEADER: &str = "x-twitter-client-url";

/// Sends requests to the configured API host with `reqwest`.
///
/// `GET` and `DELETE` carry their parameters in the query string; `POST`
/// sends them as a form body. Any non-2xx response becomes
/// [`TransportError::Status`].
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    identity: HeaderMap,
    authorizer: Box<dyn Authorizer>,
}

impl HttpTransport {
    /// Build a transport from `config`. The configuration is copied; later
    /// changes to it have no effect.
    pub fn new(config: &ClientConfig, authorizer: impl Authorizer + 'static) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);

        if let Some(proxy_url) = config.proxy_url() {
            let mut proxy = Proxy::all(&proxy_url)
                .map_err(|e| HttpError::InvalidConfig(format!("proxy {}: {}", proxy_url, e)))?;
            if let (Some(user), Some(pass)) = (&config.proxy_user, &config.proxy_pass) {
                proxy = proxy.basic_auth(user, pass);
            }
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url(),
            identity: identity_headers(config)?,
            authorizer: Box::new(authorizer),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request that [`invoke`](Transport::invoke) would send.
    pub fn build_request(&self, method: Method, path: &str, params: &Params) -> Result<Request, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let request = match method {
            Method::Get => self.client.get(&url).query(params),
            Method::Delete => self.client.delete(&url).query(params),
            Method::Post => self.client.post(&url).form(params),
        };
        let request = request.headers(self.identity.clone());
        self.authorizer
            .authorize(request)
            .build()
            .map_err(transport_error)
    }
}

impl Transport for HttpTransport {
    fn invoke(&self, method: Method, path: &str, params: &Params) -> Result<String, TransportError> {
        let request = self.build_request(method, path, params)?;
        debug!(%method, url = %request.url(), "sending request");

        let response = self.client.execute(request).map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        debug!(%method, path, status = status.as_u16(), bytes = body.len(), "received response");

        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn identity_headers(config: &ClientConfig) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        (CLIENT_HEADER, &config.application_name),
        (CLIENT_VERSION_HEADER, &config.application_version),
        (CLIENT_URL_HEADER, &config.application_url),
    ] {
        let value = HeaderValue::from_str(value)
            .map_err(|_| HttpError::InvalidConfig(format!("{} {:?} is not a valid header value", name, value)))?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}
