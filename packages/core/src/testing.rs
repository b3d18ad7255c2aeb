//! Stub transports shared by the unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use warbler_routing::{Method, Params};

use crate::client::Client;
use crate::transport::{Transport, TransportError};

pub(crate) type Call = (Method, String, Params);

pub(crate) fn client_for(login: &str, transport: impl Transport + 'static) -> Client {
    Client::builder(transport).login(login).build()
}

/// Fails every request; for entities that are bound but never dispatch.
#[derive(Debug)]
pub(crate) struct NullTransport;

impl Transport for NullTransport {
    fn invoke(&self, _: Method, path: &str, _: &Params) -> Result<String, TransportError> {
        Err(TransportError::Other(format!("unexpected request to {}", path)))
    }
}

#[derive(Debug)]
pub(crate) struct Failing;

impl Transport for Failing {
    fn invoke(&self, _: Method, _: &str, _: &Params) -> Result<String, TransportError> {
        Err(TransportError::Connection("connection refused".into()))
    }
}

/// Answers every request with the same body and records the calls.
#[derive(Debug, Clone)]
pub(crate) struct Canned {
    body: String,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Canned {
    pub(crate) fn new(body: Value) -> Self {
        Self {
            body: body.to_string(),
            calls: Arc::default(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for Canned {
    fn invoke(&self, method: Method, path: &str, params: &Params) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((method, path.to_string(), params.clone()));
        Ok(self.body.clone())
    }
}
