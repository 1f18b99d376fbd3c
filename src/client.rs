use std::collections::BTreeMap;
use std::net::SocketAddr;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;

use crate::common::{Request, Response};
use crate::{KvError, Result};

/// The client of a key-value store.
pub struct KvsClient {
    http: Client,
    base_url: String,
}

impl KvsClient {
    /// Creates a client for the server at the given address.
    ///
    /// No connection is made until the first request.
    pub fn new(addr: SocketAddr) -> Result<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: format!("http://{}", addr),
        })
    }

    /// Sets a key-value pair on the server.
    pub fn set(&self, key: String, value: String) -> Result<()> {
        let request = Request::Set { key, value };
        match self.send(self.http.post(self.url("/set")), &request)? {
            Response::Set { .. } => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Gets the value for a key from the server.
    pub fn get(&self, key: String) -> Result<Option<String>> {
        let request = Request::Get { key };
        match self.send(self.http.get(self.url("/get")), &request)? {
            Response::Get { value, .. } => Ok(Some(value)),
            Response::NotFound { .. } => Ok(None),
            other => Err(unexpected(other)),
        }
    }

    /// Gets every key-value pair from the server.
    pub fn all(&self) -> Result<BTreeMap<String, String>> {
        match self.send(self.http.get(self.url("/all")), &Request::All)? {
            Response::All { values, .. } => Ok(values),
            other => Err(unexpected(other)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, builder: RequestBuilder, request: &Request) -> Result<Response> {
        let resp = builder.json(request).send()?;
        let status = resp.status();
        let body = resp.text()?;

        // Error bodies are not guaranteed to be JSON, so decode leniently.
        match serde_json::from_str::<Response>(&body) {
            Ok(Response::Err { error }) => Err(KvError::StringError(error)),
            Ok(response) if status.is_success() || status == StatusCode::NOT_FOUND => {
                Ok(response)
            }
            _ => Err(KvError::StringError(format!(
                "Server responded with {}",
                status
            ))),
        }
    }
}

fn unexpected(response: Response) -> KvError {
    KvError::StringError(format!("Unexpected response: {:?}", response))
}
