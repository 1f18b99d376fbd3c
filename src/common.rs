use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{KvError, Result};

/// Message returned after a successful SET.
pub const SET_MESSAGE: &str = "Value set successfully!";
/// Message returned after a successful GET.
pub const GET_MESSAGE: &str = "Value get successfully!";
/// Message returned after a successful ALL.
pub const ALL_MESSAGE: &str = "Values get successfully!";
/// Message returned when a GET names an absent key.
pub const NOT_FOUND_MESSAGE: &str = "Key not found!";

/// Request sent from client to server.
///
/// On the wire the variant is carried in a `"method"` field, e.g.
/// `{"method":"SET","key":"foo","value":"bar"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "UPPERCASE")]
pub enum Request {
    /// Set a key-value pair.
    Set {
        /// The key to set.
        key: String,
        /// The value to associate with the key.
        value: String,
    },
    /// Get the value for a key.
    Get {
        /// The key to look up.
        key: String,
    },
    /// Get every key-value pair.
    All,
}

/// Response sent from server to client.
///
/// Serialized untagged: only the fields of the variant appear in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// A value was stored.
    Set {
        /// Human-readable outcome.
        message: String,
        /// The key that was set.
        key: String,
        /// The value that was stored.
        value: String,
    },
    /// A value was found.
    Get {
        /// Human-readable outcome.
        message: String,
        /// The stored value.
        value: String,
    },
    /// A snapshot of the whole store.
    All {
        /// Human-readable outcome.
        message: String,
        /// Every key-value pair, ordered by key.
        values: BTreeMap<String, String>,
    },
    /// The requested key is absent.
    NotFound {
        /// Human-readable outcome.
        message: String,
        /// The key that was looked up.
        key: String,
    },
    /// The request could not be served.
    Err {
        /// Description of the failure.
        error: String,
    },
}

/// The class of route a request body arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /set`: accepts `SET` only.
    Write,
    /// `GET /get` and `GET /all`: accepts `GET` and `ALL`.
    Read,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Write => f.write_str("write"),
            Endpoint::Read => f.write_str("read"),
        }
    }
}

#[derive(Deserialize)]
struct RawRequest {
    method: String,
    key: Option<String>,
    value: Option<String>,
}

/// Decodes a raw request body received on `endpoint`.
///
/// # Errors
///
/// - `MalformedBody` if the body is not a JSON object with a string `method`.
/// - `UnsupportedMethod` if the method is unknown or not allowed on `endpoint`.
/// - `MissingField` if the method requires a `key` or `value` that is absent.
pub fn decode(body: &[u8], endpoint: Endpoint) -> Result<Request> {
    let raw: RawRequest = serde_json::from_slice(body).map_err(KvError::MalformedBody)?;

    match (endpoint, raw.method.as_str()) {
        (Endpoint::Write, "SET") => Ok(Request::Set {
            key: raw.key.ok_or(KvError::MissingField("key"))?,
            value: raw.value.ok_or(KvError::MissingField("value"))?,
        }),
        (Endpoint::Read, "GET") => Ok(Request::Get {
            key: raw.key.ok_or(KvError::MissingField("key"))?,
        }),
        (Endpoint::Read, "ALL") => Ok(Request::All),
        _ => Err(KvError::UnsupportedMethod {
            method: raw.method,
            endpoint,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_set() {
        let request = decode(
            br#"{"method":"SET","key":"foo","value":"bar"}"#,
            Endpoint::Write,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::Set {
                key: "foo".to_owned(),
                value: "bar".to_owned()
            }
        );
    }

    #[test]
    fn decode_get_and_all() {
        let get = decode(br#"{"method":"GET","key":"foo"}"#, Endpoint::Read).unwrap();
        assert_eq!(get, Request::Get { key: "foo".to_owned() });

        let all = decode(br#"{"method":"ALL","key":"ignored"}"#, Endpoint::Read).unwrap();
        assert_eq!(all, Request::All);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let bodies: [&[u8]; 5] = [b"", b"{", b"[]", br#"{"key":"foo"}"#, br#"{"method":1}"#];
        for body in bodies {
            assert!(matches!(
                decode(body, Endpoint::Read),
                Err(KvError::MalformedBody(_))
            ));
        }
    }

    #[test]
    fn decode_rejects_method_for_wrong_endpoint() {
        let err = decode(br#"{"method":"GET","key":"foo"}"#, Endpoint::Write).unwrap_err();
        assert!(matches!(
            err,
            KvError::UnsupportedMethod { ref method, endpoint: Endpoint::Write } if method == "GET"
        ));

        let err = decode(
            br#"{"method":"SET","key":"foo","value":"bar"}"#,
            Endpoint::Read,
        )
        .unwrap_err();
        assert!(matches!(err, KvError::UnsupportedMethod { .. }));

        let err = decode(br#"{"method":"set","key":"foo","value":"bar"}"#, Endpoint::Write)
            .unwrap_err();
        assert!(matches!(err, KvError::UnsupportedMethod { .. }));
    }

    #[test]
    fn decode_requires_fields() {
        let err = decode(br#"{"method":"SET","value":"bar"}"#, Endpoint::Write).unwrap_err();
        assert!(matches!(err, KvError::MissingField("key")));

        let err = decode(br#"{"method":"SET","key":"foo"}"#, Endpoint::Write).unwrap_err();
        assert!(matches!(err, KvError::MissingField("value")));

        let err = decode(br#"{"method":"GET"}"#, Endpoint::Read).unwrap_err();
        assert!(matches!(err, KvError::MissingField("key")));
    }

    #[test]
    fn request_wire_format() {
        let body = serde_json::to_value(Request::Set {
            key: "foo".to_owned(),
            value: "bar".to_owned(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"method": "SET", "key": "foo", "value": "bar"})
        );
        assert_eq!(
            serde_json::to_value(Request::All).unwrap(),
            serde_json::json!({"method": "ALL"})
        );
    }
}
