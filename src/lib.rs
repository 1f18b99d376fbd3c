#![deny(missing_docs)]

//! An in-memory key-value store served over HTTP.
//!
//! The server accepts JSON bodies on `POST /set`, `GET /get` and
//! `GET /all`, decodes them into a [`Request`], runs the request
//! against a [`KvsEngine`] and replies with a [`Response`].

mod client;
mod common;
mod dispatch;
mod engines;
mod error;
mod server;

pub use client::KvsClient;
pub use common::{
    decode, Endpoint, Request, Response, ALL_MESSAGE, GET_MESSAGE, NOT_FOUND_MESSAGE,
    SET_MESSAGE,
};
pub use dispatch::dispatch;
pub use engines::{KvStore, KvsEngine};
pub use error::{KvError, Result};
pub use server::{routes, routes_with_limit, KvsServer, DEFAULT_PAYLOAD_LIMIT};
