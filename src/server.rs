use std::net::ToSocketAddrs;

use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use log::{debug, info, warn};

use crate::common::{decode, Endpoint, Response};
use crate::dispatch::dispatch;
use crate::engines::KvsEngine;
use crate::{KvError, Result};

/// The server of a key-value store.
///
/// Generic over the storage engine `E`. Requests are handled on
/// actix worker threads, each holding a clone of the engine.
pub struct KvsServer<E: KvsEngine> {
    engine: E,
    workers: usize,
    payload_limit: usize,
}

impl<E: KvsEngine> KvsServer<E> {
    /// Creates a `KvsServer` with a given storage engine and one worker per CPU.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            workers: num_cpus::get(),
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
        }
    }

    /// Sets the number of worker threads. Zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the largest request body accepted, in bytes.
    pub fn payload_limit(mut self, bytes: usize) -> Self {
        self.payload_limit = bytes;
        self
    }

    /// Runs the server, listening for connections on the given address.
    ///
    /// Returns once the server has shut down.
    pub async fn run(self, addr: impl ToSocketAddrs) -> Result<()> {
        let engine = web::Data::new(self.engine);
        let payload_limit = self.payload_limit;
        info!(
            "Starting {} workers, body limit {} bytes",
            self.workers, payload_limit
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .configure(routes_with_limit(engine.clone(), payload_limit))
        })
        .workers(self.workers)
        .bind(addr)?
        .run()
        .await?;

        Ok(())
    }
}

/// Largest request body accepted by default, in bytes.
pub const DEFAULT_PAYLOAD_LIMIT: usize = 64 * 1024 * 1024;

/// Registers the `/set`, `/get` and `/all` routes backed by `engine`,
/// accepting bodies up to [`DEFAULT_PAYLOAD_LIMIT`] bytes.
pub fn routes<E: KvsEngine>(engine: web::Data<E>) -> impl FnOnce(&mut web::ServiceConfig) {
    routes_with_limit(engine, DEFAULT_PAYLOAD_LIMIT)
}

/// Registers the routes with a custom request body limit in bytes.
///
/// Larger bodies are answered with 413 and the usual `{"error": ...}` body.
pub fn routes_with_limit<E: KvsEngine>(
    engine: web::Data<E>,
    payload_limit: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(engine)
            .app_data(web::PayloadConfig::new(payload_limit))
            .route("/set", web::post().to(write_handler::<E>))
            .route("/get", web::get().to(read_handler::<E>))
            .route("/all", web::get().to(read_handler::<E>));
    }
}

// The body extractor error is taken as a value so that oversize or broken
// payloads still answer with the JSON error shape.
type Body = std::result::Result<web::Bytes, actix_web::Error>;

async fn write_handler<E: KvsEngine>(engine: web::Data<E>, body: Body) -> Result<HttpResponse> {
    handle(engine.get_ref(), body, Endpoint::Write)
}

async fn read_handler<E: KvsEngine>(engine: web::Data<E>, body: Body) -> Result<HttpResponse> {
    handle(engine.get_ref(), body, Endpoint::Read)
}

/// Decodes a body, runs it against the engine and builds the HTTP reply.
fn handle<E: KvsEngine>(engine: &E, body: Body, endpoint: Endpoint) -> Result<HttpResponse> {
    let body = body.map_err(|e| {
        let status = e.as_response_error().status_code();
        warn!("Unreadable {} request body ({}): {}", endpoint, status, e);
        KvError::Payload {
            status: status.as_u16(),
            reason: e.to_string(),
        }
    })?;
    let request = decode(&body, endpoint).map_err(|e| {
        warn!("Rejected {} request: {}", endpoint, e);
        e
    })?;
    debug!("Received request: {:?}", request);

    let response = dispatch(engine, request);
    Ok(HttpResponse::build(status_of(&response)).json(response))
}

fn status_of(response: &Response) -> StatusCode {
    match response {
        Response::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    }
}

impl ResponseError for KvError {
    fn status_code(&self) -> StatusCode {
        match self {
            KvError::Payload { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            e if e.is_decode_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Response::Err {
            error: self.to_string(),
        })
    }
}
