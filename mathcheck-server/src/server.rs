//! The HTTP transport: a fixed pool of worker threads sharing one listening socket.

use std::{io::Read, sync::Arc, thread, time::Instant};
use tiny_http::{Header, Request, Response, Server};
use tracing::{info, warn};
use crate::config::Config;
use crate::error::ServerError;
use crate::routes::{route, too_large, Reply};

/// Stack size of the worker threads. Analyses recurse over expression trees up to the parser's
/// nesting limit.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Returns the value of the `Origin` header, if any.
fn origin(request: &Request) -> Option<String> {
    request.headers()
        .iter()
        .find(|header| header.field.equiv("Origin"))
        .map(|header| header.value.as_str().to_owned())
}

/// Reads at most one byte past the limit, so that oversized bodies are detected without reading
/// them whole.
fn read_body(request: &mut Request, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    request.as_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)?;
    Ok(body)
}

/// Writes the reply to the client.
fn respond(request: Request, reply: Reply) {
    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    for (name, value) in &reply.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => warn!(%name, %value, "invalid response header"),
        }
    }
    if let Err(err) = request.respond(response) {
        warn!(%err, "failed to write the response");
    }
}

/// Serves one request.
fn handle(mut request: Request, config: &Config) {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.url().to_owned();
    let origin = origin(&request);

    let reply = if request.body_length().map_or(false, |len| len > config.server.max_body_bytes) {
        too_large(origin.as_deref(), config)
    } else {
        match read_body(&mut request, config.server.max_body_bytes) {
            Ok(body) => route(&method, &path, origin.as_deref(), &body, config),
            Err(err) => {
                warn!(%err, "failed to read the request body");
                Reply::error(400, "solicitud_invalida", "no se pudo leer el cuerpo de la solicitud")
            },
        }
    };

    info!(
        %method,
        path = %path,
        status = reply.status,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "request",
    );
    respond(request, reply);
}

/// Accepts requests until the listening socket fails.
fn worker(server: &Server, config: &Config) {
    loop {
        match server.recv() {
            Ok(request) => handle(request, config),
            Err(err) => {
                warn!(%err, "failed to accept a request");
                return;
            },
        }
    }
}

/// Listens on the configured address and serves requests until every worker stops.
pub fn serve(config: Config) -> Result<(), ServerError> {
    let addr = config.address();
    let server = Server::http(&addr)
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;
    info!(%addr, workers = config.server.workers, "listening");

    let server = Arc::new(server);
    let config = Arc::new(config);
    let handles = (0..config.server.workers)
        .map(|id| {
            let server = Arc::clone(&server);
            let config = Arc::clone(&config);
            thread::Builder::new()
                .name(format!("mathcheck-worker-{}", id))
                .stack_size(WORKER_STACK_SIZE)
                .spawn(move || worker(&server, &config))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        let name = handle.thread().name().unwrap_or("worker").to_owned();
        handle.join().map_err(|_| ServerError::WorkerPanicked(name))?;
    }
    Ok(())
}
