//! Routing of requests to analyses, independent of the HTTP transport.
//!
//! [`route`] maps a method, a path and a body to a [`Reply`]. It never touches a socket, so every
//! endpoint can be exercised directly in tests.

use mathcheck_error::{Error, ErrorClass};
use serde::Serialize;
use serde_json::json;
use tiny_http::Method;
use tracing::{debug, warn};
use crate::config::Config;
use crate::requests::{
    enforce_limits,
    Analysis,
    InverseRequest,
    ProcessRequest,
    SolveRequest,
    TransformRequest,
    VerifyRequest,
};

/// The endpoints of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Verify,
    Solve,
    VerifyProcess,
    Inverse,
    Transform,
    Health,
}

impl Endpoint {
    /// Finds the endpoint served at the given path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or(path);
        Some(match path.strip_suffix('/').filter(|path| !path.is_empty()).unwrap_or(path) {
            "/verificar" => Self::Verify,
            "/resolver" => Self::Solve,
            "/verificar-proceso" => Self::VerifyProcess,
            "/inversa" => Self::Inverse,
            "/transformar" => Self::Transform,
            "/salud" => Self::Health,
            _ => return None,
        })
    }

    /// Returns the method the endpoint answers to, besides `OPTIONS`.
    pub fn method(self) -> Method {
        match self {
            Self::Health => Method::Get,
            _ => Method::Post,
        }
    }
}

/// A response, ready to be written by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Reply {
    /// Creates a JSON reply.
    pub fn json(status: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self {
                status,
                headers: vec![("Content-Type", "application/json; charset=utf-8".to_owned())],
                body,
            },
            Err(err) => {
                warn!(%err, "failed to serialize a reply");
                Self::error(500, "error_interno", "no se pudo generar la respuesta")
            },
        }
    }

    /// Creates an error reply with the `{error, mensaje}` body.
    pub fn error(status: u16, code: &str, message: impl Into<String>) -> Self {
        let body = json!({ "error": code, "mensaje": message.into() });
        Self {
            status,
            headers: vec![("Content-Type", "application/json; charset=utf-8".to_owned())],
            body: body.to_string(),
        }
    }

    /// Creates a reply with no body.
    pub fn empty(status: u16) -> Self {
        Self { status, headers: Vec::new(), body: String::new() }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Returns the value of the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parses the body and runs the analysis.
fn dispatch<A: Analysis>(body: &[u8], config: &Config) -> Reply {
    let request = match serde_json::from_slice::<A>(body) {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "malformed request body");
            return Reply::error(400, "solicitud_invalida", format!("el cuerpo de la solicitud no es válido: {}", err));
        },
    };

    let result = enforce_limits(&request.texts(), config.limits.into())
        .and_then(|()| request.run());
    match result {
        Ok(output) => Reply::json(200, &output),
        Err(err) => resource_limit(err),
    }
}

/// Answers a request that exceeded a resource limit.
fn resource_limit(err: Error) -> Reply {
    let class = err.class();
    if class != ErrorClass::ResourceLimit {
        // analyses answer every other class with a negative result
        warn!(%class, err = %err.message(), "unexpected analysis error");
    } else {
        warn!(err = %err.message(), "resource limit exceeded");
    }
    Reply::error(422, ErrorClass::ResourceLimit.as_str(), err.message())
}

/// Adds the CORS headers if the origin is allowed.
fn with_cors(reply: Reply, origin: Option<&str>, config: &Config) -> Reply {
    match origin {
        Some(origin) if config.server.allowed_origins.iter().any(|allowed| allowed == origin) => reply
            .with_header("Access-Control-Allow-Origin", origin)
            .with_header("Vary", "Origin"),
        _ => reply,
    }
}

/// Answers a request whose body is larger than allowed, before reading it.
pub fn too_large(origin: Option<&str>, config: &Config) -> Reply {
    let reply = Reply::error(413, "cuerpo_demasiado_grande", format!(
        "el cuerpo de la solicitud supera el máximo de {} bytes",
        config.server.max_body_bytes,
    ));
    with_cors(reply, origin, config)
}

/// Answers one request.
pub fn route(method: &Method, path: &str, origin: Option<&str>, body: &[u8], config: &Config) -> Reply {
    let Some(endpoint) = Endpoint::from_path(path) else {
        return with_cors(Reply::error(404, "no_encontrado", format!("no existe la ruta {}", path)), origin, config);
    };

    let reply = if *method == Method::Options {
        Reply::empty(204)
            .with_header("Access-Control-Allow-Methods", format!("{}, OPTIONS", endpoint.method()))
            .with_header("Access-Control-Allow-Headers", "Content-Type")
            .with_header("Access-Control-Max-Age", "600")
    } else if *method != endpoint.method() {
        Reply::error(405, "metodo_no_permitido", format!("la ruta {} solo acepta {}", path, endpoint.method()))
            .with_header("Allow", format!("{}, OPTIONS", endpoint.method()))
    } else if body.len() > config.server.max_body_bytes {
        return too_large(origin, config);
    } else {
        debug!(?endpoint, len = body.len(), "dispatching");
        match endpoint {
            Endpoint::Verify => dispatch::<VerifyRequest>(body, config),
            Endpoint::Solve => dispatch::<SolveRequest>(body, config),
            Endpoint::VerifyProcess => dispatch::<ProcessRequest>(body, config),
            Endpoint::Inverse => dispatch::<InverseRequest>(body, config),
            Endpoint::Transform => dispatch::<TransformRequest>(body, config),
            Endpoint::Health => Reply::json(200, &json!({
                "estado": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        }
    };
    with_cors(reply, origin, config)
}
