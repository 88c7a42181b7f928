//! JSON service exposing the MathCheck analyses.
//!
//! | Route | Body | Answer |
//! | --- | --- | --- |
//! | `POST /verificar` | `{izquierda, derecha}` | [`VerificationResult`](mathcheck_compute::response::VerificationResult) |
//! | `POST /resolver` | `{ecuacion, incognita}` | [`SolveResult`](mathcheck_compute::response::SolveResult) |
//! | `POST /verificar-proceso` | `{pasos, incognita}` | [`ProcessResult`](mathcheck_compute::response::ProcessResult) |
//! | `POST /inversa` | `{funcion, variable}` | [`InverseResult`](mathcheck_compute::response::InverseResult) |
//! | `POST /transformar` | `{funcion, variable, sustitucion}` | [`TransformResult`](mathcheck_compute::response::TransformResult) |
//! | `GET /salud` | | `{estado, version}` |
//!
//! A request that is not valid JSON, or lacks a field, is answered with status 400 and an
//! `{error, mensaje}` body. Invalid math is not a failure of the request: it is answered with
//! status 200 and a negative result. A request that exceeds a resource limit is answered with
//! status 422.

pub mod config;
pub mod error;
pub mod requests;
pub mod routes;
pub mod server;

pub use config::Config;
pub use error::ServerError;
pub use server::serve;
