//! HTTP transport for the score keeper.
//!
//! - [`router`]: Route table and middleware.
//! - [`handlers`]: Request handlers that drive the shared [`Table`](crate::engine::Table).
//! - [`models`]: Request/response bodies.
//! - [`errors`]: JSON error responses.
//! - [`extract`]: Body extractor that reports malformed JSON as a 400.

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
