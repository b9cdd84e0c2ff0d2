//! Gophermart API integration.
//!
//! This module provides a typed interface to the Gophermart HTTP API,
//! normalizing every response into an [`ApiResponse`] and converting
//! payloads into internal state types.

mod client;
mod converter;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiResponse, AuthEndpoint, GophermartApi};
pub use converter::DataConverter;
pub use transport::{Body, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
