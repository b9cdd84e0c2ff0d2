//! # Gophermart TUI - loyalty points client
//!
//! A terminal client for the Gophermart loyalty service: register or log in,
//! upload orders for points accrual, withdraw points and browse order and
//! withdrawal history. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! - **API**: typed HTTP client over a pluggable transport
//! - **Session**: in-memory bearer credential for the signed-in user
//! - **Router**: resolves a location path to a page
//! - **Auth / Dashboard**: page controllers and their network flows
//! - **State**: centralized store, actions and effects
//! - **Events / UI / App**: input handling, rendering and the event loop
//! - **Config**: layered configuration

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod router;
pub mod session;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
