//! Parley is a terminal chat client paired with a small HTTP relay.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state: sessions, the send lifecycle, the
//!   typing reveal, configuration and shared constants.
//! - [`relay`] forwards chat turns to the backend and falls back to an echo
//!   reply when the backend cannot answer; [`server`] exposes it over HTTP.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`api`] defines the wire payloads shared by the relay and its clients.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod relay;
pub mod server;
pub mod ui;
pub mod utils;
