pub mod config;
pub mod constants;
pub mod controller;
pub mod message;
pub mod reveal;
pub mod session;
pub mod store;
