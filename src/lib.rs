//! Blogpad - blog CRUD service with cookie sessions
//!
//! This is the library interface for Blogpad: session management, the
//! authorization gate, blog storage and the HTTP API that ties them together.

pub mod api;
pub mod auth;
pub mod blog;
pub mod cli;
pub mod config;
pub mod error;
pub mod validation;

pub use config::Config;
pub use error::Error;
