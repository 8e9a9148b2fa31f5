//! Core types for bookshelf
//!
//! Domain types, input validation and startup configuration shared by the
//! storage, service, HTTP and CLI crates.

mod book;
mod config;
mod constants;
mod env_config;
mod error;

pub use book::*;
pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
