//! A small cost-tracking table stored as CSV.
//!
//! Rows are held in a `RowStore`, shown through a `GridView`, and edited with an `EntryForm`.
//! `App` ties these together and the `commands` module exposes them to the CLI.

pub mod app;
pub mod args;
mod backup;
pub mod codec;
pub mod commands;
mod config;
mod error;
pub mod form;
pub mod model;
pub mod store;
mod utils;
pub mod view;


pub use config::Config;
pub use error::{error_type, Error, ErrorType, Result};
