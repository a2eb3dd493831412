//! Command handlers for the cost-tracker CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads the working
//! CSV file into an `App`, changes it, and writes it back.

mod delete;
mod init;
mod insert;
mod query;
mod sync;
mod update;

use crate::app::App;
use crate::args::row_index;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use delete::{clear, delete};
pub use init::init;
pub use insert::add;
pub use query::{list, summary};
pub use sync::{load, save};
pub use update::edit;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the working CSV file named by `config`.
async fn open_app(config: &Config) -> Result<App> {
    App::open(config.data_path())
        .await
        .pub_result(ErrorType::File)
}

/// Writes `app` back to the working CSV file named by `config`.
async fn persist_app(config: &Config, app: &App) -> Result<()> {
    app.persist(config.data_path())
        .await
        .pub_result(ErrorType::File)
}

/// Selects the row with the 1-based number `row`.
fn select_row(app: &mut App, row: usize) -> Result<()> {
    if row_index(row).is_some_and(|ix| app.select(ix)) {
        return Ok(());
    }
    let count = app.store().count();
    Err::<(), _>(anyhow!(
        "There is no row {row}, the table has {count} row{}",
        plural(count)
    ))
    .pub_result(ErrorType::Selection)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
