//! These structs provide the CLI interface for the cost-tracker CLI.

use crate::model::{Entry, RecordColumn};
use crate::Result;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// cost-tracker: keep a small table of cost estimates in a CSV file.
///
/// Each row has a category, item, material, description, quantity, unit cost, cost and notes. The
/// cost is always computed as quantity × unit cost. Run `cost-tracker init` first to create the
/// home directory and the working CSV file, then use the other commands to change it. `save` and
/// `load` copy the table to and from any other CSV file.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the configuration file and the working CSV file.
    ///
    /// The table starts with three example rows unless --empty is given.
    Init(InitArgs),
    /// Show the table and the totals.
    List,
    /// Add a row. Unset fields default to a quantity of 1 at $0.00.
    Add(AddArgs),
    /// Change the row with the given number.
    Edit(EditArgs),
    /// Delete the row with the given number.
    Delete(DeleteArgs),
    /// Delete every row.
    Clear(ClearArgs),
    /// Show the entry count, total cost and average cost.
    Summary,
    /// Export the table to a CSV file.
    Save(PathArgs),
    /// Replace the table with the contents of a CSV file.
    Load(PathArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration and the cost table are held. Defaults to
    /// ~/cost-tracker
    #[arg(long, env = "COST_TRACKER_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `cost-tracker init` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct InitArgs {
    /// Start with an empty table instead of the example rows.
    #[arg(long)]
    empty: bool,
}

impl InitArgs {
    pub fn new(empty: bool) -> Self {
        Self { empty }
    }

    pub fn empty(&self) -> bool {
        self.empty
    }
}

/// Values for the editable columns. Cost is not here because it is computed.
#[derive(Debug, Parser, Clone, Default)]
pub struct EntryArgs {
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    item: Option<String>,

    #[arg(long)]
    material: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// A plain number, e.g. 12 or 2.5
    #[arg(long)]
    quantity: Option<String>,

    /// The price of one unit. `$` and `,` are allowed, e.g. $1,249.50
    #[arg(long)]
    unit_cost: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// Open the entry form to fill in or review the fields interactively.
    #[arg(long)]
    prompt: bool,
}

impl EntryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for one editable column.
    ///
    /// # Errors
    /// - `Cost` cannot be set.
    pub fn with(mut self, column: RecordColumn, value: impl Into<String>) -> Result<Self> {
        let value = Some(value.into());
        match column {
            RecordColumn::Category => self.category = value,
            RecordColumn::Item => self.item = value,
            RecordColumn::Material => self.material = value,
            RecordColumn::Description => self.description = value,
            RecordColumn::Quantity => self.quantity = value,
            RecordColumn::UnitCost => self.unit_cost = value,
            RecordColumn::Notes => self.notes = value,
            RecordColumn::Cost => anyhow::bail!("The {column} column is computed"),
        }
        Ok(self)
    }

    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn prompt(&self) -> bool {
        self.prompt
    }

    /// Overwrites the fields of `entry` that were given on the command line.
    pub fn apply(&self, entry: &mut Entry) -> Result<()> {
        let values = [
            (RecordColumn::Category, &self.category),
            (RecordColumn::Item, &self.item),
            (RecordColumn::Material, &self.material),
            (RecordColumn::Description, &self.description),
            (RecordColumn::Quantity, &self.quantity),
            (RecordColumn::UnitCost, &self.unit_cost),
            (RecordColumn::Notes, &self.notes),
        ];
        for (column, value) in values {
            if let Some(value) = value {
                entry.set(column, value.as_str())?;
            }
        }
        Ok(())
    }
}

/// Args for the `cost-tracker add` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    #[clap(flatten)]
    entry: EntryArgs,
}

impl AddArgs {
    pub fn new(entry: EntryArgs) -> Self {
        Self { entry }
    }

    pub fn entry(&self) -> &EntryArgs {
        &self.entry
    }
}

/// Args for the `cost-tracker edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The row number, as shown by `cost-tracker list`.
    row: usize,

    #[clap(flatten)]
    entry: EntryArgs,
}

impl EditArgs {
    pub fn new(row: usize, entry: EntryArgs) -> Self {
        Self { row, entry }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn entry(&self) -> &EntryArgs {
        &self.entry
    }
}

/// Args for the `cost-tracker delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The row number, as shown by `cost-tracker list`.
    row: usize,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(row: usize, yes: bool) -> Self {
        Self { row, yes }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `cost-tracker clear` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ClearArgs {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `cost-tracker save` and `cost-tracker load` commands.
#[derive(Debug, Parser, Clone)]
pub struct PathArgs {
    /// The CSV file to write to or read from.
    path: PathBuf,
}

impl PathArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Converts a row number as shown to the user (starting at 1) to an index (starting at 0).
/// Row 0 does not exist and yields `None`.
pub fn row_index(row: usize) -> Option<usize> {
    row.checked_sub(1)
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("cost-tracker"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or COST_TRACKER_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("cost-tracker")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
