use crate::args::InitArgs;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Record;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its backups subdirectory, an initial `config.json` with default
/// settings, and the working CSV file.
///
/// # Arguments
/// - `home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/cost-tracker`
/// - `args` - `--empty` starts with no rows, otherwise the file is seeded with the example rows.
///
/// # Errors
/// - Returns an error if any file operations fail.
/// - Returns an error if `home` already holds a `config.json`.
pub async fn init(home: &Path, args: InitArgs) -> Result<Out<()>> {
    let seed = if args.empty() {
        Vec::new()
    } else {
        Record::examples()
    };
    let config = Config::create(home, &seed)
        .await
        .context("Unable to create the home directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the cost-tracker directory at {} with {} row{}",
        config.root().display(),
        seed.len(),
        plural(seed.len())
    )
    .into())
}
