//! Edit command handler.

use crate::args::EditArgs;
use crate::commands::{open_app, persist_app, select_row, Out};
use crate::error::{ErrorType, IntoResult};
use crate::form::Prompter;
use crate::model::{Entry, Record};
use crate::{Config, Result};
use anyhow::Context;

/// Replaces the row numbered `args.row()` (starting at 1).
///
/// The entry is seeded from the existing row and then takes any field given on the command line.
/// With `--prompt` the entry form is shown and nothing changes unless the user confirms it. The
/// cost is recomputed from the new quantity and unit cost.
///
/// # Errors
///
/// - Returns a `Selection` error if the row does not exist.
/// - Returns an error if the working file cannot be read or written.
pub async fn edit<P: Prompter>(
    config: Config,
    args: EditArgs,
    prompter: &mut P,
) -> Result<Out<Record>> {
    let mut app = open_app(&config).await?;
    select_row(&mut app, args.row())?;

    let record = if args.entry().prompt() {
        match app
            .edit_with_form(prompter, |entry| args.entry().apply(entry))
            .pub_result(ErrorType::Input)?
        {
            Some(record) => record,
            None => return Ok("Cancelled, nothing was changed".into()),
        }
    } else {
        let selected = app
            .selected_record()
            .context("Please select an entry to edit!")
            .pub_result(ErrorType::Selection)?;
        let mut entry = Entry::from(selected);
        args.entry()
            .apply(&mut entry)
            .pub_result(ErrorType::Input)?;
        let record = entry.into_record();
        app.update_selected(record.clone())
            .pub_result(ErrorType::Selection)?;
        record
    };

    persist_app(&config, &app).await?;
    Ok(Out::new(
        format!("Updated row {}: '{}' costing {}", args.row(), record.item, record.cost),
        record,
    ))
}
