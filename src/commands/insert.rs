//! Add command handler.

use crate::args::AddArgs;
use crate::commands::{open_app, persist_app, Out};
use crate::error::{ErrorType, IntoResult};
use crate::form::Prompter;
use crate::model::{Entry, Record};
use crate::{Config, Result};

/// Appends a new row to the working CSV file.
///
/// The entry starts from the defaults (quantity `1`, unit cost `$0.00`) and takes any field given
/// on the command line. With `--prompt` the entry form is shown, pre-filled with those values, and
/// the row is only added if the user confirms it. The cost is always computed.
///
/// # Returns
///
/// On success, returns an `Out` containing the added record, or only a message if the user
/// cancelled the form.
///
/// # Errors
///
/// - Returns an error if the working file cannot be read or written.
pub async fn add<P: Prompter>(
    config: Config,
    args: AddArgs,
    prompter: &mut P,
) -> Result<Out<Record>> {
    let mut app = open_app(&config).await?;
    let mut entry = Entry::default();
    args.entry()
        .apply(&mut entry)
        .pub_result(ErrorType::Input)?;

    let record = if args.entry().prompt() {
        match app
            .add_with_form(prompter, entry)
            .pub_result(ErrorType::Input)?
        {
            Some(record) => record.clone(),
            None => return Ok("Cancelled, nothing was added".into()),
        }
    } else {
        let record = entry.into_record();
        app.add(record.clone());
        record
    };

    persist_app(&config, &app).await?;
    Ok(Out::new(
        format!(
            "Added row {}: '{}' costing {}",
            app.store().count(),
            record.item,
            record.cost
        ),
        record,
    ))
}
