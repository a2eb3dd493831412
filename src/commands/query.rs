//! Read-only command handlers.

use crate::commands::{open_app, Out};
use crate::model::{Record, Summary};
use crate::{Config, Result};

/// Renders the table followed by the status line.
///
/// The structured output holds every record in table order.
pub async fn list(config: Config) -> Result<Out<Vec<Record>>> {
    let app = open_app(&config).await?;
    let message = format!(
        "{}\n\n{}",
        app.view().render(app.selected_index()),
        app.summary().status_line()
    );
    Ok(Out::new(message, app.records().to_vec()))
}

/// Reports the number of entries, the total cost and the average cost per entry.
pub async fn summary(config: Config) -> Result<Out<Summary>> {
    let app = open_app(&config).await?;
    let summary = app.summary();
    Ok(Out::new(summary.to_string(), summary))
}
