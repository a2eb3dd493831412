use crate::model::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Aggregate figures for the whole table.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    entries: usize,
    total_cost: Amount,
    average_cost: Amount,
}

impl Summary {
    /// The average is zero for an empty table.
    pub fn new(entries: usize, total_cost: Decimal) -> Self {
        let average_cost = if entries == 0 {
            Decimal::ZERO
        } else {
            total_cost
                .checked_div(Decimal::from(entries))
                .unwrap_or(Decimal::ZERO)
        };
        Self {
            entries,
            total_cost: total_cost.into(),
            average_cost: average_cost.into(),
        }
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn total_cost(&self) -> Amount {
        self.total_cost
    }

    pub fn average_cost(&self) -> Amount {
        self.average_cost
    }

    /// The one-line summary shown under the table.
    pub fn status_line(&self) -> String {
        format!(
            "Total Entries: {}     |     Total Cost: {}",
            self.entries, self.total_cost
        )
    }
}

/// The full summary report.
impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Summary Report")?;
        writeln!(f)?;
        writeln!(f, "Total Entries: {}", self.entries)?;
        writeln!(f, "Total Cost: {}", self.total_cost)?;
        write!(f, "Average Cost per Entry: {}", self.average_cost)
    }
}
