//! Types that represent the core data model, such as `Record` and `Amount`.
mod amount;
mod record;
mod summary;

pub use amount::{compute_cost, Amount, AmountError, ZERO_COST};
pub use record::{Entry, Record, RecordColumn, COLUMN_COUNT};
pub use summary::Summary;
