//! Money values and the derived cost computation.
//!
//! Costs are stored in records as display text (e.g. `$1,249.50`) so that whatever the user typed
//! survives a save/load round trip. This module provides the `Amount` type for the moments when
//! we need the number behind that text, and `compute_cost` which derives a record's cost from its
//! quantity and unit cost.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The text produced when a cost cannot be computed.
pub const ZERO_COST: &str = "$0.00";

/// Represents a dollar amount.
///
/// Parsing ignores every `$` and `,` in the input, so `$1,000.50`, `1000.50` and `1,000.50$` all
/// parse to the same value. Display always uses a leading dollar sign and exactly two decimal
/// places.
///
/// # Examples
///
/// ```
/// # use cost_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,249.5").unwrap();
/// assert_eq!(amount.to_string(), "$1249.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Parses `s` and falls back to zero when it is not a number. Used for totals, where a record
    /// with an unreadable cost still counts but adds nothing.
    pub fn parse_or_zero(s: &str) -> Decimal {
        match Amount::from_str(s) {
            Ok(amount) => amount.value(),
            Err(_) => Decimal::ZERO,
        }
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
        let value = Decimal::from_str(stripped.trim()).map_err(AmountError)?;
        Ok(Amount::new(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self
            .value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // Avoid printing "$-0.00" when a negative value rounds away.
        let rounded = if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        };
        write!(f, "${rounded:.2}")
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

/// Derives the cost text of a record from its quantity and unit cost.
///
/// The unit cost may carry `$` and `,`; the quantity must be a plain number. The result is the
/// product formatted as `$` followed by exactly two decimals. If either input is not a number, or
/// the product overflows, the result is `$0.00`.
pub fn compute_cost(quantity: &str, unit_cost: &str) -> String {
    match try_compute_cost(quantity, unit_cost) {
        Some(cost) => cost.to_string(),
        None => ZERO_COST.to_string(),
    }
}

fn try_compute_cost(quantity: &str, unit_cost: &str) -> Option<Amount> {
    let quantity = Decimal::from_str(quantity.trim()).ok()?;
    let unit_cost = Amount::from_str(unit_cost).ok()?;
    quantity.checked_mul(unit_cost.value()).map(Amount::new)
}
