use crate::model::amount::compute_cost;
use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One row of the cost table.
///
/// All fields are text. Quantity, unit cost and cost keep whatever formatting the user typed
/// (currency symbols, thousands separators) so that they survive a save and load unchanged.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    pub category: String,
    pub item: String,
    pub material: String,
    pub description: String,
    pub quantity: String,
    pub unit_cost: String,
    /// Derived from `quantity` and `unit_cost`, see `compute_cost`.
    pub cost: String,
    pub notes: String,
}

impl Record {
    /// Builds a record from exactly eight values in column order. Returns `None` for any other
    /// number of values.
    pub fn from_fields<S, I>(values: I) -> Option<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let values: Vec<String> = values.into_iter().map(|s| s.into()).collect();
        let fields: [String; COLUMN_COUNT] = values.try_into().ok()?;
        let [category, item, material, description, quantity, unit_cost, cost, notes] = fields;
        Some(Self {
            category,
            item,
            material,
            description,
            quantity,
            unit_cost,
            cost,
            notes,
        })
    }

    /// The field values in column order.
    pub fn fields(&self) -> [&str; COLUMN_COUNT] {
        RecordColumn::ALL.map(|col| self.get(col))
    }

    pub fn get(&self, column: RecordColumn) -> &str {
        match column {
            RecordColumn::Category => &self.category,
            RecordColumn::Item => &self.item,
            RecordColumn::Material => &self.material,
            RecordColumn::Description => &self.description,
            RecordColumn::Quantity => &self.quantity,
            RecordColumn::UnitCost => &self.unit_cost,
            RecordColumn::Cost => &self.cost,
            RecordColumn::Notes => &self.notes,
        }
    }

    /// Recomputes `cost` from `quantity` and `unit_cost`.
    pub fn recompute_cost(&mut self) {
        self.cost = compute_cost(&self.quantity, &self.unit_cost);
    }

    /// The rows a freshly initialized table starts with.
    pub fn examples() -> Vec<Record> {
        vec![
            example(
                "Electronics",
                "Laptop",
                "Aluminum",
                "15-inch display",
                "5",
                "$899.99",
                "$4499.95",
                "Bulk order discount",
            ),
            example(
                "Office",
                "Desk Chair",
                "Mesh/Steel",
                "Ergonomic office chair",
                "10",
                "$249.50",
                "$2495.00",
                "Free shipping",
            ),
            example(
                "Supplies",
                "Paper Reams",
                "Paper",
                "500 sheets per ream",
                "50",
                "$4.99",
                "$249.50",
                "Recycled paper",
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn example(
    category: &str,
    item: &str,
    material: &str,
    description: &str,
    quantity: &str,
    unit_cost: &str,
    cost: &str,
    notes: &str,
) -> Record {
    Record {
        category: category.into(),
        item: item.into(),
        material: material.into(),
        description: description.into(),
        quantity: quantity.into(),
        unit_cost: unit_cost.into(),
        cost: cost.into(),
        notes: notes.into(),
    }
}

/// The values a user can type into the entry form: every column except `Cost`.
///
/// Turning an `Entry` into a `Record` is the only way the entry flow produces records, and it
/// always computes the cost, so a cost typed by the user can never be stored.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry {
    pub category: String,
    pub item: String,
    pub material: String,
    pub description: String,
    pub quantity: String,
    pub unit_cost: String,
    pub notes: String,
}

impl Default for Entry {
    /// A new entry starts with a quantity of one at no cost.
    fn default() -> Self {
        Self {
            category: String::new(),
            item: String::new(),
            material: String::new(),
            description: String::new(),
            quantity: "1".to_string(),
            unit_cost: "$0.00".to_string(),
            notes: String::new(),
        }
    }
}

impl Entry {
    pub fn get(&self, column: RecordColumn) -> Option<&str> {
        Some(match column {
            RecordColumn::Category => &self.category,
            RecordColumn::Item => &self.item,
            RecordColumn::Material => &self.material,
            RecordColumn::Description => &self.description,
            RecordColumn::Quantity => &self.quantity,
            RecordColumn::UnitCost => &self.unit_cost,
            RecordColumn::Notes => &self.notes,
            RecordColumn::Cost => return None,
        })
    }

    /// Sets the value of an editable column.
    ///
    /// # Errors
    /// - `Cost` is derived and cannot be set.
    pub fn set(&mut self, column: RecordColumn, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match column {
            RecordColumn::Category => self.category = value,
            RecordColumn::Item => self.item = value,
            RecordColumn::Material => self.material = value,
            RecordColumn::Description => self.description = value,
            RecordColumn::Quantity => self.quantity = value,
            RecordColumn::UnitCost => self.unit_cost = value,
            RecordColumn::Notes => self.notes = value,
            RecordColumn::Cost => bail!("The {column} column is computed and cannot be set"),
        }
        Ok(())
    }

    /// The cost this entry would be stored with.
    pub fn cost(&self) -> String {
        compute_cost(&self.quantity, &self.unit_cost)
    }

    pub fn into_record(self) -> Record {
        let cost = self.cost();
        Record {
            category: self.category,
            item: self.item,
            material: self.material,
            description: self.description,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            cost,
            notes: self.notes,
        }
    }
}

impl From<&Record> for Entry {
    fn from(record: &Record) -> Self {
        Self {
            category: record.category.clone(),
            item: record.item.clone(),
            material: record.material.clone(),
            description: record.description.clone(),
            quantity: record.quantity.clone(),
            unit_cost: record.unit_cost.clone(),
            notes: record.notes.clone(),
        }
    }
}

/// The columns of the cost table, in the order they appear on screen and in CSV files.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum RecordColumn {
    Category,
    Item,
    Material,
    Description,
    Quantity,
    #[serde(rename = "Unit Cost")]
    UnitCost,
    Cost,
    Notes,
}

serde_plain::derive_display_from_serialize!(RecordColumn);
serde_plain::derive_fromstr_from_deserialize!(RecordColumn);

pub const COLUMN_COUNT: usize = 8;

impl RecordColumn {
    pub const ALL: [RecordColumn; COLUMN_COUNT] = [
        RecordColumn::Category,
        RecordColumn::Item,
        RecordColumn::Material,
        RecordColumn::Description,
        RecordColumn::Quantity,
        RecordColumn::UnitCost,
        RecordColumn::Cost,
        RecordColumn::Notes,
    ];

    /// The columns a user fills in. `Cost` is left out because it is computed.
    pub const EDITABLE: [RecordColumn; COLUMN_COUNT - 1] = [
        RecordColumn::Category,
        RecordColumn::Item,
        RecordColumn::Material,
        RecordColumn::Description,
        RecordColumn::Quantity,
        RecordColumn::UnitCost,
        RecordColumn::Notes,
    ];

    /// The column headers, e.g. for the first line of a CSV file.
    pub fn headers() -> [String; COLUMN_COUNT] {
        RecordColumn::ALL.map(|col| col.to_string())
    }
}
