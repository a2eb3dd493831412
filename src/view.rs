//! The rendered grid.
//!
//! The view holds its own copy of the cell text. It is never patched: after every change to the
//! store the whole grid is rebuilt with `refresh`.

use crate::model::{Record, RecordColumn, COLUMN_COUNT};
use std::fmt::{Display, Formatter};

type GridRow = [String; COLUMN_COUNT];

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct GridView {
    rows: Vec<GridRow>,
}

impl GridView {
    pub fn new(records: &[Record]) -> Self {
        let mut view = Self::default();
        view.refresh(records);
        view
    }

    /// Throws away every rendered row and rebuilds the grid from `records`.
    pub fn refresh(&mut self, records: &[Record]) {
        self.rows = records
            .iter()
            .map(|r| r.fields().map(String::from))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&GridRow> {
        self.rows.get(index)
    }

    /// True when the grid shows exactly `records`, in order.
    #[cfg(test)]
    pub fn shows(&self, records: &[Record]) -> bool {
        self.rows.len() == records.len()
            && self
                .rows
                .iter()
                .zip(records)
                .all(|(row, record)| row.iter().map(String::as_str).eq(record.fields()))
    }

    /// Renders the grid as a markdown table. Rows are numbered from 1, and `selected` (a 0-based
    /// index) is marked with `>`.
    pub fn render(&self, selected: Option<usize>) -> String {
        Grid {
            rows: &self.rows,
            selected,
        }
        .to_string()
    }
}

struct Grid<'a> {
    rows: &'a [GridRow],
    selected: Option<usize>,
}

impl Display for Grid<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = RecordColumn::headers();
        let number_width = self.rows.len().to_string().len().max(1) + 1;
        let mut widths = headers.clone().map(|h| width(&h));
        for row in self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }

        write!(f, "| {:number_width$} |", "#")?;
        for (header, w) in headers.iter().zip(widths) {
            write!(f, " {} |", pad(header, w))?;
        }
        writeln!(f)?;
        write!(f, "|{}|", "-".repeat(number_width + 2))?;
        for w in widths {
            write!(f, "{}|", "-".repeat(w + 2))?;
        }
        for (ix, row) in self.rows.iter().enumerate() {
            writeln!(f)?;
            let marker = if self.selected == Some(ix) { ">" } else { "" };
            let number = format!("{marker}{}", ix + 1);
            write!(f, "| {number:>number_width$} |")?;
            for (cell, w) in row.iter().zip(widths) {
                write!(f, " {} |", pad(cell, w))?;
            }
        }
        Ok(())
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize) -> String {
    let mut padded = s.to_string();
    padded.extend(std::iter::repeat(' ').take(w.saturating_sub(width(s))));
    padded
}
