//! Application state.
//!
//! `App` owns the row store, the grid view and the current selection. Command handlers get it
//! passed in; there is no global state. Every mutation goes through `App` so that the view can be
//! rebuilt right after it, which keeps the two in lock-step.

use crate::codec;
use crate::form::{EntryForm, FormKind, Prompter};
use crate::model::{Entry, Record, Summary};
use crate::store::RowStore;
use crate::view::GridView;
use crate::Result;
use anyhow::{bail, Context};
use std::path::Path;
use tracing::debug;

#[derive(Default, Debug, Clone)]
pub struct App {
    store: RowStore,
    view: GridView,
    /// 0-based index of the selected row. Cleared by every structural change.
    selection: Option<usize>,
}

impl App {
    pub fn new(records: Vec<Record>) -> Self {
        let store = RowStore::from_records(records);
        let view = GridView::new(store.all_records());
        Self {
            store,
            view,
            selection: None,
        }
    }

    /// Loads the table from the CSV file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let records = codec::load(path)
            .await
            .with_context(|| format!("Unable to open the cost table at {}", path.display()))?;
        debug!("Opened {} rows from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Writes the table to the CSV file at `path`.
    pub async fn persist(&self, path: &Path) -> Result<()> {
        codec::save(path, self.records()).await
    }

    pub fn records(&self) -> &[Record] {
        self.store.all_records()
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn summary(&self) -> Summary {
        self.store.summary()
    }

    /// Selects the row at `index`. An index outside the table leaves nothing selected and returns
    /// `false`.
    pub fn select(&mut self, index: usize) -> bool {
        self.selection = (index < self.store.count()).then_some(index);
        self.selection.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selection.and_then(|ix| self.store.get(ix))
    }

    pub fn add(&mut self, record: Record) {
        self.store.add(record);
        self.refresh();
    }

    /// Replaces the selected record.
    ///
    /// # Errors
    /// - Nothing is selected.
    pub fn update_selected(&mut self, record: Record) -> Result<Record> {
        let Some(index) = self.selection else {
            bail!("Please select an entry to edit!")
        };
        let old = self
            .store
            .update(index, record)
            .context("The selected entry no longer exists")?;
        self.refresh();
        Ok(old)
    }

    /// Removes the selected record.
    ///
    /// # Errors
    /// - Nothing is selected.
    pub fn delete_selected(&mut self) -> Result<Record> {
        let Some(index) = self.selection else {
            bail!("Please select an entry to delete!")
        };
        let deleted = self
            .store
            .delete_at(index)
            .context("The selected entry no longer exists")?;
        self.refresh();
        Ok(deleted)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.refresh();
    }

    /// Replaces the whole table with `records`, e.g. after loading a file.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.store.replace_all(records);
        self.refresh();
    }

    /// Runs the entry form for a new row and appends the result. Returns `None` if the user
    /// cancelled.
    pub fn add_with_form<P: Prompter>(
        &mut self,
        prompter: &mut P,
        entry: Entry,
    ) -> Result<Option<&Record>> {
        let Some(record) = EntryForm::new(FormKind::Add, entry).run(prompter)? else {
            return Ok(None);
        };
        self.add(record);
        Ok(self.store.all_records().last())
    }

    /// Runs the entry form seeded from the selected row and replaces that row with the result.
    /// Returns `None` if the user cancelled.
    ///
    /// # Errors
    /// - Nothing is selected.
    pub fn edit_with_form<P: Prompter>(
        &mut self,
        prompter: &mut P,
        apply: impl FnOnce(&mut Entry) -> Result<()>,
    ) -> Result<Option<Record>> {
        let Some(selected) = self.selected_record() else {
            bail!("Please select an entry to edit!")
        };
        let mut entry = Entry::from(selected);
        apply(&mut entry)?;
        let Some(record) = EntryForm::new(FormKind::Edit, entry).run(prompter)? else {
            return Ok(None);
        };
        self.update_selected(record.clone())?;
        Ok(Some(record))
    }

    fn refresh(&mut self) {
        self.selection = None;
        self.view.refresh(self.store.all_records());
    }
}
