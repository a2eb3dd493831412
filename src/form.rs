//! The entry form used to add and edit rows.
//!
//! The form is a plain synchronous call. It owns a small state machine and keeps stepping it
//! until it reaches `Done`, then hands back `Some(record)` if the user confirmed or `None` if they
//! cancelled. Because `App` lends itself mutably for the duration of the call, nothing else can
//! touch the table while a form is open, and only one form can be open at a time.
//!
//! Terminal input goes through the `Prompter` trait so that tests can script the answers.

use crate::model::{Entry, Record, RecordColumn};
use crate::Result;
use anyhow::Context;
use dialoguer::{Confirm, Input};
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Asks the user for input.
pub trait Prompter {
    /// Asks for one line of text, pre-filled with `initial`. Returns what the user accepted.
    fn text(&mut self, label: &str, initial: &str) -> Result<String>;

    /// Asks a yes/no question. Returns `None` if the user dismissed it without answering.
    fn confirm(&mut self, question: &str) -> Result<Option<bool>>;
}

/// A `Prompter` that reads from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, label: &str, initial: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Unable to read a value for '{label}'"))
    }

    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact_opt()
            .context("Unable to read an answer from the terminal")
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FormKind {
    Add,
    Edit,
}

impl Display for FormKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKind::Add => f.write_str("Add New Entry"),
            FormKind::Edit => f.write_str("Edit Entry"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum FormState {
    /// Waiting for the value of `RecordColumn::EDITABLE[n]`.
    Field(usize),
    /// All fields are filled in; waiting for OK or Cancel.
    Review,
    Done { confirmed: bool },
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    kind: FormKind,
    entry: Entry,
    state: FormState,
}

impl EntryForm {
    /// Creates a form pre-filled with `entry`.
    pub fn new(kind: FormKind, entry: Entry) -> Self {
        Self {
            kind,
            entry,
            state: FormState::Field(0),
        }
    }

    /// Shows the form and blocks until the user confirms or cancels it.
    pub fn run<P: Prompter>(mut self, prompter: &mut P) -> Result<Option<Record>> {
        debug!("Opening the '{}' form", self.kind);
        loop {
            if let FormState::Done { confirmed } = self.state {
                debug!("Closing the '{}' form, confirmed: {confirmed}", self.kind);
                return Ok(confirmed.then(|| self.entry.into_record()));
            }
            self.step(prompter)?;
        }
    }

    fn step<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        self.state = match self.state {
            FormState::Field(ix) => {
                let column = RecordColumn::EDITABLE[ix];
                let initial = self.entry.get(column).unwrap_or_default().to_string();
                let value = prompter.text(&format!("{column}"), &initial)?;
                self.entry.set(column, value)?;
                if ix + 1 < RecordColumn::EDITABLE.len() {
                    FormState::Field(ix + 1)
                } else {
                    FormState::Review
                }
            }
            FormState::Review => {
                let question = format!("{}: save with a cost of {}?", self.kind, self.entry.cost());
                let confirmed = prompter.confirm(&question)?.unwrap_or(false);
                FormState::Done { confirmed }
            }
            done @ FormState::Done { .. } => done,
        };
        Ok(())
    }
}
