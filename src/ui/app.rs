//! Command dispatch for the interactive shell. `App` owns the record store and
//! the session state (which file is "current"), and translates each parsed
//! command into prompts, store calls and status lines.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use super::command::Command;
use super::forms::{confirm, read_draft_fields, read_id, read_patch};
use super::helpers::{render_record_detail, render_records_table, render_summary, HELP_TEXT};
use super::terminal::{Console, StatusKind};
use crate::error::StoreError;
use crate::store::{Deletion, RecordStore};
use crate::validate::parse_id;

/// Session state shared across commands.
pub struct App {
    store: RecordStore,
    current_path: Option<String>,
    export_path: String,
}

impl App {
    pub fn new(store: RecordStore, export_path: impl Into<String>) -> Self {
        Self {
            store,
            current_path: None,
            export_path: export_path.into(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// File that SAVE writes to without asking, once one has been opened or
    /// saved.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// Run one command. Returns `true` when the session should end. Store
    /// failures are reported to the user and never end the session; only
    /// terminal I/O errors propagate.
    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        console: &mut Console<R, W>,
    ) -> Result<bool> {
        debug!(?command, "dispatching command");
        match command {
            Command::Help => console.lines(HELP_TEXT)?,
            Command::Open => self.handle_open(console)?,
            Command::ShowAll(sort) => {
                if self.store.is_empty() {
                    console.status(
                        StatusKind::Info,
                        "No records to display. Open or insert records first.",
                    )?;
                } else {
                    if let Some((field, order)) = sort {
                        self.store.sort(field, order);
                    }
                    console.lines(&render_records_table(self.store.records()))?;
                }
            }
            Command::Query => self.handle_query(console)?,
            Command::Update => self.handle_update(console)?,
            Command::Insert => self.handle_insert(console)?,
            Command::Delete => self.handle_delete(console)?,
            Command::Save => self.handle_save(console)?,
            Command::Summary => match self.store.summary() {
                Some(report) => console.lines(&render_summary(&report))?,
                None => console.status(StatusKind::Info, "No records available.")?,
            },
            Command::Export => self.handle_export(console)?,
            Command::Exit => {
                console.line("\nExiting program... Goodbye!")?;
                return Ok(true);
            }
            Command::Invalid(message) => console.status(StatusKind::Error, &message)?,
            Command::Unknown => console.status(StatusKind::Error, "Invalid command. Try again.")?,
        }
        Ok(false)
    }

    /// Load `path` into the store and make it the current file on success.
    pub fn open_path<R: BufRead, W: Write>(
        &mut self,
        path: &str,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match self.store.open(path) {
            Ok(count) => {
                self.current_path = Some(path.trim().to_string());
                console.status(
                    StatusKind::Success,
                    &format!("Database opened with {count} records."),
                )
            }
            Err(err) => console.status(StatusKind::Error, &format!("OPEN failed: {err}")),
        }
    }

    fn handle_open<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        match console.prompt("Enter database file path: ")? {
            Some(path) => self.open_path(&path, console),
            None => console.line("Open cancelled."),
        }
    }

    fn handle_query<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let Some(id) = read_id(console, "Enter student ID: ")? else {
            return Ok(());
        };
        match self.store.query(id) {
            Some(record) => {
                console.line("\nRecord found:")?;
                console.lines(&render_record_detail(record))
            }
            None => console.status(StatusKind::Info, &StoreError::NotFound(id).to_string()),
        }
    }

    fn handle_update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let Some(id) = read_id(console, "Enter student ID: ")? else {
            return Ok(());
        };
        let Some(record) = self.store.query(id) else {
            return console.status(StatusKind::Error, &StoreError::NotFound(id).to_string());
        };
        console.line("\nRecord found:")?;
        console.lines(&render_record_detail(record))?;

        let patch = read_patch(console)?;
        match self.store.update(id, &patch) {
            Ok(_) => console.status(StatusKind::Success, "\nRecord updated successfully!"),
            Err(err) => console.status(StatusKind::Error, &err.to_string()),
        }
    }

    /// The id is checked as soon as it is typed so the user is not asked for
    /// the other fields of a record that cannot be inserted.
    fn handle_insert<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_full() {
            let err = StoreError::Full(self.store.capacity());
            return console.status(StatusKind::Error, &err.to_string());
        }
        let Some(raw_id) = console.prompt("\nEnter new student ID (7 digits): ")? else {
            return console.line("Insert cancelled.");
        };
        let early = parse_id(&raw_id).and_then(|id| match self.store.query(id) {
            Some(_) => Err(StoreError::Duplicate(id)),
            None => Ok(id),
        });
        if let Err(err) = early {
            return console.status(StatusKind::Error, &err.to_string());
        }

        let draft = read_draft_fields(console, raw_id)?;
        match self.store.insert(&draft) {
            Ok(_) => console.status(StatusKind::Success, "\nRecord inserted successfully!"),
            Err(err) => console.status(StatusKind::Error, &err.to_string()),
        }
    }

    fn handle_delete<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let Some(id) = read_id(console, "Enter student ID to delete: ")? else {
            return console.line("Delete cancelled.");
        };

        let mut prompt_failure = None;
        let outcome = self.store.delete(id, |record| {
            let answer = console
                .line(&format!(
                    "Found: ID={}, Name={}, Programme={}, Mark={:.2}",
                    record.id,
                    record.name,
                    record.programme,
                    record.mark()
                ))
                .and_then(|_| confirm(console, "Confirm delete? (Y/N): "));
            answer.unwrap_or_else(|err| {
                prompt_failure = Some(err);
                false
            })
        });
        if let Some(err) = prompt_failure {
            return Err(err);
        }

        match outcome {
            Ok(Deletion::Removed(_)) => console.status(StatusKind::Success, "Record deleted."),
            Ok(Deletion::Cancelled) => console.status(StatusKind::Info, "Deletion cancelled."),
            Err(err) => console.status(StatusKind::Error, &err.to_string()),
        }
    }

    fn handle_save<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_empty() {
            return console.status(StatusKind::Info, "There is no record to save.");
        }

        let path = match &self.current_path {
            Some(path) => path.clone(),
            None => {
                console.line("No file currently opened.")?;
                match console.prompt("Enter a filename to save as: ")? {
                    Some(path) if !path.trim().is_empty() => path.trim().to_string(),
                    _ => return console.line("SAVE cancelled."),
                }
            }
        };

        match self.store.save(&path) {
            Ok(()) => {
                let message = format!("The database file \"{path}\" is successfully saved.");
                self.current_path = Some(path);
                console.status(StatusKind::Success, &message)
            }
            Err(err) => console.status(
                StatusKind::Error,
                &format!("Failed to save database file: {err}"),
            ),
        }
    }

    fn handle_export<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_empty() {
            return console.status(StatusKind::Info, "There is no record to export.");
        }

        let label = format!("Enter CSV file path (Enter = {}): ", self.export_path);
        let path = match console.prompt(&label)? {
            Some(path) if !path.trim().is_empty() => path.trim().to_string(),
            _ => self.export_path.clone(),
        };

        match self.store.export_csv(&path) {
            Ok(()) => console.status(
                StatusKind::Success,
                &format!("The database is successfully exported to \"{path}\"."),
            ),
            Err(err) => console.status(
                StatusKind::Error,
                &format!("Failed to export database: {err}"),
            ),
        }
    }
}
