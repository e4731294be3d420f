//! Core library surface for the student records manager.
//!
//! The in-memory [`RecordStore`] carries all of the record rules (validation,
//! unique 7-digit ids, grade bucketing, sorting, statistics and the file
//! formats). The `ui` module is a thin line-oriented shell around it, and
//! `config`/`logging` hold the process bootstrap the binary needs.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod validate;

pub use config::{Cli, Config};
pub use error::{Field, StoreError, StoreResult};
pub use logging::init_logging;

/// Domain types that other layers manipulate.
pub use models::{
    Grade, GradeBucket, Programme, RecordDraft, RecordPatch, SortField, SortOrder, StudentRecord,
    SummaryReport,
};

pub use store::{Deletion, RecordStore, CAPACITY};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
