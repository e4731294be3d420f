//! In-memory record store split across logical submodules: `records` holds the
//! CRUD, sort and summary operations, `files` the tab/CSV persistence and
//! `codec` the line-level parsing and formatting.

mod codec;
mod files;
mod records;

pub use records::Deletion;

use crate::models::StudentRecord;

/// Maximum number of records a store holds.
pub const CAPACITY: usize = 100;

/// Ordered, capacity-bounded collection of student records. Ids are unique and
/// every record passed validation when it entered the store; only the
/// operations on this type can mutate the contents.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    capacity: usize,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    /// Build a store with a custom bound. Mostly useful for exercising the
    /// full-store paths without inserting a hundred records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records in their current order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}
