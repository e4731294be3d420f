use std::cmp::Ordering;

use tracing::{debug, info};

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Grade, GradeBucket, RecordDraft, RecordPatch, SortField, SortOrder, StudentRecord,
    SummaryReport,
};
use crate::validate::{parse_id, parse_mark, parse_name, parse_programme};

/// Outcome of a delete request that located its record.
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion {
    /// The record was removed; the copy is handed back for reporting.
    Removed(StudentRecord),
    /// The caller declined the confirmation and nothing changed.
    Cancelled,
}

impl RecordStore {
    /// Find the first record carrying `id`. A miss is a normal negative result.
    pub fn query(&self, id: u32) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Validate a draft and append it. Checks run in a fixed order (capacity,
    /// id syntax, id uniqueness, name, programme, mark) and stop at the first
    /// failure, leaving the store untouched.
    pub fn insert(&mut self, draft: &RecordDraft) -> StoreResult<&StudentRecord> {
        if self.is_full() {
            return Err(StoreError::Full(self.capacity));
        }
        let id = parse_id(&draft.id)?;
        if self.query(id).is_some() {
            return Err(StoreError::Duplicate(id));
        }
        let name = parse_name(&draft.name)?;
        let programme = parse_programme(&draft.programme)?;
        let mark = parse_mark(&draft.mark)?;

        self.records.push(StudentRecord::new(id, name, programme, mark));
        info!(id, count = self.records.len(), "record inserted");
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Apply the non-blank fields of `patch` in the order name, programme,
    /// mark. The first invalid field aborts the update; fields applied before
    /// it stay changed. The grade always follows the final mark.
    pub fn update(&mut self, id: u32, patch: &RecordPatch) -> StoreResult<&StudentRecord> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let outcome = apply_patch(&mut self.records[index], patch);

        match outcome {
            Ok(()) => {
                info!(id, "record updated");
                Ok(&self.records[index])
            }
            Err(err) => {
                debug!(id, error = %err, "update stopped at invalid field");
                Err(err)
            }
        }
    }

    /// Remove the record with `id` once `confirm` approves it. The callback
    /// sees the located record so the caller can show it before asking.
    pub fn delete<F>(&mut self, id: u32, confirm: F) -> StoreResult<Deletion>
    where
        F: FnOnce(&StudentRecord) -> bool,
    {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        if !confirm(&self.records[index]) {
            debug!(id, "deletion cancelled");
            return Ok(Deletion::Cancelled);
        }
        let removed = self.records.remove(index);
        info!(id, count = self.records.len(), "record deleted");
        Ok(Deletion::Removed(removed))
    }

    /// Reorder in place. The sort is stable and descending order reverses the
    /// comparison rather than the result, so equal keys keep their relative
    /// order either way. Grade ties fall back to mark in the same direction.
    pub fn sort(&mut self, field: SortField, order: SortOrder) {
        self.records.sort_by(|a, b| order.apply(compare_by(field, a, b)));
        debug!(?field, ?order, "records sorted");
    }

    /// Aggregate statistics, or `None` for an empty store.
    pub fn summary(&self) -> Option<SummaryReport> {
        let first = self.records.first()?;
        let count = self.records.len();

        let mut total = 0.0;
        let mut highest = first;
        let mut lowest = first;
        let mut counts = [0usize; 5];
        for record in &self.records {
            total += record.mark();
            if record.mark() > highest.mark() {
                highest = record;
            }
            if record.mark() < lowest.mark() {
                lowest = record;
            }
            counts[grade_slot(record.grade())] += 1;
        }

        let distribution = Grade::ALL.map(|grade| {
            let count_for_grade = counts[grade_slot(grade)];
            GradeBucket {
                grade,
                count: count_for_grade,
                percentage: count_for_grade as f64 * 100.0 / count as f64,
            }
        });

        Some(SummaryReport {
            count,
            average: total / count as f64,
            highest: highest.clone(),
            lowest: lowest.clone(),
            distribution,
        })
    }
}

fn apply_patch(record: &mut StudentRecord, patch: &RecordPatch) -> StoreResult<()> {
    if let Some(raw) = non_blank(&patch.name) {
        record.name = parse_name(raw)?;
    }
    if let Some(raw) = non_blank(&patch.programme) {
        record.programme = parse_programme(raw)?;
    }
    if let Some(raw) = non_blank(&patch.mark) {
        record.set_mark(parse_mark(raw)?);
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.trim().is_empty())
}

fn compare_by(field: SortField, a: &StudentRecord, b: &StudentRecord) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Mark => a.mark().total_cmp(&b.mark()),
        SortField::Grade => a
            .grade()
            .cmp(&b.grade())
            .then_with(|| a.mark().total_cmp(&b.mark())),
        SortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
        SortField::Programme => a.programme.code().cmp(b.programme.code()),
    }
}

fn grade_slot(grade: Grade) -> usize {
    match grade {
        Grade::A => 0,
        Grade::B => 1,
        Grade::C => 2,
        Grade::D => 3,
        Grade::F => 4,
    }
}
