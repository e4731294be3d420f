use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::codec::{
    format_csv_row, format_tab_line, is_header, looks_like_data, parse_record_line, CSV_HEADER,
    TAB_HEADER,
};
use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::models::StudentRecord;

impl RecordStore {
    /// Replace the contents with the records found in a tab-delimited file and
    /// return how many were loaded.
    ///
    /// Everything before the first line starting with `ID` is ignored. After
    /// it, lines that do not start with a digit, do not carry four valid
    /// fields, or repeat an id already loaded are skipped silently. Loading
    /// stops at end of file or once the store is full. The file is consumed
    /// completely before the store is touched, so a failed read leaves the
    /// previous contents in place.
    pub fn open(&mut self, raw_path: &str) -> StoreResult<usize> {
        let path = clean_path(raw_path)?;
        let file = File::open(&path).map_err(|err| StoreError::io(&path, err))?;
        let mut reader = BufReader::new(file);

        let mut loaded: Vec<StudentRecord> = Vec::with_capacity(self.capacity);
        let mut in_data = false;
        let mut line_no = 0usize;
        let mut buf = Vec::new();

        while loaded.len() < self.capacity {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|err| StoreError::io(&path, err))?;
            if read == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);

            if !in_data {
                in_data = is_header(&line);
                continue;
            }
            if !looks_like_data(&line) {
                continue;
            }
            match parse_record_line(&line) {
                Some(record) if loaded.iter().any(|seen| seen.id == record.id) => {
                    debug!(line = line_no, id = record.id, "skipping duplicate id");
                }
                Some(record) => loaded.push(record),
                None => debug!(line = line_no, "skipping malformed line"),
            }
        }

        if !in_data {
            warn!(path = %path.display(), "no ID header found; nothing loaded");
        }
        self.records = loaded;
        info!(path = %path.display(), count = self.records.len(), "database opened");
        Ok(self.records.len())
    }

    /// Overwrite `raw_path` with the tab-delimited header and one line per
    /// record, marks at one decimal place.
    pub fn save(&self, raw_path: &str) -> StoreResult<()> {
        let path = clean_path(raw_path)?;
        self.write_lines(&path, TAB_HEADER, format_tab_line)?;
        info!(path = %path.display(), count = self.records.len(), "database saved");
        Ok(())
    }

    /// Overwrite `raw_path` with a CSV rendition including the grade column.
    pub fn export_csv(&self, raw_path: &str) -> StoreResult<()> {
        let path = clean_path(raw_path)?;
        self.write_lines(&path, CSV_HEADER, format_csv_row)?;
        info!(path = %path.display(), count = self.records.len(), "records exported");
        Ok(())
    }

    fn write_lines<F>(&self, path: &Path, header: &str, format: F) -> StoreResult<()>
    where
        F: Fn(&StudentRecord) -> String,
    {
        let file = File::create(path).map_err(|err| StoreError::io(path, err))?;
        let mut writer = BufWriter::new(file);
        let mut write_all = || -> std::io::Result<()> {
            writeln!(writer, "{header}")?;
            for record in &self.records {
                writeln!(writer, "{}", format(record))?;
            }
            writer.flush()
        };
        write_all().map_err(|err| StoreError::io(path, err))
    }
}

/// Trim the path and strip one layer of matching surrounding quotes, as left
/// behind by drag-and-drop into a terminal.
pub(crate) fn clean_path(raw: &str) -> StoreResult<PathBuf> {
    let trimmed = raw.trim();
    let unquoted = match trimmed.as_bytes() {
        [first @ (b'"' | b'\''), .., last] if first == last => &trimmed[1..trimmed.len() - 1],
        _ => trimmed,
    };
    if unquoted.is_empty() {
        Err(StoreError::EmptyPath)
    } else {
        Ok(PathBuf::from(unquoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_path_strips_one_layer_of_quotes() {
        assert_eq!(clean_path("\"a b.txt\"").unwrap(), PathBuf::from("a b.txt"));
        assert_eq!(clean_path(" 'db.txt' ").unwrap(), PathBuf::from("db.txt"));
        assert_eq!(clean_path("\"'x'\"").unwrap(), PathBuf::from("'x'"));
        assert_eq!(clean_path("\"half").unwrap(), PathBuf::from("\"half"));
        assert_eq!(clean_path("\"").unwrap(), PathBuf::from("\""));
    }

    #[test]
    fn clean_path_rejects_blank() {
        assert!(matches!(clean_path("   "), Err(StoreError::EmptyPath)));
        assert!(matches!(clean_path("\"\""), Err(StoreError::EmptyPath)));
    }
}
