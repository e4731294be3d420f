//! Line-level encoding for the tab-delimited database files and the CSV
//! export.

use crate::models::{Programme, StudentRecord};
use crate::validate::{parse_id, parse_mark, parse_name};

pub(crate) const TAB_HEADER: &str = "ID\tName\tProgramme\tMark";
pub(crate) const CSV_HEADER: &str = "ID,Name,Programme,Mark,Grade";

/// Leading spaces and tabs are insignificant everywhere in the input format.
fn skip_indent(line: &str) -> &str {
    line.trim_start_matches([' ', '\t'])
}

/// Whether `line` opens the data section.
pub(crate) fn is_header(line: &str) -> bool {
    skip_indent(line).starts_with("ID")
}

/// Whether `line` is worth attempting to parse as a record.
pub(crate) fn looks_like_data(line: &str) -> bool {
    skip_indent(line)
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit())
}

/// Parse `id<TAB>name<TAB>programme<TAB>mark`. Anything after the fourth field
/// is ignored; a line missing a field or carrying an invalid value yields
/// `None`.
pub(crate) fn parse_record_line(line: &str) -> Option<StudentRecord> {
    let line = skip_indent(line.trim_end_matches(['\r', '\n']));
    let mut fields = line.split('\t');

    let id = parse_id(fields.next()?).ok()?;
    let name = parse_name(fields.next()?).ok()?;
    let programme = Programme::lookup(fields.next()?)?;
    let mark = parse_mark(fields.next()?).ok()?;

    Some(StudentRecord::new(id, name, programme, mark))
}

pub(crate) fn format_tab_line(record: &StudentRecord) -> String {
    format!(
        "{}\t{}\t{}\t{:.1}",
        record.id,
        record.name,
        record.programme.code(),
        record.mark()
    )
}

pub(crate) fn format_csv_row(record: &StudentRecord) -> String {
    format!(
        "{},{},{},{:.1},{}",
        record.id,
        csv_quote(&record.name),
        csv_quote(record.programme.code()),
        record.mark(),
        record.grade().letter()
    )
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    #[test]
    fn header_detection_ignores_indent() {
        assert!(is_header("ID\tName\tProgramme\tMark"));
        assert!(is_header(" \t IDENTIFIERS"));
        assert!(!is_header("Table: StudentRecords"));
        assert!(!is_header("id\tname"));
    }

    #[test]
    fn data_lines_start_with_a_digit() {
        assert!(looks_like_data("2301234\tJoshua\tCS\t70.5"));
        assert!(looks_like_data("   2301234"));
        assert!(!looks_like_data("# 2301234"));
        assert!(!looks_like_data(""));
    }

    #[test]
    fn parses_well_formed_lines() {
        let record = parse_record_line("2301234\tJoshua Chen\tCS\t70.5\r\n").unwrap();
        assert_eq!(record.id, 2301234);
        assert_eq!(record.name, "Joshua Chen");
        assert_eq!(record.programme, Programme::ComputerScience);
        assert_eq!(record.mark(), 70.5);
        assert_eq!(record.grade(), Grade::B);

        let expanded = parse_record_line("2304567\tJohn\tDigital Supply Chain\t85.9").unwrap();
        assert_eq!(expanded.programme, Programme::DigitalSupplyChain);
    }

    #[test]
    fn rejects_incomplete_or_invalid_lines() {
        assert!(parse_record_line("2301234\tJoshua\tCS").is_none());
        assert!(parse_record_line("2301234 Joshua CS 70.5").is_none());
        assert!(parse_record_line("2301234\t\tCS\t70.5").is_none());
        assert!(parse_record_line("2301234\tJoshua\tSE\t70.5").is_none());
        assert!(parse_record_line("2301234\tJoshua\tCS\tseventy").is_none());
        assert!(parse_record_line("230123\tJoshua\tCS\t70.5").is_none());
    }

    #[test]
    fn formats_tab_and_csv_lines() {
        let record = StudentRecord::new(2301234, "Joshua", Programme::ComputerScience, 70.0);
        assert_eq!(format_tab_line(&record), "2301234\tJoshua\tCS\t70.0");
        assert_eq!(format_csv_row(&record), "2301234,\"Joshua\",\"CS\",70.0,B");
        assert_eq!(csv_quote("a \"b\""), "\"a \"\"b\"\"\"");
    }
}
