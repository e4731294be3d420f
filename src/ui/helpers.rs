use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Row, Table, Widget};

use crate::models::{StudentRecord, SummaryReport};

/// Column widths of the record listing: ID, Name, Programme, Mark, Grade.
/// Name is a minimum and widens to the longest name being listed.
const TABLE_COLUMNS: [u16; 5] = [8, 20, 25, 6, 5];
const NAME_COLUMN: usize = 1;
const COLUMN_SPACING: u16 = 1;

pub(crate) const HELP_TEXT: &[&str] = &[
    "Available commands:",
    "  OPEN       - Open a database file",
    "  SHOW ALL   - Display all student records",
    "     (Optional Sort Syntax: SHOW ALL SORT BY <FIELD> <ORDER>)",
    "        <FIELD>: ID, NAME, PROGRAMME, MARK, GRADE",
    "        <ORDER>: ASC (Ascending) or DESC (Descending)",
    "  QUERY      - Query a student record by ID",
    "  UPDATE     - Update a student record by ID",
    "  INSERT     - Insert a new student record",
    "  DELETE     - Delete a student record by ID",
    "  SAVE       - Save the current database to file",
    "  SUMMARY    - Show summary of records",
    "  EXPORT     - Export records to CSV file",
    "  EXIT       - Exit the program",
];

/// Lay the records out as a ruled table. The ratatui `Table` is drawn into an
/// off-screen buffer sized to fit every row, then flattened to text so the
/// listing scrolls with the rest of the session.
pub(crate) fn render_records_table(records: &[StudentRecord]) -> Vec<String> {
    let header = Row::new(["ID", "Name", "Programme", "  Mark", "Grade"]);
    let rows = records.iter().map(|record| {
        Row::new([
            record.id.to_string(),
            record.name.clone(),
            record.programme.full_name().to_string(),
            format!("{:>6.1}", record.mark()),
            format!("{:>5}", record.grade().letter()),
        ])
    });

    let mut columns = TABLE_COLUMNS;
    let longest_name = records
        .iter()
        .map(|record| record.name.chars().count() as u16)
        .max()
        .unwrap_or(0);
    columns[NAME_COLUMN] = columns[NAME_COLUMN].max(longest_name);

    let table = Table::new(rows, columns.map(Constraint::Length))
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));

    let width = columns.iter().sum::<u16>() + COLUMN_SPACING * (columns.len() as u16 - 1);
    // One line each for the two rules and the header.
    let height = records.len() as u16 + 3;
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);
    buffer_lines(&buf)
}

/// Flatten a buffer into its rows of text with trailing blanks removed.
fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::with_capacity(area.width as usize);
            for x in area.left()..area.right() {
                line.push_str(buf[(x, y)].symbol());
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub(crate) fn render_record_detail(record: &StudentRecord) -> Vec<String> {
    vec![
        format!("ID       : {}", record.id),
        format!("Name     : {}", record.name),
        format!(
            "Programme: {} ({})",
            record.programme.code(),
            record.programme.full_name()
        ),
        format!("Mark     : {:.2}", record.mark()),
        format!("Grade    : {}", record.grade()),
    ]
}

pub(crate) fn render_summary(report: &SummaryReport) -> Vec<String> {
    let rule = "-".repeat(39);
    let mut lines = vec![
        rule.clone(),
        "Summary Statistics".to_string(),
        rule.clone(),
        format!("Total students: {}", report.count),
        format!("Average mark : {:.2}", report.average),
        format!(
            "Highest mark : {:.2} ({})",
            report.highest.mark(),
            report.highest.name
        ),
        format!(
            "Lowest mark  : {:.2} ({})",
            report.lowest.mark(),
            report.lowest.name
        ),
        rule,
        String::new(),
        "Grade Distribution:".to_string(),
    ];
    lines.extend(report.distribution.iter().map(|bucket| {
        format!("{}: {} ({:.1}%)", bucket.grade, bucket.count, bucket.percentage)
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Programme, RecordDraft};
    use crate::store::RecordStore;

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        for (id, name, programme, mark) in [
            ("2301234", "Joshua", "CS", "70.5"),
            ("2201234", "Isaac", "CE", "63.4"),
            ("2304567", "John", "DSC", "85.9"),
        ] {
            store
                .insert(&RecordDraft {
                    id: id.into(),
                    name: name.into(),
                    programme: programme.into(),
                    mark: mark.into(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn table_has_rules_header_and_one_line_per_record() {
        let store = store();
        let lines = render_records_table(store.records());
        assert_eq!(lines.len(), 6);
        assert!(lines[0].chars().all(|ch| ch == '─'));
        assert!(lines[1].starts_with("ID"));
        assert!(lines[1].contains("Programme"));
        assert!(lines[2].starts_with("2301234"));
        assert!(lines[2].contains("Joshua"));
        assert!(lines[2].contains("Computer Science"));
        assert!(lines[2].ends_with("70.5     B"));
        assert!(lines[4].contains("Digital Supply Chain"));
    }

    #[test]
    fn long_names_widen_the_name_column() {
        let name = "Maximiliana Alexandrina Worthington";
        let records = [
            StudentRecord::new(1234567, name, Programme::ComputerScience, 50.0),
            StudentRecord::new(2301234, "Joshua", Programme::ComputerScience, 70.5),
        ];
        let lines = render_records_table(&records);
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains(name));
        assert!(lines[2].ends_with("50.0     D"));
        let programme_column = lines[2].find("Computer Science").unwrap();
        assert_eq!(lines[3].find("Computer Science"), Some(programme_column));
        assert_eq!(lines[1].find("Programme"), Some(programme_column));
    }

    #[test]
    fn empty_table_still_renders_header() {
        let lines = render_records_table(&[]);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ID"));
    }

    #[test]
    fn summary_lists_statistics_and_distribution() {
        let report = store().summary().unwrap();
        let lines = render_summary(&report);
        assert!(lines.contains(&"Total students: 3".to_string()));
        assert!(lines.contains(&"Average mark : 73.27".to_string()));
        assert!(lines.contains(&"Highest mark : 85.90 (John)".to_string()));
        assert!(lines.contains(&"Lowest mark  : 63.40 (Isaac)".to_string()));
        assert!(lines.contains(&"A: 1 (33.3%)".to_string()));
        assert!(lines.contains(&"F: 0 (0.0%)".to_string()));
    }
}
