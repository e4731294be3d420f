use crate::models::{SortField, SortOrder};

/// A line typed at the main prompt, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Open,
    /// `SHOW ALL`, optionally followed by `SORT BY <FIELD> [ASC|DESC]`.
    ShowAll(Option<(SortField, SortOrder)>),
    Query,
    Update,
    Insert,
    Delete,
    Save,
    Summary,
    Export,
    Exit,
    /// A recognized command with malformed arguments.
    Invalid(String),
    Unknown,
}

impl Command {
    /// Match case-insensitively, tolerating any run of whitespace between
    /// words.
    pub fn parse(line: &str) -> Self {
        let upper = line.trim().to_ascii_uppercase();
        let words: Vec<&str> = upper.split_whitespace().collect();

        match words.as_slice() {
            ["HELP"] => Command::Help,
            ["OPEN"] => Command::Open,
            ["SHOW", "ALL"] => Command::ShowAll(None),
            ["SHOW", "ALL", "SORT", "BY", rest @ ..] => parse_sort(rest),
            ["SHOW", "ALL", ..] => Command::Invalid(
                "Invalid syntax. Use SHOW ALL SORT BY <FIELD> <ORDER>.".to_string(),
            ),
            ["QUERY"] => Command::Query,
            ["UPDATE"] => Command::Update,
            ["INSERT"] => Command::Insert,
            ["DELETE"] => Command::Delete,
            ["SAVE"] => Command::Save,
            ["SUMMARY"] => Command::Summary,
            ["EXPORT"] => Command::Export,
            ["EXIT"] => Command::Exit,
            _ => Command::Unknown,
        }
    }
}

fn parse_sort(args: &[&str]) -> Command {
    let sort = match args {
        [field] => field.parse::<SortField>().map(|field| (field, SortOrder::default())),
        [field, order] => field
            .parse::<SortField>()
            .and_then(|field| Ok((field, order.parse::<SortOrder>()?))),
        [] => Err("Missing sort field. Use ID, NAME, PROGRAMME, MARK or GRADE.".to_string()),
        _ => Err("Too many sort arguments. Use SORT BY <FIELD> <ORDER>.".to_string()),
    };
    match sort {
        Ok(sort) => Command::ShowAll(Some(sort)),
        Err(message) => Command::Invalid(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_commands_case_insensitively() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("  Query "), Command::Query);
        assert_eq!(Command::parse("show   all"), Command::ShowAll(None));
        assert_eq!(Command::parse("EXIT"), Command::Exit);
        assert_eq!(Command::parse("summary"), Command::Summary);
    }

    #[test]
    fn parses_sort_clause() {
        assert_eq!(
            Command::parse("show all sort by mark desc"),
            Command::ShowAll(Some((SortField::Mark, SortOrder::Descending)))
        );
        assert_eq!(
            Command::parse("SHOW ALL SORT BY NAME"),
            Command::ShowAll(Some((SortField::Name, SortOrder::Ascending)))
        );
    }

    #[test]
    fn reports_bad_sort_arguments() {
        assert_eq!(
            Command::parse("SHOW ALL SORT BY AGE ASC"),
            Command::Invalid("Unknown field: AGE".to_string())
        );
        assert_eq!(
            Command::parse("SHOW ALL SORT BY ID UP"),
            Command::Invalid("Invalid sort order: UP. Use ASC or DESC.".to_string())
        );
        assert!(matches!(Command::parse("SHOW ALL SORT BY"), Command::Invalid(_)));
        assert!(matches!(Command::parse("SHOW ALL PLEASE"), Command::Invalid(_)));
    }

    #[test]
    fn unknown_text_is_unknown() {
        assert_eq!(Command::parse(""), Command::Unknown);
        assert_eq!(Command::parse("QUERY 1234567"), Command::Unknown);
        assert_eq!(Command::parse("list"), Command::Unknown);
    }
}
