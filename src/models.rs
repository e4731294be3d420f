//! Domain models shared by the record store and the interactive shell. The
//! types stay light-weight data holders; validation lives in
//! [`crate::validate`] and persistence in [`crate::store`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Letter grade derived from a mark. Declaration order doubles as the sort
/// order, so `A < B < ... < F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade in histogram order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Bucket a mark into its letter grade.
    pub fn from_mark(mark: f64) -> Self {
        if mark >= 80.0 {
            Grade::A
        } else if mark >= 70.0 {
            Grade::B
        } else if mark >= 60.0 {
            Grade::C
        } else if mark >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Programmes a student may be enrolled in. Records carry the typed value and
/// files store the short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Programme {
    ComputerScience,
    ComputerEngineering,
    ElectricalEngineering,
    ArtificialIntelligence,
    DigitalSupplyChain,
}

impl Programme {
    pub const ALL: [Programme; 5] = [
        Programme::ComputerScience,
        Programme::ComputerEngineering,
        Programme::ElectricalEngineering,
        Programme::ArtificialIntelligence,
        Programme::DigitalSupplyChain,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Programme::ComputerScience => "CS",
            Programme::ComputerEngineering => "CE",
            Programme::ElectricalEngineering => "EE",
            Programme::ArtificialIntelligence => "AI",
            Programme::DigitalSupplyChain => "DSC",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Programme::ComputerScience => "Computer Science",
            Programme::ComputerEngineering => "Computer Engineering",
            Programme::ElectricalEngineering => "Electrical Engineering",
            Programme::ArtificialIntelligence => "Artificial Intelligence",
            Programme::DigitalSupplyChain => "Digital Supply Chain",
        }
    }

    /// Slash separated list of accepted codes, used in prompts and errors.
    pub fn codes() -> String {
        Self::ALL
            .iter()
            .map(|programme| programme.code())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Exact, case-sensitive code match. Used for typed input.
    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|programme| programme.code() == raw)
    }

    /// Resolve a code or full name as found in record files. Matching ignores
    /// case and, for full names, any whitespace so `DigitalSupplyChain`
    /// resolves as well.
    pub fn lookup(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let squashed: String = trimmed.chars().filter(|ch| !ch.is_whitespace()).collect();
        Self::ALL.into_iter().find(|programme| {
            programme.code().eq_ignore_ascii_case(trimmed)
                || programme
                    .full_name()
                    .replace(' ', "")
                    .eq_ignore_ascii_case(&squashed)
        })
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One student's row. `mark` stays private so the derived grade can never
/// drift from it. Marks are kept at one decimal place, the precision record
/// files store, so a saved record reopens with the same mark and grade.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub id: u32,
    pub name: String,
    pub programme: Programme,
    mark: f64,
    grade: Grade,
}

impl StudentRecord {
    /// Build a record from already validated parts.
    pub fn new(id: u32, name: impl Into<String>, programme: Programme, mark: f64) -> Self {
        let mark = round_mark(mark);
        Self {
            id,
            name: name.into(),
            programme,
            mark,
            grade: Grade::from_mark(mark),
        }
    }

    pub fn mark(&self) -> f64 {
        self.mark
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Replace the mark and recompute the grade.
    pub fn set_mark(&mut self, mark: f64) {
        self.mark = round_mark(mark);
        self.grade = Grade::from_mark(self.mark);
    }
}

fn round_mark(mark: f64) -> f64 {
    (mark * 10.0).round() / 10.0
}

/// Raw, unvalidated field values for a new record exactly as a user typed
/// them.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub id: String,
    pub name: String,
    pub programme: String,
    pub mark: String,
}

/// Per-field replacement values for an update. `None` or a blank string keeps
/// the current value.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub programme: Option<String>,
    pub mark: Option<String>,
}

/// Column a `SHOW ALL` listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Mark,
    Grade,
    Name,
    Programme,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ID" => Ok(SortField::Id),
            "MARK" => Ok(SortField::Mark),
            "GRADE" => Ok(SortField::Grade),
            "NAME" => Ok(SortField::Name),
            "PROGRAMME" => Ok(SortField::Programme),
            other => Err(format!("Unknown field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Ascending),
            "DESC" => Ok(SortOrder::Descending),
            other => Err(format!("Invalid sort order: {other}. Use ASC or DESC.")),
        }
    }
}

/// Count and share of records for one letter grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBucket {
    pub grade: Grade,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregate statistics over a non-empty store.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub count: usize,
    pub average: f64,
    pub highest: StudentRecord,
    pub lowest: StudentRecord,
    pub distribution: [GradeBucket; 5],
}
