// ********* Input data structures ***********

use std::fmt::Display;

use snafu::prelude::*;

use crate::rational::Ratio;

/// A ranked entity: one row of the survey table.
///
/// The number is kept exactly as written in the table (leading zeros, or
/// composite numbers such as `22/24`).
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Subject {
    pub number: String,
    pub name: String,
    pub party: String,
}

/// The content of one cell in the poll region of the table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RankCell {
    /// A numeric rank. Lower is better.
    /// The tie and note markers are carried for information only: two cells
    /// are tied when their ranks are equal, whatever the markers say.
    Ranked { rank: i64, tie: bool, note: bool },
    /// The subject does not appear in this poll.
    Unranked,
}

impl RankCell {
    pub fn rank(&self) -> Option<i64> {
        match self {
            RankCell::Ranked { rank, .. } => Some(*rank),
            RankCell::Unranked => None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, RankCell::Ranked { .. })
    }
}

/// One input poll: a column of the table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Poll {
    pub name: String,
    /// One entry per subject, in the order of `PollTable::subjects`.
    pub ranks: Vec<RankCell>,
    /// The value found in the footer, if it was a number.
    pub declared_total: Option<i64>,
}

/// The aggregate column, when the input table already had one.
///
/// It is an output of this program and never contributes to the scores.
/// The cells are kept verbatim so that they can be compared with the
/// recomputed ranks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AggregateColumn {
    pub name: String,
    pub declared_total: Option<i64>,
    pub cells: Vec<String>,
}

/// A validated survey table.
///
/// Invariant: every poll has exactly one rank cell per subject.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollTable {
    pub subjects: Vec<Subject>,
    pub polls: Vec<Poll>,
    pub aggregate_column: Option<AggregateColumn>,
    /// The string that marks a subject as not ranked, if the table used one.
    pub unranked_token: Option<String>,
}

impl PollTable {
    pub fn has_aggregate(&self) -> bool {
        self.aggregate_column.is_some()
    }

    /// Checks that every poll, and the aggregate column if any, has one
    /// entry per subject.
    pub fn check_shape(&self) -> Result<(), RankingError> {
        let expected = self.subjects.len();
        for poll in self.polls.iter() {
            ensure!(
                poll.ranks.len() == expected,
                PollLengthMismatchSnafu {
                    poll: poll.name.clone(),
                    found: poll.ranks.len(),
                    expected,
                }
            );
        }
        if let Some(ac) = self.aggregate_column.as_ref() {
            ensure!(
                ac.cells.len() == expected,
                PollLengthMismatchSnafu {
                    poll: ac.name.clone(),
                    found: ac.cells.len(),
                    expected,
                }
            );
        }
        Ok(())
    }

    /// The name under which the aggregate is reported.
    pub fn aggregate_name(&self) -> String {
        self.aggregate_column
            .as_ref()
            .map(|ac| ac.name.clone())
            .unwrap_or_else(|| DEFAULT_AGGREGATE_NAME.to_string())
    }
}

pub const DEFAULT_AGGREGATE_NAME: &str = "Aggr.";

/// What the caller knows about the presence of an aggregate column.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AggregateKnowledge {
    Present,
    Absent,
    Unknown,
}

impl From<Option<bool>> for AggregateKnowledge {
    fn from(o: Option<bool>) -> Self {
        match o {
            Some(true) => AggregateKnowledge::Present,
            Some(false) => AggregateKnowledge::Absent,
            None => AggregateKnowledge::Unknown,
        }
    }
}

/// A location in the input grid, 0-based.
///
/// It is displayed in the spreadsheet notation: `A1` is the top left cell.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> CellRef {
        CellRef { row, column }
    }

    /// Column letters: A B ... Z AA AB ... AZ BA ... ZZ AAA ...
    pub fn column_name(&self) -> String {
        let mut letters: Vec<char> = Vec::new();
        let mut column = self.column + 1;
        while column > 0 {
            let digit = (column - 1) % 26;
            letters.push((b'A' + digit as u8) as char);
            column = (column - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column_name(), self.row + 1)
    }
}

// ******** Output data structures *********

/// Victories and defeats accumulated by one subject over all the polls.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Hash)]
pub struct Tally {
    pub victories: u64,
    pub defeats: u64,
}

impl Tally {
    pub fn comparisons(&self) -> u64 {
        self.victories + self.defeats
    }
}

/// The aggregate score of a subject.
///
/// `NoScore` sorts below every ratio, including `0/n`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum Score {
    NoScore,
    Ratio(Ratio),
}

impl Score {
    pub fn from_tally(tally: &Tally) -> Score {
        match Ratio::new(tally.victories, tally.comparisons()) {
            Ok(r) => Score::Ratio(r),
            Err(_) => Score::NoScore,
        }
    }

    pub fn ratio(&self) -> Option<Ratio> {
        match self {
            Score::Ratio(r) => Some(*r),
            Score::NoScore => None,
        }
    }
}

/// A subject with its scores and its place in the aggregate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankedSubject {
    pub subject: Subject,
    pub tally: Tally,
    pub score: Score,
    /// Competition rank: one plus the number of strictly better subjects.
    /// None for the subjects without a score.
    pub position: Option<u32>,
    /// True if another scored subject has exactly the same score.
    pub tied: bool,
}

impl RankedSubject {
    pub fn is_unranked(&self) -> bool {
        self.score == Score::NoScore
    }

    /// The rank as written in the aggregate column, e.g. `05` or `14 (tie)`.
    pub fn rank_label(&self, tie_marker: &str) -> Option<String> {
        self.position.map(|p| {
            if self.tied {
                format!("{:02}{}", p, tie_marker)
            } else {
                format!("{:02}", p)
            }
        })
    }
}

/// The number of subjects ranked in one poll, as declared and as counted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTotal {
    pub poll_name: String,
    pub declared: Option<i64>,
    pub actual: u32,
    /// This total belongs to the aggregate.
    pub is_aggregate: bool,
    /// The aggregate was computed here, not read from the table.
    pub computed_aggregate: bool,
}

impl SurveyTotal {
    pub fn needs_correction(&self) -> bool {
        self.declared != Some(self.actual as i64)
    }
}

/// A subject whose rank in the aggregate column of the input differs from
/// the recomputed one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AggregateDrift {
    pub subject_index: usize,
    pub found: String,
    pub computed: Option<String>,
}

/// The four quartile boundaries. An empty quartile has no boundary.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Quartiles(pub [Option<u32>; 4]);

impl Display for Quartiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|b| b.map(|x| x.to_string()).unwrap_or_default())
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AggregateResult {
    /// All the subjects, in the order of the table.
    pub subjects: Vec<RankedSubject>,
    /// Indices into `subjects`, best first. Subjects without a score come last.
    pub order: Vec<usize>,
    /// One total per input poll, then the total of the aggregate.
    pub totals: Vec<SurveyTotal>,
    /// Per poll name (aggregate last), the quartile boundaries computed from
    /// the counted totals. None if nobody is ranked in that poll.
    pub quartiles: Vec<(String, Option<Quartiles>)>,
    /// Only filled when the input table had an aggregate column.
    pub aggregate_drift: Vec<AggregateDrift>,
}

impl AggregateResult {
    pub fn ranked(&self) -> Vec<&RankedSubject> {
        self.order.iter().map(|idx| &self.subjects[*idx]).collect()
    }

    pub fn corrections(&self) -> Vec<&SurveyTotal> {
        self.totals.iter().filter(|t| t.needs_correction()).collect()
    }
}

/// Errors that prevent the ranking from completing.
#[derive(Debug, Snafu, Clone, Eq, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum RankingError {
    #[snafu(display("the table needs at least a header row, a footer row and three columns"))]
    EmptyGrid {},

    #[snafu(display(
        "table is not rectangle-shaped: row {row} has {found} cells, expected {expected}"
    ))]
    NotRectangular {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[snafu(display("cell {cell} has value {value:?}, should be or start with {expected:?}"))]
    WrongCellValue {
        cell: CellRef,
        value: String,
        expected: String,
    },

    #[snafu(display(
        "aggregate poll not found in cell {cell} and it is not known whether the table has an aggregate"
    ))]
    UndecidedAggregate { cell: CellRef },

    #[snafu(display("no {what} found in the table"))]
    EmptyTable { what: String },

    #[snafu(display(
        "poll ranks that are not integers, optionally followed by {tie_marker:?} or {note_marker:?} or both, should all be identical (the value indicating 'not ranked'); two different values found: {first:?} in {first_cell}, {second:?} in {second_cell}"
    ))]
    InconsistentUnrankedToken {
        first: String,
        first_cell: CellRef,
        second: String,
        second_cell: CellRef,
        tie_marker: String,
        note_marker: String,
    },

    #[snafu(display("poll {poll:?} has {found} ranks for {expected} subjects"))]
    PollLengthMismatch {
        poll: String,
        found: usize,
        expected: usize,
    },

    #[snafu(display("denominator can't be 0 (numerator {numerator})"))]
    ZeroDenominator { numerator: u64 },

    #[snafu(display("quartiles need a positive number of ranked positions: n = {n}"))]
    EmptyQuartileRange { n: i64 },

    #[snafu(display("quartiles are computed for at most {} ranked positions: n = {n}", u32::MAX))]
    QuartileRangeTooLarge { n: i64 },
}

/// The broad classes of failures.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    /// The shape or the fixed labels of the table are wrong.
    Structural,
    /// The content of a cell cannot be understood.
    Format,
    /// A function was called with an argument outside of its domain.
    InvalidArgument,
    /// The caller has to decide if the table has an aggregate column.
    Undecided,
}

impl RankingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankingError::EmptyGrid {}
            | RankingError::NotRectangular { .. }
            | RankingError::WrongCellValue { .. }
            | RankingError::EmptyTable { .. }
            | RankingError::PollLengthMismatch { .. } => ErrorKind::Structural,
            RankingError::InconsistentUnrankedToken { .. } => ErrorKind::Format,
            RankingError::ZeroDenominator { .. }
            | RankingError::EmptyQuartileRange { .. }
            | RankingError::QuartileRangeTooLarge { .. } => ErrorKind::InvalidArgument,
            RankingError::UndecidedAggregate { .. } => ErrorKind::Undecided,
        }
    }
}

// ********* Configuration **********

/// The fixed labels expected in the table, and the markers found in rank cells.
///
/// Header and footer cells are accepted if they start with the label, since
/// tables copied from wikis often carry references after the text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableLabels {
    pub number_header: String,
    pub name_header: String,
    pub party_header: String,
    pub total_footer: String,
    pub aggregate_header: String,
    pub tie_marker: String,
    pub note_marker: String,
}

impl Default for TableLabels {
    fn default() -> Self {
        TableLabels {
            number_header: "No.".to_string(),
            name_header: "President".to_string(),
            party_header: "Political party".to_string(),
            total_footer: "Total in survey".to_string(),
            aggregate_header: DEFAULT_AGGREGATE_NAME.to_string(),
            tie_marker: " (tie)".to_string(),
            note_marker: " *".to_string(),
        }
    }
}
