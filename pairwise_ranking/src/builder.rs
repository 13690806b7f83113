pub use crate::config::*;

/// A builder for survey tables, when the data does not come from a grid of
/// strings.
///
/// ```
/// use pairwise_ranking::builder::Builder;
/// use pairwise_ranking::run_aggregate;
/// # use pairwise_ranking::RankingError;
///
/// let table = Builder::new()
///     .subjects(&["Washington", "Adams", "Jefferson"])
///     .poll("Survey 1", &[Some(1), Some(3), Some(2)])
///     .poll("Survey 2", &[Some(1), None, Some(2)])
///     .build()?;
///
/// let res = run_aggregate(&table);
/// assert_eq!(res.ranked()[0].subject.name, "Washington");
///
/// # Ok::<(), RankingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    _subjects: Vec<Subject>,
    _polls: Vec<Poll>,
    _aggregate_column: Option<AggregateColumn>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds subjects by name. They are numbered in the order given.
    pub fn subjects(mut self, names: &[&str]) -> Builder {
        let offset = self._subjects.len();
        self._subjects
            .extend(names.iter().enumerate().map(|(idx, name)| Subject {
                number: format!("{:02}", offset + idx + 1),
                name: name.to_string(),
                party: "".to_string(),
            }));
        self
    }

    pub fn subject(mut self, subject: Subject) -> Builder {
        self._subjects.push(subject);
        self
    }

    /// Adds a poll. `None` means that the subject is not ranked in this poll.
    /// The declared total is the number of ranked subjects.
    pub fn poll(self, name: &str, ranks: &[Option<i64>]) -> Builder {
        let total = ranks.iter().flatten().count() as i64;
        self.poll_with_total(name, ranks, Some(total))
    }

    /// Adds a poll with an explicit (possibly wrong or missing) declared total.
    pub fn poll_with_total(
        mut self,
        name: &str,
        ranks: &[Option<i64>],
        declared_total: Option<i64>,
    ) -> Builder {
        self._polls.push(Poll {
            name: name.to_string(),
            ranks: ranks
                .iter()
                .map(|r| match r {
                    Some(rank) => RankCell::Ranked {
                        rank: *rank,
                        tie: false,
                        note: false,
                    },
                    None => RankCell::Unranked,
                })
                .collect(),
            declared_total,
        });
        self
    }

    /// Sets the aggregate column, as it would have been found in a table.
    pub fn aggregate_column(
        mut self,
        name: &str,
        cells: &[&str],
        declared_total: Option<i64>,
    ) -> Builder {
        self._aggregate_column = Some(AggregateColumn {
            name: name.to_string(),
            declared_total,
            cells: cells.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Checks that every column has one entry per subject.
    pub fn build(self) -> Result<PollTable, RankingError> {
        let table = PollTable {
            subjects: self._subjects,
            polls: self._polls,
            aggregate_column: self._aggregate_column,
            unranked_token: None,
        };
        table.check_shape()?;
        Ok(table)
    }
}
