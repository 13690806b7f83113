use log::{debug, info};
use snafu::prelude::*;

use crate::config::*;

/// Validates a grid of strings and extracts the survey table out of it.
///
/// The grid is expected to have:
/// - a header row: the number, name and party labels, one column per poll
///   and optionally an aggregate column at the end
/// - one row per subject
/// - a footer row with the total number of subjects ranked in each poll
///
/// If the header does not show an aggregate column and `knowledge` is
/// `Unknown`, this returns `RankingError::UndecidedAggregate`. The caller is
/// expected to ask and try again.
pub fn extract_table(
    grid: &[Vec<String>],
    labels: &TableLabels,
    knowledge: AggregateKnowledge,
) -> Result<PollTable, RankingError> {
    let height = grid.len();
    let width = grid.first().map(|r| r.len()).unwrap_or(0);
    ensure!(height >= 2 && width >= 3, EmptyGridSnafu {});

    if let Some((row, r)) = grid.iter().enumerate().find(|(_, r)| r.len() != width) {
        return NotRectangularSnafu {
            row,
            found: r.len(),
            expected: width,
        }
        .fail();
    }

    let header = &grid[0];
    let footer = &grid[height - 1];
    check_cell(grid, 0, 0, &labels.number_header)?;
    check_cell(grid, 0, 1, &labels.name_header)?;
    check_cell(grid, 0, 2, &labels.party_header)?;
    check_cell(grid, height - 1, 1, &labels.total_footer)?;

    // An empty aggregate label never matches.
    let aggregate_in_header = !labels.aggregate_header.is_empty()
        && header[width - 1].starts_with(labels.aggregate_header.as_str());
    let has_aggregate = if aggregate_in_header {
        true
    } else {
        match knowledge {
            AggregateKnowledge::Absent => false,
            AggregateKnowledge::Present => {
                // Present but not in the last column, or with an unexpected title.
                return wrong_cell_value(grid, 0, width - 1, &labels.aggregate_header);
            }
            AggregateKnowledge::Unknown => {
                return UndecidedAggregateSnafu {
                    cell: CellRef::new(0, width - 1),
                }
                .fail();
            }
        }
    };
    debug!("extract_table: has_aggregate: {:?}", has_aggregate);

    let num_subjects = height - 2;
    ensure!(
        num_subjects > 0,
        EmptyTableSnafu {
            what: "subjects".to_string()
        }
    );
    let num_polls = (width - 3)
        .checked_sub(usize::from(has_aggregate))
        .filter(|n| *n > 0)
        .context(EmptyTableSnafu {
            what: "polls".to_string(),
        })?;

    let unranked_token = find_unranked_token(grid, num_polls, labels)?;
    if let Some(t) = unranked_token.as_ref() {
        info!("String {:?} in table interpreted to indicate 'not ranked'", t);
    }

    let subjects: Vec<Subject> = grid[1..height - 1]
        .iter()
        .map(|row| Subject {
            number: row[0].clone(),
            name: row[1].clone(),
            party: row[2].clone(),
        })
        .collect();

    let polls: Vec<Poll> = (0..num_polls)
        .map(|poll_idx| {
            let column = poll_idx + 3;
            let ranks: Vec<RankCell> = grid[1..height - 1]
                .iter()
                .map(|row| parse_rank_cell(&row[column], labels))
                .collect();
            Poll {
                name: header[column].clone(),
                ranks,
                declared_total: parse_integer(&footer[column]),
            }
        })
        .collect();

    let aggregate_column = if has_aggregate {
        Some(AggregateColumn {
            name: header[width - 1].clone(),
            declared_total: parse_integer(&footer[width - 1]),
            cells: grid[1..height - 1]
                .iter()
                .map(|row| row[width - 1].clone())
                .collect(),
        })
    } else {
        None
    };

    info!(
        "extract_table: {} subjects, {} polls, aggregate column: {}",
        subjects.len(),
        polls.len(),
        has_aggregate
    );

    Ok(PollTable {
        subjects,
        polls,
        aggregate_column,
        unranked_token,
    })
}

/// Scans the poll region once and returns the only string that is not a rank.
///
/// More than one distinct such string is an error.
fn find_unranked_token(
    grid: &[Vec<String>],
    num_polls: usize,
    labels: &TableLabels,
) -> Result<Option<String>, RankingError> {
    let mut found: Option<(String, CellRef)> = None;
    for (row_idx, row) in grid.iter().enumerate().take(grid.len() - 1).skip(1) {
        for (column, entry) in row.iter().enumerate().skip(3).take(num_polls) {
            if parse_rank_cell(entry, labels).is_ranked() {
                continue;
            }
            let cell = CellRef::new(row_idx, column);
            match found.as_ref() {
                None => {
                    debug!("find_unranked_token: first token {:?} at {}", entry, cell);
                    found = Some((entry.clone(), cell));
                }
                Some((token, _)) if token == entry => {}
                Some((token, first_cell)) => {
                    return InconsistentUnrankedTokenSnafu {
                        first: token.clone(),
                        first_cell: *first_cell,
                        second: entry.clone(),
                        second_cell: cell,
                        tie_marker: labels.tie_marker.clone(),
                        note_marker: labels.note_marker.clone(),
                    }
                    .fail();
                }
            }
        }
    }
    Ok(found.map(|(token, _)| token))
}

/// Parses a cell of the poll region.
///
/// The first occurrence of the tie marker, then the first occurrence of the
/// note marker, are removed before reading the number. Anything that is not
/// a number after that is considered unranked.
pub fn parse_rank_cell(entry: &str, labels: &TableLabels) -> RankCell {
    let (rest, tie) = strip_first(entry, &labels.tie_marker);
    let (rest, note) = strip_first(&rest, &labels.note_marker);
    match parse_integer(&rest) {
        Some(rank) => RankCell::Ranked { rank, tie, note },
        None => RankCell::Unranked,
    }
}

fn strip_first(s: &str, marker: &str) -> (String, bool) {
    if !marker.is_empty() && s.contains(marker) {
        (s.replacen(marker, "", 1), true)
    } else {
        (s.to_string(), false)
    }
}

/// A signed decimal integer, with an optional leading `+` or `-`.
/// No surrounding whitespace is accepted.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

fn check_cell(
    grid: &[Vec<String>],
    row: usize,
    column: usize,
    expected: &str,
) -> Result<(), RankingError> {
    if grid[row][column].starts_with(expected) {
        Ok(())
    } else {
        wrong_cell_value(grid, row, column, expected)
    }
}

fn wrong_cell_value<T>(
    grid: &[Vec<String>],
    row: usize,
    column: usize,
    expected: &str,
) -> Result<T, RankingError> {
    WrongCellValueSnafu {
        cell: CellRef::new(row, column),
        value: grid[row][column].clone(),
        expected,
    }
    .fail()
}
