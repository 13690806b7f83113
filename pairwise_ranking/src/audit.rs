use log::{debug, info};

use crate::config::*;

/// Counts the subjects actually ranked in each poll and compares the counts
/// with the totals written in the footer of the table.
///
/// The last entry is the aggregate: a subject counts as ranked in it if it
/// has a score. If the table had no aggregate column, its declared total is
/// unknown and it is always reported.
pub fn audit_totals(table: &PollTable, ranked: &[RankedSubject]) -> Vec<SurveyTotal> {
    let mut res: Vec<SurveyTotal> = table
        .polls
        .iter()
        .map(|poll| SurveyTotal {
            poll_name: poll.name.clone(),
            declared: poll.declared_total,
            actual: poll.ranks.iter().filter(|rc| rc.is_ranked()).count() as u32,
            is_aggregate: false,
            computed_aggregate: false,
        })
        .collect();

    res.push(SurveyTotal {
        poll_name: table.aggregate_name(),
        declared: table
            .aggregate_column
            .as_ref()
            .and_then(|ac| ac.declared_total),
        actual: ranked.iter().filter(|rs| !rs.is_unranked()).count() as u32,
        is_aggregate: true,
        computed_aggregate: !table.has_aggregate(),
    });

    for st in res.iter().filter(|st| st.needs_correction()) {
        if st.computed_aggregate {
            debug!(
                "audit_totals: total in survey for {:?} (aggregate) is {}",
                st.poll_name, st.actual
            );
        } else {
            info!(
                "Total in survey for poll {:?} is incorrect: found {:?}, should be {}",
                st.poll_name, st.declared, st.actual
            );
        }
    }
    res
}

/// Compares the aggregate column found in the table, if any, with the
/// recomputed ranks.
///
/// Cells are compared after trimming. A subject without a rank matches an
/// empty cell or the 'not ranked' string of the table.
pub fn compare_existing_aggregate(
    table: &PollTable,
    ranked: &[RankedSubject],
    tie_marker: &str,
) -> Vec<AggregateDrift> {
    let ac = match table.aggregate_column.as_ref() {
        Some(ac) => ac,
        None => return Vec::new(),
    };
    let mut res: Vec<AggregateDrift> = Vec::new();
    for (idx, (found, rs)) in ac.cells.iter().zip(ranked.iter()).enumerate() {
        let found = found.trim();
        let computed = rs.rank_label(tie_marker);
        let same = match computed.as_deref() {
            Some(label) => found == label,
            None => found.is_empty() || table.unranked_token.as_deref() == Some(found),
        };
        if !same {
            info!(
                "Aggregate rank of {:?} is {:?} in the table, recomputed as {:?}",
                rs.subject.name, found, computed
            );
            res.push(AggregateDrift {
                subject_index: idx,
                found: found.to_string(),
                computed,
            });
        }
    }
    res
}
