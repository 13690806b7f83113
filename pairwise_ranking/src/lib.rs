/*!
Aggregate ranking of ranked-list surveys.

A survey table lists subjects (rows) and the rank each poll (columns) gave
them. The aggregate ranks subjects by the ratio of favourable to total
pairwise comparisons, excluding ties: for every poll in which two subjects
are both ranked, the better ranked one gets a victory and the other one a
defeat. The score of a subject is `victories / (victories + defeats)`,
compared exactly as a fraction.

See the [manual] for the table format and the [quick_start] for a complete
example.
 */
mod audit;
pub mod builder;
mod config;
pub mod manual;
mod quartiles;
pub mod quick_start;
mod ranking;
mod rational;
mod scorer;
mod table;

use log::{debug, info};

pub use crate::audit::{audit_totals, compare_existing_aggregate};
pub use crate::config::*;
pub use crate::quartiles::quartiles;
pub use crate::ranking::{assign_ranks, ranking_order};
pub use crate::rational::Ratio;
pub use crate::scorer::score_pairs;
pub use crate::table::{extract_table, parse_integer, parse_rank_cell};

/// Runs the aggregate ranking on a validated table.
///
/// This computes the pairwise scores, the positions, the corrected totals of
/// each poll and of the aggregate, and the quartile boundaries based on the
/// corrected totals.
///
/// Use [`run_aggregate_with`] to control the tie marker used when comparing
/// with an aggregate column already present in the table.
pub fn run_aggregate(table: &PollTable) -> AggregateResult {
    run_aggregate_with(table, &TableLabels::default())
}

pub fn run_aggregate_with(table: &PollTable, labels: &TableLabels) -> AggregateResult {
    info!(
        "Processing {:?} subjects in {:?} polls",
        table.subjects.len(),
        table.polls.len()
    );

    let tallies = score_pairs(table);
    let subjects = assign_ranks(&table.subjects, &tallies);
    let order = ranking_order(&subjects);
    {
        for idx in order.iter() {
            let rs = &subjects[*idx];
            debug!(
                "Subject {}: {} {}/{} -> {:?}",
                rs.subject.number,
                rs.subject.name,
                rs.tally.victories,
                rs.tally.comparisons(),
                rs.rank_label(&labels.tie_marker)
            );
        }
    }

    let totals = audit_totals(table, &subjects);
    let quartile_bounds: Vec<(String, Option<Quartiles>)> = totals
        .iter()
        .map(|st| {
            let q = quartiles(st.actual as i64).ok();
            if q.is_none() {
                info!("No subject ranked in {:?}, no quartiles", st.poll_name);
            }
            (st.poll_name.clone(), q)
        })
        .collect();

    let aggregate_drift = compare_existing_aggregate(table, &subjects, &labels.tie_marker);

    AggregateResult {
        subjects,
        order,
        totals,
        quartiles: quartile_bounds,
        aggregate_drift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn run(rows: &[&[&str]]) -> AggregateResult {
        let _ = env_logger::builder().is_test(true).try_init();
        let table = extract_table(
            &grid(rows),
            &TableLabels::default(),
            AggregateKnowledge::Absent,
        )
        .unwrap();
        run_aggregate(&table)
    }

    #[test]
    fn three_subjects_one_poll() {
        let res = run(&[
            &["No.", "President", "Political party", "Poll"],
            &["01", "A", "", "1"],
            &["02", "B", "", "2"],
            &["03", "C", "", "3"],
            &["", "Total in survey", "", "3"],
        ]);
        let tallies: Vec<(u64, u64)> = res
            .subjects
            .iter()
            .map(|rs| (rs.tally.victories, rs.tally.defeats))
            .collect();
        assert_eq!(tallies, vec![(2, 0), (1, 1), (0, 2)]);
        let labels: Vec<Option<String>> = res
            .subjects
            .iter()
            .map(|rs| rs.rank_label(" (tie)"))
            .collect();
        assert_eq!(
            labels,
            vec![
                Some("01".to_string()),
                Some("02".to_string()),
                Some("03".to_string())
            ]
        );
        assert_eq!(
            res.quartiles[0],
            ("Poll".to_string(), Some(Quartiles([Some(1), Some(2), Some(3), None])))
        );
        assert_eq!(res.totals[0].actual, 3);
        assert!(!res.totals[0].needs_correction());
        // The aggregate was not in the table: its total is reported.
        assert_eq!(res.corrections().len(), 1);
        assert_eq!(res.corrections()[0].poll_name, "Aggr.");
        assert_eq!(res.corrections()[0].actual, 3);
    }

    #[test]
    fn tie_at_the_top() {
        let res = run(&[
            &["No.", "President", "Political party", "Poll"],
            &["01", "A", "", "1 (tie)"],
            &["02", "B", "", "1 (tie)"],
            &["03", "C", "", "3"],
            &["04", "D", "", "4"],
            &["", "Total in survey", "", "4"],
        ]);
        let labels: Vec<Option<String>> = res
            .subjects
            .iter()
            .map(|rs| rs.rank_label(" (tie)"))
            .collect();
        assert_eq!(
            labels,
            vec![
                Some("01 (tie)".to_string()),
                Some("01 (tie)".to_string()),
                Some("03".to_string()),
                Some("04".to_string())
            ]
        );
        assert!(res.subjects[0].tied && res.subjects[1].tied);
        assert_eq!(
            res.quartiles.last().unwrap().1,
            Some(Quartiles([Some(1), Some(2), Some(3), Some(4)]))
        );
    }

    #[test]
    fn ranked_order_and_unranked_subjects() {
        let res = run(&[
            &["No.", "President", "Political party", "P1", "P2"],
            &["01", "A", "", "3", "-"],
            &["02", "B", "", "-", "-"],
            &["03", "C", "", "1", "2"],
            &["04", "D", "", "2", "1"],
            &["", "Total in survey", "", "3", "2"],
        ]);
        let names: Vec<&str> = res
            .ranked()
            .iter()
            .map(|rs| rs.subject.name.as_str())
            .collect();
        // C: 2/3, D: 2/3, A: 0/2, B: no score.
        assert_eq!(names, vec!["C", "D", "A", "B"]);
        assert_eq!(res.subjects[2].rank_label(" (tie)"), Some("01 (tie)".to_string()));
        assert_eq!(res.subjects[0].rank_label(" (tie)"), Some("03".to_string()));
        assert_eq!(res.subjects[1].rank_label(" (tie)"), None);
        assert_eq!(res.totals.last().unwrap().actual, 3);
    }

    #[test]
    fn poll_without_ranked_subjects_has_no_quartiles() {
        let res = run(&[
            &["No.", "President", "Political party", "P1", "P2"],
            &["01", "A", "", "1", "x"],
            &["02", "B", "", "2", "x"],
            &["", "Total in survey", "", "2", "0"],
        ]);
        assert_eq!(res.quartiles[1], ("P2".to_string(), None));
        assert!(res.quartiles[0].1.is_some());
    }
}
