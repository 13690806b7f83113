use log::debug;

use crate::config::*;

/// Turns the tallies into scores and positions.
///
/// The subjects are sorted by decreasing score (stable, so the order of the
/// table breaks the remaining ties), with the subjects without a score last.
/// Positions follow the competition ranking: tied subjects share the
/// position, and the following positions are skipped. If the second and third
/// subjects are tied, they are both `02` and nobody is `03`.
///
/// The returned subjects are in the order of the input.
///
/// # Panics
///
/// Panics if there is not exactly one tally per subject.
pub fn assign_ranks(subjects: &[Subject], tallies: &[Tally]) -> Vec<RankedSubject> {
    assert_eq!(
        subjects.len(),
        tallies.len(),
        "assign_ranks: one tally per subject"
    );
    let mut res: Vec<RankedSubject> = subjects
        .iter()
        .zip(tallies.iter())
        .map(|(subject, tally)| RankedSubject {
            subject: subject.clone(),
            tally: *tally,
            score: Score::from_tally(tally),
            position: None,
            tied: false,
        })
        .collect();

    let order = ranking_order(&res);
    let mut group_start: usize = 0;
    for (sorted_idx, &idx) in order.iter().enumerate() {
        let score = res[idx].score;
        if score == Score::NoScore {
            // Everything after this point has no score either.
            break;
        }
        if sorted_idx > 0 && res[order[sorted_idx - 1]].score == score {
            res[idx].tied = true;
            res[order[sorted_idx - 1]].tied = true;
        } else {
            group_start = sorted_idx;
        }
        res[idx].position = Some((group_start + 1) as u32);
    }
    debug!(
        "assign_ranks: positions: {:?}",
        res.iter()
            .map(|rs| (rs.subject.name.as_str(), rs.position, rs.tied))
            .collect::<Vec<_>>()
    );
    res
}

/// The indices of the subjects, from the best to the worst score.
///
/// Subjects with equal scores keep their relative order.
pub fn ranking_order(subjects: &[RankedSubject]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..subjects.len()).collect();
    // Score orders NoScore lowest, so a descending sort puts it last.
    order.sort_by(|a, b| subjects[*b].score.cmp(&subjects[*a].score));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(names: &[&str]) -> Vec<Subject> {
        names
            .iter()
            .enumerate()
            .map(|(idx, n)| Subject {
                number: format!("{:02}", idx + 1),
                name: n.to_string(),
                party: "".to_string(),
            })
            .collect()
    }

    fn t(victories: u64, defeats: u64) -> Tally {
        Tally { victories, defeats }
    }

    fn labels(rs: &[RankedSubject]) -> Vec<Option<String>> {
        rs.iter().map(|r| r.rank_label(" (tie)")).collect()
    }

    #[test]
    #[should_panic(expected = "one tally per subject")]
    fn missing_tally() {
        assign_ranks(&subjects(&["A", "B"]), &[t(1, 0)]);
    }

    #[test]
    fn strict_order() {
        let rs = assign_ranks(&subjects(&["A", "B", "C"]), &[t(2, 0), t(1, 1), t(0, 2)]);
        assert_eq!(
            labels(&rs),
            vec![
                Some("01".to_string()),
                Some("02".to_string()),
                Some("03".to_string())
            ]
        );
        assert!(rs.iter().all(|r| !r.tied));
    }

    #[test]
    fn competition_ranking_with_ties() {
        // B and C are tied with 1/2 == 2/4.
        let rs = assign_ranks(
            &subjects(&["A", "B", "C", "D"]),
            &[t(3, 0), t(1, 1), t(2, 2), t(0, 3)],
        );
        assert_eq!(
            labels(&rs),
            vec![
                Some("01".to_string()),
                Some("02 (tie)".to_string()),
                Some("02 (tie)".to_string()),
                Some("04".to_string())
            ]
        );
        assert!(!rs[0].tied);
        assert!(rs[1].tied && rs[2].tied);
        assert!(!rs[3].tied);
    }

    #[test]
    fn three_way_tie_at_the_top() {
        let rs = assign_ranks(
            &subjects(&["A", "B", "C", "D"]),
            &[t(1, 1), t(0, 4), t(3, 3), t(2, 2)],
        );
        assert_eq!(rs[0].position, Some(1));
        assert_eq!(rs[2].position, Some(1));
        assert_eq!(rs[3].position, Some(1));
        assert_eq!(rs[1].position, Some(4));
        assert!(rs[0].tied && rs[2].tied && rs[3].tied);
        assert!(!rs[1].tied);
    }

    #[test]
    fn no_score_sorts_last() {
        let rs = assign_ranks(
            &subjects(&["A", "B", "C", "D"]),
            &[t(0, 0), t(0, 2), t(0, 0), t(2, 0)],
        );
        assert_eq!(ranking_order(&rs), vec![3, 1, 0, 2]);
        assert_eq!(rs[0].rank_label(" (tie)"), None);
        assert_eq!(rs[2].rank_label(" (tie)"), None);
        // Two subjects without a score are not tied.
        assert!(!rs[0].tied && !rs[2].tied);
        assert!(rs[0].is_unranked());
        // A zero score is still a score.
        assert_eq!(rs[1].position, Some(2));
        assert_eq!(rs[3].position, Some(1));
    }

    #[test]
    fn label_padding() {
        let names: Vec<String> = (0..12).map(|i| format!("S{}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let tallies: Vec<Tally> = (0..12).map(|i| t(11 - i, i)).collect();
        let rs = assign_ranks(&subjects(&name_refs), &tallies);
        assert_eq!(rs[0].rank_label(" (tie)"), Some("01".to_string()));
        assert_eq!(rs[11].rank_label(" (tie)"), Some("12".to_string()));
    }
}
