use log::debug;

use crate::config::*;

/// Counts the pairwise victories and defeats of every subject.
///
/// For every pair of subjects and every poll in which both are ranked, the
/// subject with the lower rank value gets a victory and the other one a
/// defeat. Equal ranks (ties) and pairs with an unranked subject do not
/// count.
///
/// The result is in the order of `table.subjects`.
///
/// # Panics
///
/// Panics if a poll has fewer ranks than there are subjects. Tables from
/// [`extract_table`](crate::extract_table) or the
/// [`Builder`](crate::builder::Builder) always have the right shape; use
/// [`PollTable::check_shape`] on tables assembled by hand.
pub fn score_pairs(table: &PollTable) -> Vec<Tally> {
    let num_subjects = table.subjects.len();
    let mut tallies: Vec<Tally> = vec![Tally::default(); num_subjects];
    for s1 in 0..num_subjects {
        for s2 in (s1 + 1)..num_subjects {
            for poll in table.polls.iter() {
                let (r1, r2) = match (poll.ranks[s1].rank(), poll.ranks[s2].rank()) {
                    (Some(r1), Some(r2)) if r1 != r2 => (r1, r2),
                    _ => continue,
                };
                if r1 < r2 {
                    tallies[s1].victories += 1;
                    tallies[s2].defeats += 1;
                } else {
                    tallies[s1].defeats += 1;
                    tallies[s2].victories += 1;
                }
            }
        }
    }
    debug!("score_pairs: tallies: {:?}", tallies);
    tallies
}
