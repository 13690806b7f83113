use snafu::prelude::*;

use crate::config::*;

/// The last (highest-numbered) position of each quartile of the positions
/// `1..=n`.
///
/// Quartiles follow the 'median goes up' rule: the positions are split into
/// a top and a bottom half, each half is split again, and whenever a range
/// has an odd length its middle element goes to the top half.
///
/// With fewer than four positions, the last quartiles are empty.
///
/// Ties are not taken into account: only the number of ranked positions
/// matters. If several subjects are tied across a quartile boundary, the
/// boundary still falls in the middle of the tied group.
pub fn quartiles(n: i64) -> Result<Quartiles, RankingError> {
    if n < 1 {
        return EmptyQuartileRangeSnafu { n }.fail();
    }
    let n = u32::try_from(n)
        .ok()
        .context(QuartileRangeTooLargeSnafu { n })?;
    let res = match n {
        1 => [Some(1), None, None, None],
        2 => [Some(1), Some(2), None, None],
        3 => [Some(1), Some(2), Some(3), None],
        _ => {
            // The bias that sends the median to the top half.
            let k: u64 = 1;
            let q4 = n as u64;
            let q2 = (q4 + k) / 2;
            let q1 = (q2 + k) / 2;
            let q3 = q2 + (q4 - q2 + k) / 2;
            // Every boundary is at most n.
            [Some(q1 as u32), Some(q2 as u32), Some(q3 as u32), Some(n)]
        }
    };
    Ok(Quartiles(res))
}
