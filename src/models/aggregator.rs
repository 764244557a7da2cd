//! Vote aggregation for the hard-voting ensemble

/// Unweighted majority over `(estimator, class)` votes.
///
/// Every estimator counts once. Ties go to the lowest class and an empty
/// vote yields class 0.
pub fn hard_vote<S: AsRef<str>>(votes: &[(S, u8)]) -> u8 {
    let mut tally = [0usize; 2];
    for (_, class) in votes {
        tally[usize::from(*class == 1)] += 1;
    }
    u8::from(tally[1] > tally[0])
}
