/// Penalty minutes charged for every rejected submission that precedes the
/// first accepted one on a problem.
///
/// A solved problem contributes `PENALTY_PER_WRONG * wrong + accept_time`
/// to the team's total penalty. Rejections after the first accept are free.
pub const PENALTY_PER_WRONG: i64 = 20;

/// Problems are named by a single letter `A..=Z`, so a contest can have at
/// most this many of them.
pub const MAX_PROBLEMS: usize = 26;
