/// frozenboard-core: Contest standings engine with freeze/scroll reveal.
///
/// Submission events → per-problem state → rank keys → ordered standings.
/// No IO, no parsing, no clock: callers hand in typed commands with logical
/// timestamps and render the structured results however they like.
///
/// Teams are identified by name. Problems are identified by a 0-based index
/// (`0` is problem `A`).
///
/// # Quick start
///
/// ```rust
/// use frozenboard_core::{JudgeStatus, Standings};
///
/// let mut standings = Standings::new();
/// standings.add_team("alpha").unwrap();
/// standings.add_team("beta").unwrap();
/// standings.start(300, 2).unwrap();
///
/// standings.submit(0, "beta", JudgeStatus::Accepted, 12).unwrap();
/// standings.freeze().unwrap();
/// standings.submit(1, "alpha", JudgeStatus::Accepted, 250).unwrap();
/// standings.submit(0, "alpha", JudgeStatus::Accepted, 260).unwrap();
///
/// let report = standings.scroll().unwrap();
/// for change in &report.changes {
///     println!("{} passes {} ({} solved, {} penalty)",
///         change.team, change.displaced, change.solved, change.penalty);
/// }
/// assert_eq!(report.after[0].team, "alpha");
/// assert_eq!(standings.query_ranking("alpha").unwrap().rank, 1);
/// ```

pub mod command;
pub mod constants;
pub mod error;
mod order;
pub mod problem;
pub mod rank_key;
pub mod standings;
pub mod types;

// Re-export primary public API at crate root.
pub use command::{Command, CommandKind, Outcome};
pub use error::{ErrorKind, StandingsError, StandingsResult, UnknownStatus};
pub use problem::ProblemState;
pub use rank_key::{compare_teams, RankKey};
pub use standings::Standings;
pub use types::{
    problem_index, problem_letter, Cell, JudgeStatus, RankChange, RankingQuery, ScoreboardRow,
    ScrollReport, SubmissionQuery, SubmissionRecord,
};
