/// Failure conditions reported by the standings engine.
///
/// Every error is detected before any state is touched, so a failed call
/// leaves the contest exactly as it was.
use thiserror::Error;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The operation is not allowed in the contest's current phase.
    InvalidState,
    /// The operation referenced a team that does not exist.
    NotFound,
}

/// Root error type for all standings operations.
///
/// The `Display` text is the short reason shown after a failed command,
/// e.g. `[Error]Add failed: duplicated team name.`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandingsError {
    #[error("competition has started")]
    AlreadyStarted,

    #[error("competition has not started")]
    NotStarted,

    #[error("duplicated team name")]
    DuplicateTeam(String),

    #[error("scoreboard has been frozen")]
    AlreadyFrozen,

    #[error("scoreboard has not been frozen")]
    NotFrozen,

    #[error("cannot find the team")]
    TeamNotFound(String),

    #[error("problem {index} is out of range ({count} problems)")]
    ProblemOutOfRange { index: usize, count: usize },

    #[error("{count} problems requested, at most {max} supported", max = crate::constants::MAX_PROBLEMS)]
    TooManyProblems { count: usize },

    #[error("competition has ended")]
    ContestEnded,
}

impl StandingsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StandingsError::TeamNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::InvalidState,
        }
    }
}

pub type StandingsResult<T> = Result<T, StandingsError>;

/// Returned when a string is not one of the four status keywords.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown judge status \"{0}\"")]
pub struct UnknownStatus(pub String);
