/// Structured commands and their outcomes.
///
/// Text parsing and rendering live with the caller; this module only maps an
/// already-validated `Command` onto `Standings` and reports what happened.
use crate::error::{StandingsError, StandingsResult};
use crate::standings::Standings;
use crate::types::{JudgeStatus, RankingQuery, ScrollReport, SubmissionQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    AddTeam { name: String },
    Start { duration: u32, problem_count: usize },
    Submit { problem: usize, team: String, status: JudgeStatus, time: i64 },
    Flush,
    Freeze,
    Scroll,
    QueryRanking { team: String },
    /// `None` filters match anything.
    QuerySubmission { team: String, problem: Option<usize>, status: Option<JudgeStatus> },
    End,
}

/// Which command an outcome or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    AddTeam,
    Start,
    Submit,
    Flush,
    Freeze,
    Scroll,
    QueryRanking,
    QuerySubmission,
    End,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddTeam { .. } => CommandKind::AddTeam,
            Command::Start { .. } => CommandKind::Start,
            Command::Submit { .. } => CommandKind::Submit,
            Command::Flush => CommandKind::Flush,
            Command::Freeze => CommandKind::Freeze,
            Command::Scroll => CommandKind::Scroll,
            Command::QueryRanking { .. } => CommandKind::QueryRanking,
            Command::QuerySubmission { .. } => CommandKind::QuerySubmission,
            Command::End => CommandKind::End,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    TeamAdded,
    Started,
    Submitted,
    Flushed,
    Frozen,
    Scrolled(ScrollReport),
    Ranking(RankingQuery),
    Submission(SubmissionQuery),
    Ended,
}

impl Standings {
    /// Run one command to completion.
    ///
    /// Once `End` has been executed every further command fails with
    /// `ContestEnded`.
    pub fn execute(&mut self, command: Command) -> StandingsResult<Outcome> {
        if self.ended {
            return Err(StandingsError::ContestEnded);
        }

        match command {
            Command::AddTeam { name } => self.add_team(&name).map(|_| Outcome::TeamAdded),
            Command::Start { duration, problem_count } => {
                self.start(duration, problem_count).map(|_| Outcome::Started)
            }
            Command::Submit { problem, team, status, time } => {
                self.submit(problem, &team, status, time).map(|_| Outcome::Submitted)
            }
            Command::Flush => {
                self.flush();
                Ok(Outcome::Flushed)
            }
            Command::Freeze => self.freeze().map(|_| Outcome::Frozen),
            Command::Scroll => self.scroll().map(Outcome::Scrolled),
            Command::QueryRanking { team } => self.query_ranking(&team).map(Outcome::Ranking),
            Command::QuerySubmission { team, problem, status } => {
                self.query_submission(&team, problem, status).map(Outcome::Submission)
            }
            Command::End => {
                self.end();
                Ok(Outcome::Ended)
            }
        }
    }
}
