use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_PROBLEMS;
use crate::error::UnknownStatus;

/// Verdict attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JudgeStatus {
    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceed,
}

impl JudgeStatus {
    pub const ALL: [JudgeStatus; 4] = [
        JudgeStatus::Accepted,
        JudgeStatus::WrongAnswer,
        JudgeStatus::RuntimeError,
        JudgeStatus::TimeLimitExceed,
    ];

    /// The keyword used for this status on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            JudgeStatus::Accepted => "Accepted",
            JudgeStatus::WrongAnswer => "Wrong_Answer",
            JudgeStatus::RuntimeError => "Runtime_Error",
            JudgeStatus::TimeLimitExceed => "Time_Limit_Exceed",
        }
    }

    pub fn is_accepted(self) -> bool {
        self == JudgeStatus::Accepted
    }
}

impl fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JudgeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JudgeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Letter naming a problem index (0 → 'A').
pub fn problem_letter(index: usize) -> char {
    assert!(index < MAX_PROBLEMS, "problem index {} has no letter", index);
    (b'A' + index as u8) as char
}

/// Problem index named by a letter, or `None` if it is not `A..=Z`.
pub fn problem_index(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some((letter as u8 - b'A') as usize)
    } else {
        None
    }
}

/// One entry of a team's submission log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmissionRecord {
    pub problem: usize,
    pub status: JudgeStatus,
    pub time: i64,
}

/// What a scoreboard shows for one (team, problem).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// No submissions yet.
    Unattempted,
    /// Solved after `wrong` rejected attempts.
    Solved { wrong: u32 },
    /// Unsolved with `wrong` rejected attempts (`wrong > 0`).
    Failed { wrong: u32 },
    /// Hidden by the freeze: `wrong_at_freeze` rejections before the freeze,
    /// `post_freeze` submissions since.
    Frozen { wrong_at_freeze: u32, post_freeze: u32 },
}

/// One line of a scoreboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreboardRow {
    pub team: String,
    /// 1-based position.
    pub rank: usize,
    pub solved: usize,
    pub penalty: i64,
    pub cells: Vec<Cell>,
}

/// Promotion observed while scrolling: `team` moved above `displaced`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankChange {
    pub team: String,
    pub displaced: String,
    pub solved: usize,
    pub penalty: i64,
}

/// Everything a scroll produces, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollReport {
    /// Board under frozen visibility, before anything was revealed.
    pub before: Vec<ScoreboardRow>,
    pub changes: Vec<RankChange>,
    /// Board with every problem revealed.
    pub after: Vec<ScoreboardRow>,
}

/// Answer to a ranking query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingQuery {
    pub team: String,
    /// 1-based position in the last flushed order.
    pub rank: usize,
    /// True while the contest is frozen: the flushed order may hide progress.
    pub stale: bool,
}

/// Answer to a submission query. `found` is `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmissionQuery {
    pub team: String,
    pub found: Option<SubmissionRecord>,
}

/// Maps team names to internal 0..N indices, in registration order.
#[derive(Debug, Default)]
pub(crate) struct TeamRegistry {
    names: Vec<String>,
    name_to_idx: HashMap<String, usize>,
}

impl TeamRegistry {
    /// Returns the new index, or `None` if the name is taken.
    pub fn register(&mut self, name: &str) -> Option<usize> {
        if self.name_to_idx.contains_key(name) {
            return None;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.name_to_idx.insert(name.to_string(), idx);
        Some(idx)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// All indices sorted by ascending team name.
    pub fn by_name(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.names.len()).collect();
        order.sort_by(|&a, &b| self.names[a].cmp(&self.names[b]));
        order
    }
}
