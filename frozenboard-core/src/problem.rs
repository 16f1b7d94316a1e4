/// Per-team, per-problem bookkeeping.
///
/// Plain data plus the transitions that submissions, FREEZE and SCROLL apply
/// to it. Whether the contest as a whole is frozen lives in `Standings`, so
/// every freeze-aware query takes it as a parameter instead of caching it.
use crate::constants::PENALTY_PER_WRONG;
use crate::types::{Cell, JudgeStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemState {
    pub solved: bool,
    /// Valid only when `solved`.
    pub first_accepted_time: i64,
    /// Rejections strictly before the first accept. Never changes once solved.
    pub wrong_before_accept: u32,

    // Freeze epoch. Meaningful only while the contest is frozen.
    pub wrong_at_freeze: u32,
    pub unsolved_at_freeze: bool,
    pub post_freeze_submissions: u32,
    pub has_post_freeze_activity: bool,
    pub unfrozen_during_scroll: bool,
}

impl ProblemState {
    /// Apply one submission.
    pub fn record(&mut self, status: JudgeStatus, time: i64, contest_frozen: bool) {
        if contest_frozen && self.unsolved_at_freeze && !self.unfrozen_during_scroll {
            self.post_freeze_submissions += 1;
            self.has_post_freeze_activity = true;
        }

        if self.solved {
            return;
        }
        if status.is_accepted() {
            self.solved = true;
            self.first_accepted_time = time;
        } else {
            self.wrong_before_accept += 1;
        }
    }

    /// Start a new freeze epoch.
    pub fn snapshot_freeze(&mut self) {
        self.wrong_at_freeze = self.wrong_before_accept;
        self.unsolved_at_freeze = !self.solved;
        self.post_freeze_submissions = 0;
        self.has_post_freeze_activity = false;
        self.unfrozen_during_scroll = false;
    }

    /// Drop every freeze-epoch field.
    pub fn clear_freeze(&mut self) {
        self.wrong_at_freeze = 0;
        self.unsolved_at_freeze = false;
        self.post_freeze_submissions = 0;
        self.has_post_freeze_activity = false;
        self.unfrozen_during_scroll = false;
    }

    /// Hidden from both the scoreboard cell and the rank key.
    pub fn is_visually_frozen(&self, contest_frozen: bool) -> bool {
        contest_frozen
            && self.unsolved_at_freeze
            && self.has_post_freeze_activity
            && !self.unfrozen_during_scroll
    }

    /// Reveal this problem during a scroll.
    pub fn reveal(&mut self) {
        self.unfrozen_during_scroll = true;
    }

    /// Penalty contributed when solved and visible.
    pub fn penalty(&self) -> i64 {
        PENALTY_PER_WRONG * i64::from(self.wrong_before_accept) + self.first_accepted_time
    }

    pub fn cell(&self, contest_frozen: bool) -> Cell {
        if self.is_visually_frozen(contest_frozen) {
            return Cell::Frozen {
                wrong_at_freeze: self.wrong_at_freeze,
                post_freeze: self.post_freeze_submissions,
            };
        }
        match (self.solved, self.wrong_before_accept) {
            (true, wrong) => Cell::Solved { wrong },
            (false, 0) => Cell::Unattempted,
            (false, wrong) => Cell::Failed { wrong },
        }
    }
}
