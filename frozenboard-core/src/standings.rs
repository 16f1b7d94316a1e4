/// The standings engine.
///
/// Owns every team and problem state for one contest, applies submissions,
/// maintains the freeze epoch and runs the scroll reveal. All calls complete
/// synchronously; a failing call returns before mutating anything.
use crate::constants::MAX_PROBLEMS;
use crate::error::{StandingsError, StandingsResult};
use crate::order::{OrderEntry, TeamOrder};
use crate::problem::ProblemState;
use crate::rank_key::{compare_teams, RankKey};
use crate::types::{
    JudgeStatus, RankChange, RankingQuery, ScoreboardRow, ScrollReport, SubmissionQuery,
    SubmissionRecord, TeamRegistry,
};

#[derive(Debug, Default)]
struct Team {
    /// Sized at START, indexed by problem.
    problems: Vec<ProblemState>,
    /// Append-only, oldest first.
    submissions: Vec<SubmissionRecord>,
}

#[derive(Debug, Default)]
pub struct Standings {
    registry: TeamRegistry,
    teams: Vec<Team>,

    started: bool,
    pub(crate) ended: bool,
    duration: u32,
    problem_count: usize,
    frozen: bool,

    /// Team indices as last published by FLUSH or by the end of a SCROLL.
    last_flushed: Vec<usize>,
}

impl Standings {
    pub fn new() -> Self {
        Standings::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Contest length in minutes as given at START. Informational only.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn problem_count(&self) -> usize {
        self.problem_count
    }

    pub fn team_count(&self) -> usize {
        self.registry.len()
    }

    /// Register a team. Only allowed before START.
    pub fn add_team(&mut self, name: &str) -> StandingsResult<()> {
        if self.started {
            return Err(StandingsError::AlreadyStarted);
        }
        if self.registry.register(name).is_none() {
            return Err(StandingsError::DuplicateTeam(name.to_string()));
        }
        self.teams.push(Team::default());
        // Until the first flush the published order is alphabetical.
        self.last_flushed = self.registry.by_name();
        Ok(())
    }

    /// Fix the problem set and open the contest for submissions.
    pub fn start(&mut self, duration: u32, problem_count: usize) -> StandingsResult<()> {
        if self.started {
            return Err(StandingsError::AlreadyStarted);
        }
        if problem_count > MAX_PROBLEMS {
            return Err(StandingsError::TooManyProblems { count: problem_count });
        }

        self.started = true;
        self.duration = duration;
        self.problem_count = problem_count;
        for team in &mut self.teams {
            team.problems = vec![ProblemState::default(); problem_count];
        }
        self.last_flushed = self.registry.by_name();

        log::info!(
            "contest started: {} teams, {} problems, {} minutes",
            self.teams.len(),
            problem_count,
            duration
        );
        Ok(())
    }

    pub fn submit(
        &mut self,
        problem: usize,
        team_name: &str,
        status: JudgeStatus,
        time: i64,
    ) -> StandingsResult<()> {
        if !self.started {
            return Err(StandingsError::NotStarted);
        }
        let idx = self.team_index(team_name)?;
        if problem >= self.problem_count {
            return Err(StandingsError::ProblemOutOfRange { index: problem, count: self.problem_count });
        }

        let team = &mut self.teams[idx];
        team.submissions.push(SubmissionRecord { problem, status, time });
        team.problems[problem].record(status, time, self.frozen);
        Ok(())
    }

    /// Publish the current visible order as the queryable ranking.
    pub fn flush(&mut self) {
        self.last_flushed = self.compute_order();
    }

    pub fn freeze(&mut self) -> StandingsResult<()> {
        if !self.started {
            return Err(StandingsError::NotStarted);
        }
        if self.frozen {
            return Err(StandingsError::AlreadyFrozen);
        }

        self.frozen = true;
        for team in &mut self.teams {
            for problem in &mut team.problems {
                problem.snapshot_freeze();
            }
        }
        log::info!("scoreboard frozen");
        Ok(())
    }

    /// Reveal every frozen problem, lowest-ranked team first.
    ///
    /// Each step reveals the lowest-indexed frozen problem of the lowest-ranked
    /// team that still has one. Revealing a solved problem re-ranks that team;
    /// if it overtakes anyone, a `RankChange` naming the team now directly
    /// below it is recorded. Ends with the contest unfrozen and flushed.
    pub fn scroll(&mut self) -> StandingsResult<ScrollReport> {
        if !self.frozen {
            return Err(StandingsError::NotFrozen);
        }

        let team_count = self.teams.len();
        let mut keys: Vec<RankKey> = (0..team_count).map(|t| self.rank_key(t)).collect();
        let mut order: TeamOrder = (0..team_count).map(|t| self.entry(t, &keys[t])).collect();
        let before = self.rows(&order.teams());

        let mut pending: TeamOrder = (0..team_count)
            .filter(|&t| self.first_frozen_problem(t).is_some())
            .map(|t| self.entry(t, &keys[t]))
            .collect();

        let mut changes = Vec::new();
        let mut revealed = 0usize;

        while let Some(lowest) = pending.last().cloned() {
            pending.remove(&lowest);
            let team = lowest.team;
            let Some(problem) = self.first_frozen_problem(team) else {
                continue;
            };

            self.teams[team].problems[problem].reveal();
            revealed += 1;
            let solved = self.teams[team].problems[problem].solved;
            log::debug!(
                "revealed problem {} of {} (solved: {})",
                problem,
                lowest.name,
                solved
            );

            if !solved {
                if self.first_frozen_problem(team).is_some() {
                    pending.insert(lowest);
                }
                continue;
            }

            let old_above = order.above(&lowest).cloned();
            order.remove(&lowest);
            keys[team] = self.rank_key(team);
            let current = self.entry(team, &keys[team]);
            order.insert(current.clone());

            let improved = match (old_above.as_ref(), order.above(&current)) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(old), Some(new)) => new < old,
            };
            if improved {
                if let Some(displaced) = order.below(&current) {
                    log::debug!("{} overtakes {}", current.name, displaced.name);
                    changes.push(RankChange {
                        team: current.name.clone(),
                        displaced: displaced.name.clone(),
                        solved: current.key.solved,
                        penalty: current.key.penalty,
                    });
                }
            }

            if self.first_frozen_problem(team).is_some() {
                pending.insert(current);
            }
        }

        let after = self.rows(&order.teams());

        self.frozen = false;
        for team in &mut self.teams {
            for problem in &mut team.problems {
                problem.clear_freeze();
            }
        }
        self.last_flushed = self.compute_order();

        log::info!(
            "scroll finished: {} problems revealed, {} rank changes",
            revealed,
            changes.len()
        );
        Ok(ScrollReport { before, changes, after })
    }

    /// Position of a team in the last flushed order.
    pub fn query_ranking(&self, team_name: &str) -> StandingsResult<RankingQuery> {
        let idx = self.team_index(team_name)?;
        let position = self
            .last_flushed
            .iter()
            .position(|&t| t == idx)
            .expect("every registered team is in the flushed order");
        Ok(RankingQuery {
            team: team_name.to_string(),
            rank: position + 1,
            stale: self.frozen,
        })
    }

    /// Most recent submission of a team matching both filters.
    /// `None` for a filter matches anything.
    pub fn query_submission(
        &self,
        team_name: &str,
        problem: Option<usize>,
        status: Option<JudgeStatus>,
    ) -> StandingsResult<SubmissionQuery> {
        let idx = self.team_index(team_name)?;
        let found = self.teams[idx]
            .submissions
            .iter()
            .rev()
            .find(|s| {
                problem.is_none_or(|p| s.problem == p) && status.is_none_or(|st| s.status == st)
            })
            .copied();
        Ok(SubmissionQuery { team: team_name.to_string(), found })
    }

    /// Mark the contest as over. `Standings::execute` refuses every later command.
    pub fn end(&mut self) {
        self.ended = true;
        log::info!("contest ended");
    }

    /// Team names in the last flushed order.
    pub fn last_flushed_order(&self) -> Vec<&str> {
        self.last_flushed.iter().map(|&t| self.registry.name(t)).collect()
    }

    /// Scoreboard rows for the last flushed order, rendered under present visibility.
    pub fn scoreboard(&self) -> Vec<ScoreboardRow> {
        self.rows(&self.last_flushed)
    }

    /// Current visible rank key of a team.
    pub fn rank_key_of(&self, team_name: &str) -> StandingsResult<RankKey> {
        let idx = self.team_index(team_name)?;
        Ok(self.rank_key(idx))
    }

    pub fn problem_state(&self, team_name: &str, problem: usize) -> Option<&ProblemState> {
        let idx = self.registry.lookup(team_name)?;
        self.teams[idx].problems.get(problem)
    }

    /// True if any problem of any team is currently hidden.
    pub fn has_hidden_problems(&self) -> bool {
        (0..self.teams.len()).any(|t| self.first_frozen_problem(t).is_some())
    }

    fn team_index(&self, team_name: &str) -> StandingsResult<usize> {
        self.registry
            .lookup(team_name)
            .ok_or_else(|| StandingsError::TeamNotFound(team_name.to_string()))
    }

    fn rank_key(&self, team: usize) -> RankKey {
        RankKey::compute(&self.teams[team].problems, self.frozen)
    }

    fn entry(&self, team: usize, key: &RankKey) -> OrderEntry {
        OrderEntry::new(team, self.registry.name(team), key.clone())
    }

    fn first_frozen_problem(&self, team: usize) -> Option<usize> {
        self.teams[team]
            .problems
            .iter()
            .position(|p| p.is_visually_frozen(self.frozen))
    }

    fn compute_order(&self) -> Vec<usize> {
        let keys: Vec<RankKey> = (0..self.teams.len()).map(|t| self.rank_key(t)).collect();
        let mut order: Vec<usize> = (0..self.teams.len()).collect();
        order.sort_by(|&a, &b| {
            compare_teams(&keys[a], self.registry.name(a), &keys[b], self.registry.name(b))
        });
        order
    }

    fn rows(&self, order: &[usize]) -> Vec<ScoreboardRow> {
        order
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let key = self.rank_key(t);
                ScoreboardRow {
                    team: self.registry.name(t).to_string(),
                    rank: i + 1,
                    solved: key.solved,
                    penalty: key.penalty,
                    cells: self.teams[t].problems.iter().map(|p| p.cell(self.frozen)).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Cell;
    use JudgeStatus::*;

    fn contest(teams: &[&str], problems: usize) -> Standings {
        let mut s = Standings::new();
        for name in teams {
            s.add_team(name).unwrap();
        }
        s.start(300, problems).unwrap();
        s
    }

    fn cell(s: &Standings, team: &str, problem: usize) -> Cell {
        s.problem_state(team, problem).unwrap().cell(s.is_frozen())
    }

    #[test]
    fn test_add_team_rules() {
        let mut s = Standings::new();
        s.add_team("b").unwrap();
        assert_eq!(s.add_team("b"), Err(StandingsError::DuplicateTeam("b".into())));
        s.start(10, 2).unwrap();
        let err = s.add_team("c").unwrap_err();
        assert_eq!(err, StandingsError::AlreadyStarted);
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(s.team_count(), 1);
    }

    #[test]
    fn test_start_only_once() {
        let mut s = contest(&["a"], 3);
        assert_eq!(s.start(100, 5), Err(StandingsError::AlreadyStarted));
        assert_eq!(s.problem_count(), 3);
        assert_eq!(s.duration(), 300);
    }

    #[test]
    fn test_start_rejects_more_problems_than_letters() {
        let mut s = Standings::new();
        s.add_team("a").unwrap();
        assert_eq!(s.start(300, 27), Err(StandingsError::TooManyProblems { count: 27 }));
        assert!(!s.is_started());
        assert_eq!(s.problem_count(), 0);

        s.start(300, 26).unwrap();
        assert_eq!(s.problem_count(), 26);
    }

    #[test]
    fn test_initial_order_is_alphabetical() {
        let s = contest(&["zed", "amy", "kim"], 2);
        assert_eq!(s.last_flushed_order(), vec!["amy", "kim", "zed"]);
        assert_eq!(s.query_ranking("zed").unwrap().rank, 3);
    }

    #[test]
    fn test_submit_validation_leaves_state() {
        let mut s = Standings::new();
        s.add_team("a").unwrap();
        assert_eq!(s.submit(0, "a", Accepted, 1), Err(StandingsError::NotStarted));
        s.start(100, 2).unwrap();
        assert_eq!(
            s.submit(0, "nobody", Accepted, 1),
            Err(StandingsError::TeamNotFound("nobody".into()))
        );
        assert_eq!(
            s.submit(2, "a", Accepted, 1),
            Err(StandingsError::ProblemOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(s.query_submission("a", None, None).unwrap().found, None);
    }

    #[test]
    fn test_scenario_single_wrong_then_accept() {
        let mut s = contest(&["T1"], 1);
        s.submit(0, "T1", WrongAnswer, 5).unwrap();
        s.submit(0, "T1", Accepted, 10).unwrap();
        assert_eq!(cell(&s, "T1", 0), Cell::Solved { wrong: 1 });
        let key = s.rank_key_of("T1").unwrap();
        assert_eq!(key.solved, 1);
        assert_eq!(key.penalty, 30);
    }

    #[test]
    fn test_scenario_post_freeze_wrong_is_hidden() {
        let mut s = contest(&["T1", "T2"], 2);
        s.freeze().unwrap();
        s.submit(1, "T2", WrongAnswer, 150).unwrap();
        assert_eq!(cell(&s, "T2", 1), Cell::Frozen { wrong_at_freeze: 0, post_freeze: 1 });

        let mut s = contest(&["T1", "T2"], 2);
        s.submit(1, "T2", WrongAnswer, 100).unwrap();
        s.freeze().unwrap();
        s.submit(1, "T2", WrongAnswer, 150).unwrap();
        assert_eq!(cell(&s, "T2", 1), Cell::Frozen { wrong_at_freeze: 1, post_freeze: 1 });
    }

    #[test]
    fn test_flush_is_lazy() {
        let mut s = contest(&["a", "b"], 1);
        s.submit(0, "b", Accepted, 10).unwrap();
        assert_eq!(s.query_ranking("b").unwrap().rank, 2);
        s.flush();
        assert_eq!(s.query_ranking("b").unwrap().rank, 1);
    }

    #[test]
    fn test_flush_twice_is_identical() {
        let mut s = contest(&["a", "b", "c"], 2);
        s.submit(0, "c", Accepted, 10).unwrap();
        s.submit(1, "a", Accepted, 40).unwrap();
        s.flush();
        let first: Vec<String> = s.last_flushed_order().iter().map(|n| n.to_string()).collect();
        s.flush();
        assert_eq!(s.last_flushed_order(), first);
        assert_eq!(first, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_freeze_twice_fails() {
        let mut s = contest(&["a"], 1);
        s.freeze().unwrap();
        assert_eq!(s.freeze(), Err(StandingsError::AlreadyFrozen));
        assert!(s.is_frozen());
    }

    #[test]
    fn test_scroll_requires_freeze() {
        let mut s = contest(&["a"], 1);
        assert_eq!(s.scroll().unwrap_err(), StandingsError::NotFrozen);
    }

    #[test]
    fn test_frozen_query_is_stale() {
        let mut s = contest(&["a", "b"], 1);
        s.freeze().unwrap();
        s.submit(0, "b", Accepted, 250).unwrap();
        s.flush();
        let q = s.query_ranking("b").unwrap();
        assert!(q.stale);
        assert_eq!(q.rank, 2);
        assert_eq!(
            s.query_ranking("ghost"),
            Err(StandingsError::TeamNotFound("ghost".into()))
        );
    }

    #[test]
    fn test_freeze_then_scroll_without_submissions_is_noop() {
        let mut s = contest(&["a", "b", "c"], 2);
        s.submit(0, "b", Accepted, 10).unwrap();
        s.submit(1, "c", WrongAnswer, 20).unwrap();
        s.flush();
        let board = s.scoreboard();

        s.freeze().unwrap();
        let report = s.scroll().unwrap();
        assert!(report.changes.is_empty());
        assert_eq!(report.before, board);
        assert_eq!(report.after, board);
        assert!(!s.is_frozen());
    }

    #[test]
    fn test_scenario_single_promotion() {
        let mut s = contest(&["T1", "T2", "T3"], 2);
        s.submit(0, "T1", Accepted, 10).unwrap();
        s.submit(0, "T2", Accepted, 30).unwrap();
        s.submit(0, "T3", Accepted, 20).unwrap();
        s.freeze().unwrap();
        // Last place jumps to first; the record names whoever is now second.
        s.submit(1, "T2", Accepted, 200).unwrap();

        let report = s.scroll().unwrap();
        let before: Vec<&str> = report.before.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(before, vec!["T1", "T3", "T2"]);
        assert_eq!(
            report.changes,
            vec![RankChange { team: "T2".into(), displaced: "T1".into(), solved: 2, penalty: 230 }]
        );
        let after: Vec<&str> = report.after.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(after, vec!["T2", "T1", "T3"]);
        assert_eq!(s.last_flushed_order(), vec!["T2", "T1", "T3"]);
    }

    #[test]
    fn test_promotion_past_exactly_one_team() {
        let mut s = contest(&["top", "mid", "low"], 2);
        s.submit(0, "top", Accepted, 10).unwrap();
        s.submit(1, "top", Accepted, 20).unwrap();
        s.submit(0, "mid", Accepted, 50).unwrap();
        s.submit(0, "low", Accepted, 60).unwrap();
        s.freeze().unwrap();
        s.submit(1, "low", Accepted, 100).unwrap();

        let report = s.scroll().unwrap();
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].team, "low");
        assert_eq!(report.changes[0].displaced, "mid");
        assert_eq!(report.changes[0].solved, 2);
        assert_eq!(report.changes[0].penalty, 160);
        let after: Vec<&str> = report.after.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(after, vec!["top", "low", "mid"]);
    }

    #[test]
    fn test_unsolved_reveal_changes_cell_only() {
        let mut s = contest(&["a", "b"], 1);
        s.submit(0, "a", Accepted, 10).unwrap();
        s.freeze().unwrap();
        s.submit(0, "b", WrongAnswer, 200).unwrap();
        s.submit(0, "b", TimeLimitExceed, 210).unwrap();

        let report = s.scroll().unwrap();
        assert!(report.changes.is_empty());
        assert_eq!(report.before[1].cells[0], Cell::Frozen { wrong_at_freeze: 0, post_freeze: 2 });
        assert_eq!(report.after[1].cells[0], Cell::Failed { wrong: 2 });
    }

    #[test]
    fn test_scroll_reveals_everything() {
        let mut s = contest(&["a", "b", "c", "d"], 3);
        s.submit(0, "d", Accepted, 5).unwrap();
        s.freeze().unwrap();
        for (i, team) in ["a", "b", "c"].into_iter().enumerate() {
            for p in 0..3 {
                s.submit(p, team, WrongAnswer, 100 + i as i64).unwrap();
                s.submit(p, team, Accepted, 110 + (i * 3 + p) as i64).unwrap();
            }
        }
        assert!(s.has_hidden_problems());

        let report = s.scroll().unwrap();
        assert!(!s.is_frozen());
        assert!(!s.has_hidden_problems());
        assert_eq!(report.after.len(), 4);
        assert_eq!(report.after[3].team, "d");
        for row in &report.after {
            assert!(row.cells.iter().all(|c| !matches!(c, Cell::Frozen { .. })));
        }
        // Promotions recorded: each of a, b, c climbs above someone at least once.
        assert!(!report.changes.is_empty());
    }

    #[test]
    fn test_query_submission_filters() {
        let mut s = contest(&["a"], 3);
        s.submit(0, "a", WrongAnswer, 1).unwrap();
        s.submit(1, "a", Accepted, 2).unwrap();
        s.submit(0, "a", RuntimeError, 3).unwrap();

        let latest = s.query_submission("a", None, None).unwrap().found.unwrap();
        assert_eq!(latest, SubmissionRecord { problem: 0, status: RuntimeError, time: 3 });

        let wa = s.query_submission("a", Some(0), Some(WrongAnswer)).unwrap().found.unwrap();
        assert_eq!(wa.time, 1);

        let accepted = s.query_submission("a", None, Some(Accepted)).unwrap().found.unwrap();
        assert_eq!(accepted.problem, 1);

        assert_eq!(s.query_submission("a", Some(2), None).unwrap().found, None);
        assert_eq!(s.query_submission("a", Some(1), Some(TimeLimitExceed)).unwrap().found, None);
    }
}
