/// Rank keys and the team ordering built on them.
///
/// A key summarises only what is currently visible: problems hidden by the
/// freeze contribute nothing. `Ordering::Less` means "ranks higher".
use std::cmp::Ordering;

use crate::problem::ProblemState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankKey {
    pub solved: usize,
    pub penalty: i64,
    /// Accept times of the visible solved problems, largest first.
    pub solve_times_desc: Vec<i64>,
}

impl RankKey {
    /// Build the key from a team's problems under the given visibility.
    pub fn compute(problems: &[ProblemState], contest_frozen: bool) -> Self {
        let mut key = RankKey::default();
        for p in problems {
            if p.is_visually_frozen(contest_frozen) || !p.solved {
                continue;
            }
            key.solved += 1;
            key.penalty += p.penalty();
            key.solve_times_desc.push(p.first_accepted_time);
        }
        key.solve_times_desc.sort_unstable_by(|a, b| b.cmp(a));
        key
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .solved
            .cmp(&self.solved)
            .then_with(|| self.penalty.cmp(&other.penalty))
            .then_with(|| {
                // Equal solved counts always mean equal lengths.
                debug_assert_eq!(
                    self.solve_times_desc.len(),
                    other.solve_times_desc.len(),
                    "solve time lists differ in length for equal solved counts"
                );
                self.solve_times_desc.cmp(&other.solve_times_desc)
            })
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over teams: rank key first, then ascending name.
pub fn compare_teams(a_key: &RankKey, a_name: &str, b_key: &RankKey, b_name: &str) -> Ordering {
    a_key.cmp(b_key).then_with(|| a_name.cmp(b_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JudgeStatus;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn key(solved: usize, penalty: i64, times: &[i64]) -> RankKey {
        RankKey { solved, penalty, solve_times_desc: times.to_vec() }
    }

    #[test]
    fn test_compute_skips_frozen_and_unsolved() {
        let mut problems = vec![ProblemState::default(); 3];
        problems[0].record(JudgeStatus::WrongAnswer, 5, false);
        problems[0].record(JudgeStatus::Accepted, 10, false);
        problems[1].record(JudgeStatus::WrongAnswer, 20, false);
        for p in &mut problems {
            p.snapshot_freeze();
        }
        problems[2].record(JudgeStatus::Accepted, 200, true);

        let frozen = RankKey::compute(&problems, true);
        assert_eq!(frozen, key(1, 30, &[10]));

        let revealed = RankKey::compute(&problems, false);
        assert_eq!(revealed, key(2, 230, &[200, 10]));
    }

    #[test]
    fn test_more_solved_wins() {
        assert_eq!(key(2, 500, &[300, 200]).cmp(&key(1, 10, &[10])), Ordering::Less);
    }

    #[test]
    fn test_lower_penalty_wins() {
        assert_eq!(key(2, 100, &[60, 40]).cmp(&key(2, 120, &[70, 50])), Ordering::Less);
    }

    #[test]
    fn test_solve_times_break_penalty_ties() {
        // Same penalty; the team whose latest solve came earlier wins.
        let a = key(2, 100, &[60, 40]);
        let b = key(2, 100, &[70, 30]);
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_name_is_final_tiebreak() {
        let k = key(1, 10, &[10]);
        assert_eq!(compare_teams(&k, "alpha", &k, "beta"), Ordering::Less);
        assert_eq!(compare_teams(&k, "beta", &k, "alpha"), Ordering::Greater);
        assert_eq!(compare_teams(&k, "alpha", &k, "alpha"), Ordering::Equal);
    }

    #[test]
    fn test_zero_solved_teams_tie_on_key() {
        assert_eq!(RankKey::default().cmp(&RankKey::default()), Ordering::Equal);
    }

    fn random_roster(rng: &mut StdRng, teams: usize) -> Vec<(RankKey, String)> {
        (0..teams)
            .map(|i| {
                let mut problems = vec![ProblemState::default(); 3];
                for p in &mut problems {
                    for _ in 0..rng.random_range(0..3) {
                        p.record(JudgeStatus::WrongAnswer, rng.random_range(0..30), false);
                    }
                    if rng.random_bool(0.6) {
                        p.record(JudgeStatus::Accepted, rng.random_range(0..30), false);
                    }
                }
                (RankKey::compute(&problems, false), format!("team{}", i))
            })
            .collect()
    }

    #[test]
    fn test_comparator_is_strict_total_order_on_random_rosters() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let roster = random_roster(&mut rng, 8);
            let cmp = |a: &(RankKey, String), b: &(RankKey, String)| compare_teams(&a.0, &a.1, &b.0, &b.1);

            for a in &roster {
                assert_eq!(cmp(a, a), Ordering::Equal);
                for b in &roster {
                    assert_eq!(cmp(a, b), cmp(b, a).reverse());
                    if a.1 != b.1 {
                        assert_ne!(cmp(a, b), Ordering::Equal);
                    }
                    for c in &roster {
                        if cmp(a, b) == Ordering::Less && cmp(b, c) == Ordering::Less {
                            assert_eq!(cmp(a, c), Ordering::Less);
                        }
                    }
                }
            }

            let mut forward = roster.clone();
            forward.sort_by(cmp);
            let mut backward = roster.clone();
            backward.reverse();
            backward.sort_by(cmp);
            assert_eq!(forward, backward);
        }
    }
}
