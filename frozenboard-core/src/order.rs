/// Ordered set of teams used while scrolling.
///
/// Entries carry their own copy of the rank key, so a team whose key changes
/// must be removed with its old entry and reinserted with the new one.
/// Neighbour lookups are O(log n) range queries on the underlying `BTreeSet`.
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use crate::rank_key::{compare_teams, RankKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderEntry {
    pub key: RankKey,
    pub name: String,
    pub team: usize,
}

impl OrderEntry {
    pub fn new(team: usize, name: &str, key: RankKey) -> Self {
        OrderEntry { key, name: name.to_string(), team }
    }
}

impl Ord for OrderEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_teams(&self.key, &self.name, &other.key, &other.name)
            .then_with(|| self.team.cmp(&other.team))
    }
}

impl PartialOrd for OrderEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(crate) struct TeamOrder {
    set: BTreeSet<OrderEntry>,
}

impl TeamOrder {
    pub fn insert(&mut self, entry: OrderEntry) -> bool {
        self.set.insert(entry)
    }

    pub fn remove(&mut self, entry: &OrderEntry) -> bool {
        self.set.remove(entry)
    }

    /// Entry ranked immediately above `entry`.
    pub fn above(&self, entry: &OrderEntry) -> Option<&OrderEntry> {
        self.set.range(..entry).next_back()
    }

    /// Entry ranked immediately below `entry`.
    pub fn below(&self, entry: &OrderEntry) -> Option<&OrderEntry> {
        self.set.range((Excluded(entry), Unbounded)).next()
    }

    /// Lowest-ranked entry.
    pub fn last(&self) -> Option<&OrderEntry> {
        self.set.last()
    }

    /// Team indices from first place down.
    pub fn teams(&self) -> Vec<usize> {
        self.set.iter().map(|e| e.team).collect()
    }
}

impl FromIterator<OrderEntry> for TeamOrder {
    fn from_iter<I: IntoIterator<Item = OrderEntry>>(iter: I) -> Self {
        TeamOrder { set: iter.into_iter().collect() }
    }
}
