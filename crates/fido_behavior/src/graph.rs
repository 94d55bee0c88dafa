//! Static directed transition graph over the action vocabulary.
//!
//! Adjacency is declared destination-first (each action lists its legal
//! predecessors), matching the configuration format. Traversal runs over the
//! derived forward edges. The graph is pure: pathfinding never touches
//! emotion state — snapshots are applied by the sequence builder afterwards.

use fido_core::BehaviorConfig;
use std::collections::{BTreeMap, HashSet, VecDeque};

#[derive(Debug, Clone)]
pub struct ActionGraph {
    /// As configured: action -> actions it is reachable from in one step.
    predecessors: BTreeMap<String, Vec<String>>,
    /// Derived: action -> actions reachable from it in one step.
    /// Built in sorted key order, so BFS tie-breaks are deterministic.
    successors: BTreeMap<String, Vec<String>>,
}

impl ActionGraph {
    pub fn new(predecessors: BTreeMap<String, Vec<String>>) -> Self {
        let mut successors: BTreeMap<String, Vec<String>> = predecessors
            .keys()
            .map(|k| (k.clone(), Vec::new()))
            .collect();
        for (to, froms) in &predecessors {
            for from in froms {
                successors.entry(from.clone()).or_default().push(to.clone());
            }
        }
        Self {
            predecessors,
            successors,
        }
    }

    pub fn from_config(config: &BehaviorConfig) -> Self {
        Self::new(config.transitions.clone())
    }

    pub fn contains(&self, action: &str) -> bool {
        self.predecessors.contains_key(action)
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.predecessors.keys().map(String::as_str)
    }

    pub fn predecessors(&self, action: &str) -> &[String] {
        self.predecessors.get(action).map_or(&[], Vec::as_slice)
    }

    pub fn successors(&self, action: &str) -> &[String] {
        self.successors.get(action).map_or(&[], Vec::as_slice)
    }

    /// Breadth-first shortest path from `start` to `end`, both inclusive.
    ///
    /// Returns `None` when `end` is unreachable (or either node is unknown).
    /// Among equal-length paths, the first discovered in successor iteration
    /// order wins.
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        if !self.contains(start) || !self.contains(end) {
            return None;
        }
        if start == end {
            return Some(vec![start.to_string()]);
        }

        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut parent: BTreeMap<&str, &str> = BTreeMap::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.successors(current) {
                let next = next.as_str();
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, current);
                if next == end {
                    // Walk parents back to start.
                    let mut path = vec![next];
                    let mut node = next;
                    while let Some(&p) = parent.get(node) {
                        path.push(p);
                        node = p;
                    }
                    path.reverse();
                    return Some(path.into_iter().map(str::to_string).collect());
                }
                queue.push_back(next);
            }
        }
        None
    }
}
