//! Breadth-first search over directed edges.
//!
//! Neighbours are visited in sorted order, so among several shortest paths the
//! lexicographically smallest one is always returned.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

fn adjacency<T: Ord>(edges: &[(T, T)]) -> BTreeMap<&T, BTreeSet<&T>> {
    let mut neighbours: BTreeMap<&T, BTreeSet<&T>> = BTreeMap::new();
    for (source, target) in edges {
        neighbours.entry(source).or_default().insert(target);
    }
    neighbours
}

/// Shortest path from `start` to `target`, both ends included.
///
/// `start == target` gives the single-vertex path. `None` when `target` is unreachable.
pub fn find_path<T: Ord + Clone>(edges: &[(T, T)], start: &T, target: &T) -> Option<Vec<T>> {
    if start == target {
        return Some(vec![start.clone()]);
    }
    let neighbours = adjacency(edges);
    let mut parents: BTreeMap<&T, &T> = BTreeMap::new();
    let mut seen: BTreeSet<&T> = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(vertex) = queue.pop_front() {
        for &next in neighbours.get(vertex).into_iter().flatten() {
            if !seen.insert(next) {
                continue;
            }
            parents.insert(next, vertex);
            if next == target {
                let mut path = vec![next.clone()];
                let mut cursor = next;
                while let Some(&parent) = parents.get(cursor) {
                    path.push(parent.clone());
                    cursor = parent;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Every vertex reachable from `start`, excluding `start` itself, sorted.
pub fn connected_component<T: Ord + Clone>(edges: &[(T, T)], start: &T) -> Vec<T> {
    let neighbours = adjacency(edges);
    let mut seen: BTreeSet<&T> = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(vertex) = queue.pop_front() {
        for &next in neighbours.get(vertex).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.into_iter()
        .filter(|vertex| *vertex != start)
        .cloned()
        .collect()
}
