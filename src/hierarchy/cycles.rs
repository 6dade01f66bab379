//! Cycle detection over parent links.

use crate::hierarchy::graph::HierarchyGraph;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// Returns a per-node flag marking membership in a parent-pointer cycle.
///
/// Every node has at most one parent, so the depth-first walk from a node is
/// a single path up the parent chain. The walk stops at a node that is done
/// or has no in-input parent; reaching a node still in progress closes a
/// cycle made of that node and everything pushed after it. Each node is
/// pushed once, so the whole pass is O(n).
#[must_use]
pub fn detect_cycles(graph: &HierarchyGraph<'_>) -> Vec<bool> {
    let n = graph.len();
    let mut color = vec![Color::Unvisited; n];
    let mut in_cycle = vec![false; n];
    let mut path: Vec<usize> = Vec::new();
    let mut position = vec![0usize; n];

    for start in 0..n {
        if color[start] != Color::Unvisited {
            continue;
        }

        let mut current = Some(start);
        while let Some(node) = current {
            match color[node] {
                Color::Unvisited => {
                    color[node] = Color::InProgress;
                    position[node] = path.len();
                    path.push(node);
                    current = graph.parent(node);
                }
                Color::InProgress => {
                    for &member in &path[position[node]..] {
                        in_cycle[member] = true;
                    }
                    current = None;
                }
                Color::Done => current = None,
            }
        }

        for node in path.drain(..) {
            color[node] = Color::Done;
        }
    }

    in_cycle
}

/// Returns the input positions of every node on a cycle, in input order.
#[must_use]
pub fn cycle_members(graph: &HierarchyGraph<'_>) -> Vec<usize> {
    detect_cycles(graph)
        .into_iter()
        .enumerate()
        .filter_map(|(i, flagged)| flagged.then_some(i))
        .collect()
}
