//! 先修关系图
//!
//! 边 `course -> prerequisite` 表示 course 依赖 prerequisite。
//! 新增边 `course -> prereq` 会成环，当且仅当 prereq 沿已有边能到达 course。

use std::collections::{HashMap, HashSet};

use crate::models::catalog::entities::Prerequisite;

pub struct PrerequisiteGraph {
    edges: HashMap<i64, Vec<i64>>,
}

impl PrerequisiteGraph {
    pub fn from_edges(edges: &[Prerequisite]) -> Self {
        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for edge in edges {
            map.entry(edge.course_id)
                .or_default()
                .push(edge.prerequisite_id);
        }
        Self { edges: map }
    }

    pub fn contains_edge(&self, course_id: i64, prerequisite_id: i64) -> bool {
        self.edges
            .get(&course_id)
            .is_some_and(|targets| targets.contains(&prerequisite_id))
    }

    /// 从 `from` 出发沿依赖边能否到达 `to`（迭代 DFS）
    pub fn reaches(&self, from: i64, to: i64) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(next) = self.edges.get(&current) {
                stack.extend(next.iter().copied().filter(|n| !visited.contains(n)));
            }
        }
        false
    }

    pub fn would_create_cycle(&self, course_id: i64, prerequisite_id: i64) -> bool {
        course_id == prerequisite_id || self.reaches(prerequisite_id, course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(i64, i64)]) -> PrerequisiteGraph {
        let edges: Vec<Prerequisite> = edges
            .iter()
            .map(|(c, p)| Prerequisite {
                course_id: *c,
                prerequisite_id: *p,
            })
            .collect();
        PrerequisiteGraph::from_edges(&edges)
    }

    #[test]
    fn test_self_reference_is_cycle() {
        assert!(graph(&[]).would_create_cycle(1, 1));
    }

    #[test]
    fn test_transitive_cycle_detected() {
        // 3 需要 2，2 需要 1；再让 1 需要 3 就成环
        let g = graph(&[(3, 2), (2, 1)]);
        assert!(g.would_create_cycle(1, 3));
        assert!(g.would_create_cycle(1, 2));
        assert!(!g.would_create_cycle(3, 1));
        assert!(!g.would_create_cycle(4, 3));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let g = graph(&[(4, 2), (4, 3), (2, 1), (3, 1)]);
        assert!(!g.would_create_cycle(5, 4));
        assert!(g.would_create_cycle(1, 4));
        assert!(g.contains_edge(4, 3));
        assert!(!g.contains_edge(3, 4));
    }
}
