// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! DAG (Directed Acyclic Graph) builder for task dependencies
//!
//! Builds and validates the dependency graph for a pipeline's tasks,
//! ensuring proper execution order and detecting cycles.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::errors::StackflowError;
use crate::pipeline::task::Task;

/// Builder for task dependency DAGs
pub struct DagBuilder {
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
    name_to_index: HashMap<String, NodeIndex>,
    index_to_name: HashMap<NodeIndex, String>,
}

impl DagBuilder {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: Vec::new(),
            name_to_index: HashMap::new(),
            index_to_name: HashMap::new(),
        }
    }

    /// Build a DAG from an ordered task list
    pub fn build(tasks: &[Task]) -> Result<Self, StackflowError> {
        let mut builder = Self::new();

        // Add all tasks as nodes. Name lookups keep the first registration:
        // duplicate names resolve to the first match.
        for (idx, task) in tasks.iter().enumerate() {
            let node = builder.graph.add_node(idx);
            builder.nodes.push(node);
            builder.name_to_index.entry(task.name.clone()).or_insert(node);
            builder.index_to_name.insert(node, task.name.clone());
        }

        // Add dependency edges
        for (idx, task) in tasks.iter().enumerate() {
            let task_node = builder.nodes[idx];

            for dep in &task.dependencies {
                let dep_node = builder.name_to_index.get(dep.name()).ok_or_else(|| {
                    StackflowError::UnresolvedDependency {
                        task: task.name.clone(),
                        dependency: dep.name().to_string(),
                    }
                })?;

                builder.graph.add_edge(*dep_node, task_node, ());
            }
        }

        // Validate no cycles
        builder.validate_acyclic()?;

        Ok(builder)
    }

    /// Validate that the graph is acyclic
    fn validate_acyclic(&self) -> Result<(), StackflowError> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => {
                let tasks = self.find_cycle_members(cycle.node_id());
                Err(StackflowError::CircularDependency { tasks })
            }
        }
    }

    /// Find all tasks involved in a cycle
    fn find_cycle_members(&self, start: NodeIndex) -> Vec<String> {
        use petgraph::visit::{depth_first_search, DfsEvent};

        let mut in_cycle = vec![self.index_to_name[&start].clone()];
        let mut visited = std::collections::HashSet::new();

        // DFS to find cycle
        depth_first_search(&self.graph, Some(start), |event| {
            if let DfsEvent::Discover(node, _) = event {
                let name = &self.index_to_name[&node];
                if visited.contains(name) {
                    // Found cycle
                    in_cycle.push(name.clone());
                    return petgraph::visit::Control::Break(());
                }
                visited.insert(name.clone());
                in_cycle.push(name.clone());
            }
            petgraph::visit::Control::Continue
        });

        in_cycle
    }

    /// Get topologically sorted task indices
    pub fn topological_order(&self) -> Result<Vec<usize>, StackflowError> {
        toposort(&self.graph, None)
            .map(|nodes| nodes.into_iter().map(|n| self.graph[n]).collect())
            .map_err(|cycle| {
                let tasks = self.find_cycle_members(cycle.node_id());
                StackflowError::CircularDependency { tasks }
            })
    }

    /// Get the dependency names of a task (tasks that must run before it)
    pub fn dependencies(&self, task_name: &str) -> Option<Vec<String>> {
        let node = self.name_to_index.get(task_name)?;
        let deps: Vec<String> = self
            .graph
            .neighbors_directed(*node, petgraph::Direction::Incoming)
            .map(|n| self.index_to_name[&n].clone())
            .collect();
        Some(deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StackflowError;
    use crate::pipeline::task::{FnTask, TaskRef};

    fn make_tasks(tasks: Vec<(&str, Vec<&str>)>) -> Vec<Task> {
        tasks
            .into_iter()
            .map(|(name, deps)| {
                Task::new(
                    name,
                    deps.into_iter().map(TaskRef::from).collect(),
                    FnTask(|_: &[String]| -> Result<String, StackflowError> {
                        Ok(String::new())
                    }),
                )
            })
            .collect()
    }

    fn order_names(tasks: &[Task]) -> Vec<String> {
        let dag = DagBuilder::build(tasks).unwrap();
        dag.topological_order()
            .unwrap()
            .into_iter()
            .map(|idx| tasks[idx].name.clone())
            .collect()
    }

    #[test]
    fn test_linear_dag() {
        let tasks = make_tasks(vec![("a", vec![]), ("b", vec!["a"]), ("c", vec!["b"])]);
        assert_eq!(order_names(&tasks), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_diamond_dag() {
        let tasks = make_tasks(vec![
            ("a", vec![]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("d", vec!["b", "c"]),
        ]);

        let order = order_names(&tasks);

        // a must come first, d must come last
        assert_eq!(order[0], "a");
        assert_eq!(order[3], "d");
        // b and c can be in either order
        assert!(order[1] == "b" || order[1] == "c");
        assert!(order[2] == "b" || order[2] == "c");
    }

    #[test]
    fn test_circular_dependency_detection() {
        let tasks = make_tasks(vec![("a", vec!["b"]), ("b", vec!["a"])]);

        let result = DagBuilder::build(&tasks);
        assert!(matches!(
            result,
            Err(StackflowError::CircularDependency { .. })
        ));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let tasks = make_tasks(vec![("a", vec!["a"])]);

        let result = DagBuilder::build(&tasks);
        assert!(matches!(
            result,
            Err(StackflowError::CircularDependency { .. })
        ));
    }

    #[test]
    fn test_unresolved_dependency() {
        let tasks = make_tasks(vec![("a", vec!["nonexistent"])]);

        let result = DagBuilder::build(&tasks);
        assert!(matches!(
            result,
            Err(StackflowError::UnresolvedDependency { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_match() {
        let tasks = make_tasks(vec![("dup", vec![]), ("dup", vec![]), ("b", vec!["dup"])]);

        let dag = DagBuilder::build(&tasks).unwrap();
        let order = dag.topological_order().unwrap();

        // b's edge points at the first "dup"
        let b_pos = order.iter().position(|&i| i == 2).unwrap();
        let first_dup_pos = order.iter().position(|&i| i == 0).unwrap();
        assert!(first_dup_pos < b_pos);
    }
}
