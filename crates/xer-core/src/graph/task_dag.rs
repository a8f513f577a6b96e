use crate::document::Document;
use crate::records::TaskPredecessor;
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Edge weight: the TASKPRED row behind a link.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskLink {
    pub task_pred_id: Option<i64>,
    /// `PR_FS`, `PR_SS`, `PR_FF` or `PR_SF`.
    pub pred_type: Option<String>,
    pub lag_hr_cnt: Option<f64>,
}

impl From<&TaskPredecessor> for TaskLink {
    fn from(link: &TaskPredecessor) -> Self {
        Self {
            task_pred_id: link.task_pred_id.get(),
            pred_type: link.pred_type.value().cloned(),
            lag_hr_cnt: link.lag_hr_cnt.get(),
        }
    }
}

/// Tasks as nodes, TASKPRED links as edges from predecessor to successor.
#[derive(Debug, Clone)]
pub struct TaskDag {
    pub graph: DiGraph<i64, TaskLink>,
    pub id_to_index: HashMap<i64, NodeIndex>,
}

impl TaskDag {
    /// Links whose ends are not both known tasks are left out.
    pub fn build(doc: &Document) -> Self {
        let mut graph: DiGraph<i64, TaskLink> = DiGraph::new();
        let mut id_to_index: HashMap<i64, NodeIndex> = HashMap::new();

        for task_id in doc.tasks().iter().filter_map(|task| task.task_id.get()) {
            id_to_index
                .entry(task_id)
                .or_insert_with(|| graph.add_node(task_id));
        }

        for link in doc.task_predecessors() {
            let (Some(pred_id), Some(task_id)) = (link.pred_task_id.get(), link.task_id.get())
            else {
                continue;
            };
            if let (Some(&u), Some(&v)) = (id_to_index.get(&pred_id), id_to_index.get(&task_id)) {
                graph.add_edge(u, v, TaskLink::from(link));
            }
        }

        Self { graph, id_to_index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, task_id: i64, direction: Direction) -> Vec<i64> {
        let Some(&node) = self.id_to_index.get(&task_id) else {
            return Vec::new();
        };
        let mut ids: Vec<i64> = self
            .graph
            .neighbors_directed(node, direction)
            .map(|neighbor| self.graph[neighbor])
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn predecessors_of(&self, task_id: i64) -> Vec<i64> {
        self.neighbors(task_id, Direction::Incoming)
    }

    pub fn successors_of(&self, task_id: i64) -> Vec<i64> {
        self.neighbors(task_id, Direction::Outgoing)
    }

    /// Task ids ordered so every predecessor comes before its successors.
    /// `None` when the links contain a cycle.
    pub fn topological_order(&self) -> Option<Vec<i64>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|node| self.graph[node]).collect())
    }

    /// Tasks without a predecessor or without a successor, in id order.
    pub fn tasks_missing_logic(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .graph
            .node_indices()
            .filter(|&node| {
                self.graph
                    .neighbors_directed(node, Direction::Incoming)
                    .next()
                    .is_none()
                    || self
                        .graph
                        .neighbors_directed(node, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .map(|node| self.graph[node])
            .collect();
        ids.sort_unstable();
        ids
    }
}
