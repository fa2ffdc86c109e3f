use std::collections::HashMap;

use crate::model::Route;

pub const MSG_PLAYING: &str = "入力して高速道路を完成させよう";
pub const MSG_COMPLETE: &str = "高速道路完成！おめでとう！";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeState {
    pub expected: String,
    pub answer: String,
    pub filled: bool,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Empty,
    Correct,
    Error,
}

impl NodeStatus {
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            NodeStatus::Empty => None,
            NodeStatus::Correct => Some("correct"),
            NodeStatus::Error => Some("error"),
        }
    }
}

/// A road segment between two consecutive nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub open: bool,
}

/// Answer state for the route currently on the board. Build a fresh one
/// whenever the active route changes.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    route_id: String,
    order: Vec<String>,
    nodes: HashMap<String, NodeState>,
}

impl BoardState {
    pub fn new(route: &Route) -> Self {
        let order: Vec<String> = route.nodes.iter().map(|n| n.id.clone()).collect();
        let nodes = route
            .nodes
            .iter()
            .map(|n| {
                (
                    n.id.clone(),
                    NodeState {
                        expected: n.name.clone(),
                        answer: String::new(),
                        filled: false,
                        correct: false,
                    },
                )
            })
            .collect();
        BoardState {
            route_id: route.id.clone(),
            order,
            nodes,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn node(&self, id: &str) -> Option<&NodeState> {
        self.nodes.get(id)
    }

    /// Record the text typed into a node. Unknown ids are ignored.
    pub fn input(&mut self, id: &str, value: &str) -> Option<NodeStatus> {
        let entry = self.nodes.get_mut(id)?;
        let trimmed = value.trim();
        entry.answer = trimmed.to_string();
        entry.filled = !trimmed.is_empty();
        entry.correct = trimmed == entry.expected;
        Some(self.status(id))
    }

    pub fn status(&self, id: &str) -> NodeStatus {
        match self.nodes.get(id) {
            Some(s) if s.correct => NodeStatus::Correct,
            Some(s) if s.filled => NodeStatus::Error,
            _ => NodeStatus::Empty,
        }
    }

    fn is_correct(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|s| s.correct)
    }

    /// Segments in route order; a segment opens once both ends are answered.
    pub fn segments(&self) -> Vec<Segment> {
        self.order
            .windows(2)
            .map(|w| Segment {
                from: w[0].clone(),
                to: w[1].clone(),
                open: self.is_correct(&w[0]) && self.is_correct(&w[1]),
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.values().all(|s| s.correct)
    }

    pub fn message(&self) -> &'static str {
        if self.is_complete() {
            MSG_COMPLETE
        } else {
            MSG_PLAYING
        }
    }

    pub fn correct_count(&self) -> usize {
        self.nodes.values().filter(|s| s.correct).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Fill every node with its expected answer.
    pub fn give_up(&mut self) {
        for s in self.nodes.values_mut() {
            s.answer = s.expected.clone();
            s.filled = true;
            s.correct = true;
        }
    }

    pub fn reset(&mut self) {
        for s in self.nodes.values_mut() {
            s.answer.clear();
            s.filled = false;
            s.correct = false;
        }
    }
}
