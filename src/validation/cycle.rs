//! Dependency Cycle Detection
//!
//! Iterative depth-first search over the `head -> id` graph of a single
//! sentence. Self-loops and repeated edges are kept.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::parser::Sentence;

/// One `head -> dependent` edge of a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleEdge {
    pub head: usize,
    pub dependent: usize,
    pub deprel: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    OnPath,
    Done,
}

struct Frame<'a> {
    node: usize,
    next_edge: usize,
    entered_by: Option<&'a CycleEdge>,
}

/// Find the first cycle of the sentence's dependency graph.
///
/// Edges are added for each word with both a head and a deprel. Nodes are
/// searched in id order (0 first) and edges in word order. Returns the edges
/// of the cycle starting from the node where it closes.
pub fn find_cycle(sentence: &Sentence) -> Option<Vec<CycleEdge>> {
    let mut graph: BTreeMap<usize, Vec<CycleEdge>> = BTreeMap::new();
    let mut nodes = BTreeSet::new();

    for word in &sentence.words {
        let (Some(head), Some(deprel)) = (word.head, word.deprel.as_ref()) else {
            continue;
        };
        nodes.insert(head);
        nodes.insert(word.id);
        graph.entry(head).or_default().push(CycleEdge {
            head,
            dependent: word.id,
            deprel: deprel.clone(),
        });
    }

    let mut marks: HashMap<usize, Mark> = HashMap::new();

    for &start in &nodes {
        if marks.contains_key(&start) {
            continue;
        }

        let mut path: Vec<&CycleEdge> = Vec::new();
        // position in `path` at which each on-path node was entered
        let mut entered_at: HashMap<usize, usize> = HashMap::new();
        let mut stack = vec![Frame {
            node: start,
            next_edge: 0,
            entered_by: None,
        }];
        marks.insert(start, Mark::OnPath);
        entered_at.insert(start, 0);

        while let Some(frame) = stack.last_mut() {
            let edges = graph.get(&frame.node).map(Vec::as_slice).unwrap_or(&[]);

            if let Some(edge) = edges.get(frame.next_edge) {
                frame.next_edge += 1;
                match marks.get(&edge.dependent) {
                    Some(Mark::OnPath) => {
                        let from = entered_at.get(&edge.dependent).copied().unwrap_or(0);
                        let mut cycle: Vec<CycleEdge> =
                            path[from..].iter().map(|e| (*e).clone()).collect();
                        cycle.push(edge.clone());
                        return Some(cycle);
                    }
                    Some(Mark::Done) => {}
                    None => {
                        path.push(edge);
                        marks.insert(edge.dependent, Mark::OnPath);
                        entered_at.insert(edge.dependent, path.len());
                        stack.push(Frame {
                            node: edge.dependent,
                            next_edge: 0,
                            entered_by: Some(edge),
                        });
                    }
                }
            } else {
                let node = frame.node;
                let entered_by = frame.entered_by;
                stack.pop();
                marks.insert(node, Mark::Done);
                entered_at.remove(&node);
                if entered_by.is_some() {
                    path.pop();
                }
            }
        }
    }

    None
}
