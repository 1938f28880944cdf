use crate::error::{Result, RrtError};
use crate::rrt::state::Configuration;
use json::JsonValue;
use num_traits::Float;
use std::collections::{BTreeSet, VecDeque};

/// An undirected graph of configurations.
///
/// Nodes are indexed by insertion order and refer to each other only by index.
/// The adjacency relation is kept symmetric; nodes and edges are never removed.
#[derive(Clone, Debug)]
pub struct Tree<F: Float> {
    nodes: Vec<Configuration<F>>,
    // adjacency[i] holds the indices connected to node i.
    adjacency: Vec<BTreeSet<usize>>,
}

impl<F: Float> Default for Tree<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Tree<F> {
    /// Constructs an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, config: Configuration<F>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(config);
        self.adjacency.push(BTreeSet::new());
        index
    }

    /// Connects nodes `i` and `j`. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.adjacency[i].insert(j);
        self.adjacency[j].insert(i);
        Ok(())
    }

    /// Returns the configuration at index `i`.
    pub fn node_at(&self, i: usize) -> Result<&Configuration<F>> {
        self.check_index(i)?;
        Ok(&self.nodes[i])
    }

    /// Returns the indices connected to node `i`.
    pub fn neighbors(&self, i: usize) -> Result<&BTreeSet<usize>> {
        self.check_index(i)?;
        Ok(&self.adjacency[i])
    }

    pub fn nodes(&self) -> &[Configuration<F>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns the indices reachable from `root`, in breadth-first order.
    pub fn reachable_from(&self, root: usize) -> Result<Vec<usize>> {
        self.check_index(root)?;
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([root]);
        visited[root] = true;
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for &next in &self.adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        Ok(order)
    }

    /// Returns true if every node can be reached from `root` through edges.
    pub fn is_connected_from(&self, root: usize) -> Result<bool> {
        Ok(self.reachable_from(root)?.len() == self.nodes.len())
    }

    /// Serializes the nodes and the edge list (each edge once, `a < b`) to JSON.
    pub fn to_json(&self) -> JsonValue {
        let mut nodes = JsonValue::new_array();
        for node in &self.nodes {
            let values: Vec<f64> = node
                .values()
                .iter()
                .map(|v| v.to_f64().unwrap_or(f64::NAN))
                .collect();
            // Pushing onto a freshly created array cannot fail.
            let _ = nodes.push(values);
        }
        let mut edges = JsonValue::new_array();
        for (a, connected) in self.adjacency.iter().enumerate() {
            for &b in connected.range(a + 1..) {
                let _ = edges.push(json::array![a, b]);
            }
        }
        json::object! {
            nodes: nodes,
            edges: edges,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.nodes.len() {
            return Err(RrtError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> Tree<f64> {
        let mut tree = Tree::new();
        for i in 0..n {
            let index = tree.add_node(Configuration::from([i as f64]));
            if index > 0 {
                tree.add_edge(index - 1, index).unwrap();
            }
        }
        tree
    }

    #[test]
    fn test_add_node_returns_insertion_index() {
        let mut tree = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.add_node(Configuration::from([0.0])), 0);
        assert_eq!(tree.add_node(Configuration::from([1.0])), 1);
        assert_eq!(tree.len(), 2);
        assert!(tree.node_at(1).unwrap().is_equal(&Configuration::from([1.0])));
    }

    #[test]
    fn test_edges_are_symmetric_and_idempotent() {
        let mut tree = chain(3);
        tree.add_edge(0, 2).unwrap();
        tree.add_edge(2, 0).unwrap();
        tree.add_edge(0, 2).unwrap();
        assert_eq!(tree.neighbors(0).unwrap(), &BTreeSet::from([1, 2]));
        assert_eq!(tree.neighbors(2).unwrap(), &BTreeSet::from([0, 1]));
        assert_eq!(tree.edge_count(), 3);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut tree = chain(2);
        let expected = Err(RrtError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(tree.add_edge(0, 2), expected);
        assert_eq!(tree.add_edge(2, 0), expected);
        assert_eq!(tree.node_at(2).map(|_| ()), expected);
        assert_eq!(tree.neighbors(2).map(|_| ()), expected);
        // A failed edge leaves the relation untouched.
        assert_eq!(tree.neighbors(0).unwrap(), &BTreeSet::from([1]));
    }

    #[test]
    fn test_connectivity() {
        let mut tree = chain(4);
        assert!(tree.is_connected_from(0).unwrap());
        assert_eq!(tree.reachable_from(2).unwrap(), vec![2, 1, 3, 0]);
        tree.add_node(Configuration::from([9.0]));
        assert!(!tree.is_connected_from(0).unwrap());
    }

    #[test]
    fn test_to_json() {
        let tree = chain(3);
        let value = tree.to_json();
        assert_eq!(value["nodes"].len(), 3);
        assert_eq!(value["nodes"][2][0].as_f64(), Some(2.0));
        assert_eq!(value["edges"].len(), 2);
        assert_eq!(value["edges"][1][0].as_usize(), Some(1));
        assert_eq!(value["edges"][1][1].as_usize(), Some(2));
    }
}
