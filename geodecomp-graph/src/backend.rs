//! Pluggable partitioning backend: `csr -> labels`.
//!
//! spec.md §4.E frames the backend as "an external, pluggable capability"
//! (the original delegates to PT-SCOTCH). We don't carry a SCOTCH
//! dependency; `RecursiveBisectionBackend` is the built-in default,
//! grounded on `nbg_ch/ordering.rs`'s `NdBuilder`: recursively split the
//! vertex set into two balanced halves and recurse until the target
//! number of partitions is reached. The original bisects along the
//! principal axis of node *coordinates*; our graphs carry no geometry, so
//! the projection axis is a breadth-first traversal order over the local
//! CSR instead of a spatial eigenvector — the BFS front plays the same
//! role a coordinate projection does: nearby-in-projection vertices are
//! also nearby in the graph, which is what balances the edge cut.

use std::collections::VecDeque;

use crate::csr::Csr;
use crate::error::PartitionBackendError;

pub trait PartitionBackend: Send + Sync {
    /// Produce `labels[i] in [0, num_partitions)` for each local vertex `i`
    /// in `csr`.
    fn partition(&self, csr: &Csr, num_partitions: usize) -> Result<Vec<usize>, PartitionBackendError>;
}

/// Balance tolerance and leaf-count tunables, mirroring
/// `NdBuilder::new(n_nodes, leaf_threshold, balance_eps)`.
pub struct RecursiveBisectionBackend {
    balance_eps: f32,
}

impl RecursiveBisectionBackend {
    pub fn new(balance_eps: f32) -> Self {
        RecursiveBisectionBackend { balance_eps }
    }
}

impl Default for RecursiveBisectionBackend {
    fn default() -> Self {
        RecursiveBisectionBackend::new(0.05)
    }
}

impl PartitionBackend for RecursiveBisectionBackend {
    fn partition(&self, csr: &Csr, num_partitions: usize) -> Result<Vec<usize>, PartitionBackendError> {
        let n = csr.local_cells();
        if num_partitions == 0 {
            return Err(PartitionBackendError::Failed(
                "num_partitions must be >= 1".to_string(),
            ));
        }

        let mut labels = vec![0usize; n];
        if n > 0 {
            let all: Vec<usize> = (0..n).collect();
            self.recursive_bisect(csr, &all, num_partitions, 0, &mut labels);
        }
        Ok(labels)
    }
}

impl RecursiveBisectionBackend {
    fn recursive_bisect(
        &self,
        csr: &Csr,
        nodes: &[usize],
        num_labels: usize,
        label_base: usize,
        labels: &mut [usize],
    ) {
        if num_labels <= 1 || nodes.len() <= 1 {
            for &node in nodes {
                labels[node] = label_base;
            }
            return;
        }

        let left_labels = num_labels / 2;
        let right_labels = num_labels - left_labels;

        let order = Self::bfs_order(csr, nodes);

        // Proportional split point, nudged by `balance_eps` worth of slack
        // toward an exactly-even cut — the same tradeoff `NdBuilder`'s
        // `balance_eps` encodes, applied to a proportional (not just 50/50)
        // target so partition counts that aren't powers of two stay sized
        // correctly.
        let target_f = nodes.len() as f32 * (left_labels as f32 / num_labels as f32);
        let even_f = nodes.len() as f32 * 0.5;
        let eps = self.balance_eps.clamp(0.0, 0.5);
        let blended = target_f * (1.0 - eps) + even_f * eps;
        let target = (blended.round() as usize).clamp(1, nodes.len() - 1);

        let (left, right) = order.split_at(target);

        self.recursive_bisect(csr, left, left_labels, label_base, labels);
        self.recursive_bisect(csr, right, right_labels, label_base + left_labels, labels);
    }

    /// BFS order over the subgraph induced by `nodes`, starting from
    /// `nodes[0]`; any vertices unreached by that traversal (disconnected
    /// components) are appended in their original order so every vertex
    /// still gets a label.
    fn bfs_order(csr: &Csr, nodes: &[usize]) -> Vec<usize> {
        let in_set: std::collections::HashSet<usize> = nodes.iter().copied().collect();
        let mut visited = std::collections::HashSet::with_capacity(nodes.len());
        let mut order = Vec::with_capacity(nodes.len());
        let mut queue = VecDeque::new();

        queue.push_back(nodes[0]);
        visited.insert(nodes[0]);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &neighbor in csr.neighbors_of_local(node) {
                if in_set.contains(&neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        for &node in nodes {
            if !visited.contains(&node) {
                visited.insert(node);
                order.push(node);
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::HashMapAdjacency;

    #[test]
    fn produces_a_label_per_vertex_within_range() {
        let mut adj = HashMapAdjacency::new();
        for i in 0..9u64 {
            adj.insert_undirected_edge(i, i + 1);
        }
        let csr = Csr::build(&adj, 0, 10);
        let backend = RecursiveBisectionBackend::default();
        let labels = backend.partition(&csr, 4).unwrap();

        assert_eq!(labels.len(), 10);
        assert!(labels.iter().all(|&l| l < 4));
    }

    #[test]
    fn single_partition_assigns_everything_to_label_zero() {
        let mut adj = HashMapAdjacency::new();
        adj.insert_undirected_edge(0, 1);
        let csr = Csr::build(&adj, 0, 2);
        let backend = RecursiveBisectionBackend::default();
        let labels = backend.partition(&csr, 1).unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn rejects_zero_partitions() {
        let csr = Csr::build(&HashMapAdjacency::new(), 0, 1);
        let backend = RecursiveBisectionBackend::default();
        assert!(backend.partition(&csr, 0).is_err());
    }
}
