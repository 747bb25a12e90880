//! Betweenness centrality, Brandes accumulation over unweighted shortest
//! paths
//!
//! Cost is O(V * (V + E)); the most expensive step in the pipeline for large
//! vocabularies. Unreachable nodes simply contribute nothing.

use std::collections::VecDeque;

use super::safe_div;

/// Compute normalized betweenness scores for every node.
///
/// For each source, a BFS collects distances, path counts (`sigma`) and
/// predecessors; dependencies are then accumulated from the farthest nodes
/// inward. Totals are normalized by the maximum, which is 0 for an edgeless
/// graph.
pub fn scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let mut centrality = vec![0.0; n];

    for source in 0..n {
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut distance = vec![-1i64; n];
        sigma[source] = 1.0;
        distance[source] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in &adjacency[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = order.pop() {
            for &v in &predecessors[w] {
                delta[v] += safe_div(sigma[v], sigma[w]) * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    let max = centrality.iter().cloned().fold(0.0f64, f64::max);
    centrality.iter().map(|&c| safe_div(c, max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_graph_middle_node_dominates() {
        // 0 - 1 - 2: every shortest path between 0 and 2 passes through 1
        let adjacency = vec![vec![1], vec![0, 2], vec![1]];
        let scores = scores(&adjacency);

        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_edgeless_graph_is_all_zero() {
        let adjacency = vec![Vec::new(); 3];
        let scores = scores(&adjacency);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(scores(&[]).is_empty());
    }

    #[test]
    fn test_disconnected_components_do_not_interfere() {
        // Two paths: 0-1-2 and 3-4-5
        let adjacency = vec![vec![1], vec![0, 2], vec![1], vec![4], vec![3, 5], vec![4]];
        let scores = scores(&adjacency);

        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[4], 1.0);
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_split_paths_share_dependency() {
        // Diamond: 0 - {1, 2} - 3; two equal shortest paths 0..3
        let adjacency = vec![vec![1, 2], vec![0, 3], vec![0, 3], vec![1, 2]];
        let scores = scores(&adjacency);

        assert!((scores[1] - scores[2]).abs() < 1e-12);
        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[0], scores[3]);
    }
}
