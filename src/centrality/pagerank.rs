//! PageRank over the undirected, weighted concept graph
//!
//! Power iteration with a fixed iteration count by default; the optional
//! epsilon adds an early exit on L1 delta but never replaces the cap, so the
//! default stays a reproducible baseline.

use crate::config::PageRankSettings;

use super::or_one;

/// Compute normalized PageRank scores for every node.
///
/// `adjacency` is symmetric: `adjacency[i]` lists `(neighbor, edge_weight)`.
/// A neighbor's contribution is its rank times the shared edge weight over
/// its total outgoing weight (1 when it has none). Scores are normalized by
/// the maximum rank.
pub fn scores(adjacency: &[Vec<(usize, f64)>], settings: &PageRankSettings) -> Vec<f64> {
    let n = adjacency.len();
    if n == 0 {
        return Vec::new();
    }

    let n_f64 = n as f64;
    let damping = settings.damping;
    let teleport = (1.0 - damping) / n_f64;

    // Total outgoing weight per node, substituting 1 for isolated nodes
    let out_weights: Vec<f64> = adjacency
        .iter()
        .map(|neighbors| or_one(neighbors.iter().map(|(_, w)| w).sum()))
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];

    for _ in 0..settings.iterations {
        let mut next = vec![0.0; n];
        let mut l1_delta = 0.0;

        for (i, neighbors) in adjacency.iter().enumerate() {
            let incoming: f64 = neighbors
                .iter()
                .map(|&(j, weight)| ranks[j] * weight / out_weights[j])
                .sum();
            next[i] = teleport + damping * incoming;
            l1_delta += (next[i] - ranks[i]).abs();
        }

        ranks = next;

        if let Some(epsilon) = settings.epsilon {
            if l1_delta < epsilon {
                break;
            }
        }
    }

    let max_rank = ranks.iter().cloned().fold(0.0f64, f64::max);
    if max_rank > 0.0 {
        for rank in &mut ranks {
            *rank /= max_rank;
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec<(usize, f64)>> {
        vec![
            vec![(1, 1.0), (2, 1.0)],
            vec![(0, 1.0), (2, 1.0)],
            vec![(0, 1.0), (1, 1.0)],
        ]
    }

    #[test]
    fn test_symmetric_triangle_converges_to_equal_scores() {
        let ranks = scores(&triangle(), &PageRankSettings::default());
        for rank in &ranks {
            assert!((rank - 1.0).abs() < 1e-6, "expected 1.0, got {rank}");
        }
    }

    #[test]
    fn test_empty_graph() {
        let ranks = scores(&[], &PageRankSettings::default());
        assert!(ranks.is_empty());
    }

    #[test]
    fn test_single_isolated_node_normalizes_to_one() {
        let ranks = scores(&[Vec::new()], &PageRankSettings::default());
        assert_eq!(ranks, vec![1.0]);
    }

    #[test]
    fn test_hub_outranks_leaves() {
        // Star: node 0 connected to 1, 2, 3
        let adjacency = vec![
            vec![(1, 1.0), (2, 1.0), (3, 1.0)],
            vec![(0, 1.0)],
            vec![(0, 1.0)],
            vec![(0, 1.0)],
        ];
        let ranks = scores(&adjacency, &PageRankSettings::default());
        assert_eq!(ranks[0], 1.0);
        assert!(ranks[1] < 1.0);
        assert!((ranks[1] - ranks[2]).abs() < 1e-9);
    }

    #[test]
    fn test_epsilon_early_exit_matches_fixed_iterations() {
        let fixed = scores(&triangle(), &PageRankSettings::default());
        let early = scores(
            &triangle(),
            &PageRankSettings {
                epsilon: Some(1e-12),
                ..PageRankSettings::default()
            },
        );
        for (a, b) in fixed.iter().zip(early.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
