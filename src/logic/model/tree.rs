//! CART Decision Tree
//!
//! Gini-impurity classification tree. Leaves store the class frequency
//! distribution of the training samples that reached them.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::labels::CLASS_COUNT;
use crate::logic::config::ForestConfig;
use crate::logic::features::{Feature, FEATURE_COUNT};

/// Tree node; children are indices into the tree's node list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go left when `value <= threshold`
    Split {
        feature: Feature,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: [f64; CLASS_COUNT],
        samples: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

/// Chosen split at a node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
}

impl DecisionTree {
    /// Grow a tree over `indices` (may contain duplicates from bootstrapping)
    pub fn fit(
        x: &[[f64; FEATURE_COUNT]],
        y: &[usize],
        mut indices: Vec<usize>,
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let max_features = config
            .max_features
            .unwrap_or_else(|| (FEATURE_COUNT as f64).sqrt() as usize)
            .clamp(1, FEATURE_COUNT);

        let mut builder = TreeBuilder {
            x,
            y,
            config,
            max_features,
            nodes: Vec::new(),
        };
        builder.build(&mut indices, 0, rng);

        Self { nodes: builder.nodes }
    }

    /// Leaf distribution reached by `x`
    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> &[f64; CLASS_COUNT] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                TreeNode::Split { feature, threshold, left, right } => {
                    id = if x[feature.index()] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { distribution, .. } => return distribution,
            }
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf path (root only = 0)
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], id: usize) -> usize {
            match &nodes[id] {
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
                TreeNode::Leaf { .. } => 0,
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    /// Structural check for trees read from disk.
    ///
    /// Nodes are stored parent-first, so every child index must be greater
    /// than its parent's and inside the node list. Leaves must hold a
    /// probability distribution.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".into());
        }

        let len = self.nodes.len();
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { threshold, left, right, .. } => {
                    if !threshold.is_finite() {
                        return Err(format!("node {}: non-finite threshold", id));
                    }
                    for &child in [left, right] {
                        if child <= id || child >= len {
                            return Err(format!("node {}: child index {} out of range", id, child));
                        }
                    }
                }
                TreeNode::Leaf { distribution, .. } => {
                    let valid = distribution.iter().all(|p| p.is_finite() && *p >= 0.0);
                    let sum: f64 = distribution.iter().sum();
                    if !valid || (sum - 1.0).abs() > 1e-6 {
                        return Err(format!("node {}: leaf distribution sums to {}", id, sum));
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

struct TreeBuilder<'a> {
    x: &'a [[f64; FEATURE_COUNT]],
    y: &'a [usize],
    config: &'a ForestConfig,
    max_features: usize,
    nodes: Vec<TreeNode>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, indices: &mut [usize], depth: usize, rng: &mut StdRng) -> usize {
        let n = indices.len();
        let counts = self.class_counts(indices);

        let node_id = self.nodes.len();
        self.nodes.push(leaf(&counts, n));

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure
            || depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || n < 2 * self.config.min_samples_leaf
        {
            return node_id;
        }

        let Some(split) = self.best_split(indices, &counts, rng) else {
            return node_id;
        };

        // Partition: left = value <= threshold
        let mut mid = 0;
        for i in 0..n {
            if self.x[indices[i]][split.feature] <= split.threshold {
                indices.swap(i, mid);
                mid += 1;
            }
        }

        let (left_idx, right_idx) = indices.split_at_mut(mid);
        let left = self.build(left_idx, depth + 1, rng);
        let right = self.build(right_idx, depth + 1, rng);

        self.nodes[node_id] = TreeNode::Split {
            feature: Feature::ALL[split.feature],
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }

    fn class_counts(&self, indices: &[usize]) -> [usize; CLASS_COUNT] {
        let mut counts = [0usize; CLASS_COUNT];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    /// Lowest weighted Gini over a random feature subset; None if no split improves
    fn best_split(
        &self,
        indices: &[usize],
        parent: &[usize; CLASS_COUNT],
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf;
        let candidates = rand::seq::index::sample(rng, FEATURE_COUNT, self.max_features);

        let mut best: Option<SplitCandidate> = None;
        let mut best_impurity = n as f64 * gini(parent, n);
        let mut sorted = indices.to_vec();

        for feature in candidates.iter() {
            let x = self.x;
            sorted.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

            let mut left = [0usize; CLASS_COUNT];
            let mut right = *parent;

            for pos in 0..n - 1 {
                let class = self.y[sorted[pos]];
                left[class] += 1;
                right[class] -= 1;

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let value = x[sorted[pos]][feature];
                let next = x[sorted[pos + 1]][feature];
                if value == next {
                    continue;
                }

                let impurity = n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);
                if impurity < best_impurity - 1e-12 {
                    let mut threshold = (value + next) / 2.0;
                    if threshold >= next {
                        threshold = value;
                    }
                    best_impurity = impurity;
                    best = Some(SplitCandidate { feature, threshold });
                }
            }
        }

        best
    }
}

fn leaf(counts: &[usize; CLASS_COUNT], n: usize) -> TreeNode {
    let mut distribution = [0.0; CLASS_COUNT];
    if n > 0 {
        for (p, &c) in distribution.iter_mut().zip(counts.iter()) {
            *p = c as f64 / n as f64;
        }
    }
    TreeNode::Leaf { distribution, samples: n }
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize; CLASS_COUNT], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn row(temperature: f64, rash: f64) -> [f64; FEATURE_COUNT] {
        let mut r = [0.0; FEATURE_COUNT];
        r[Feature::Temperature.index()] = temperature;
        r[Feature::Rash.index()] = rash;
        r[Feature::PlateletCount.index()] = 250.0;
        r
    }

    fn all_features() -> ForestConfig {
        ForestConfig {
            max_features: Some(FEATURE_COUNT),
            min_samples_split: 2,
            min_samples_leaf: 1,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0, 0, 0, 0], 4), 0.0);
        assert!((gini(&[2, 2, 0, 0, 0], 4) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0; CLASS_COUNT], 0), 0.0);
    }

    #[test]
    fn test_separable_data_learned() {
        // class 0 when temperature > 39, else class 3
        let x: Vec<_> = (0..40).map(|i| row(37.0 + i as f64 * 0.1, 0.0)).collect();
        let y: Vec<usize> = x.iter().map(|r| if r[0] > 39.0 { 0 } else { 3 }).collect();

        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&x, &y, (0..40).collect(), &all_features(), &mut rng);

        assert!(tree.validate().is_ok());
        assert_eq!(tree.predict(&row(40.5, 0.0))[0], 1.0);
        assert_eq!(tree.predict(&row(37.2, 0.0))[3], 1.0);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let x = vec![row(38.0, 1.0); 10];
        let y = vec![2; 10];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&x, &y, (0..10).collect(), &all_features(), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&row(41.0, 0.0)), &[0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_max_depth_respected() {
        let x: Vec<_> = (0..64).map(|i| row(36.0 + i as f64 * 0.09, (i % 2) as f64)).collect();
        let y: Vec<usize> = (0..64).map(|i| (i / 3) % CLASS_COUNT).collect();
        let config = ForestConfig { max_depth: 3, ..all_features() };

        let mut rng = StdRng::seed_from_u64(9);
        let tree = DecisionTree::fit(&x, &y, (0..64).collect(), &config, &mut rng);
        assert!(tree.depth() <= 3);
    }

    #[test]
    fn test_leaf_distributions_sum_to_one() {
        let x: Vec<_> = (0..30).map(|i| row(36.0 + i as f64 * 0.2, (i % 3 == 0) as u8 as f64)).collect();
        let y: Vec<usize> = (0..30).map(|i| i % CLASS_COUNT).collect();
        let mut rng = StdRng::seed_from_u64(5);
        let tree = DecisionTree::fit(&x, &y, (0..30).collect(), &ForestConfig::default(), &mut rng);

        for node in tree.nodes() {
            if let TreeNode::Leaf { distribution, .. } = node {
                assert!((distribution.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_links() {
        let leaf = TreeNode::Leaf { distribution: [1.0, 0.0, 0.0, 0.0, 0.0], samples: 3 };
        let split = |left, right| TreeNode::Split {
            feature: Feature::Temperature,
            threshold: 39.0,
            left,
            right,
        };

        let ok = DecisionTree { nodes: vec![split(1, 2), leaf.clone(), leaf.clone()] };
        assert!(ok.validate().is_ok());

        let dangling = DecisionTree { nodes: vec![split(1, 999_999), leaf.clone(), leaf.clone()] };
        assert!(dangling.validate().is_err());

        let self_link = DecisionTree { nodes: vec![split(0, 2), leaf.clone(), leaf.clone()] };
        assert!(self_link.validate().is_err());

        assert!(DecisionTree { nodes: Vec::new() }.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_leaf() {
        let tree = DecisionTree {
            nodes: vec![TreeNode::Leaf { distribution: [0.7, 0.7, 0.0, 0.0, 0.0], samples: 2 }],
        };
        assert!(tree.validate().is_err());

        let negative = DecisionTree {
            nodes: vec![TreeNode::Leaf { distribution: [1.5, -0.5, 0.0, 0.0, 0.0], samples: 2 }],
        };
        assert!(negative.validate().is_err());
    }
}
