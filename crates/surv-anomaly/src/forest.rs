//! A seeded isolation forest (Liu, Ting, Zhou 2008).
//!
//! Scores follow the sklearn `score_samples` convention: values lie in
//! [-1, 0) and lower means more anomalous, so thresholds and orderings
//! transfer directly from the reference behavior.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use surv_model::Contamination;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Default cap on per-tree subsample size.
pub const DEFAULT_SUBSAMPLE: usize = 256;

#[derive(Debug, Clone)]
pub struct ForestOptions {
    /// Number of trees in the ensemble.
    pub trees: usize,
    /// RNG seed; identical data + options always produce identical scores.
    pub seed: u64,
    /// Upper bound on the per-tree subsample (the classic 256).
    pub max_subsample: usize,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            trees: 100,
            seed: 42,
            max_subsample: DEFAULT_SUBSAMPLE,
        }
    }
}

#[derive(Debug)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

/// An ensemble of isolation trees fitted on one feature matrix.
///
/// Constructed per feature set per country and discarded after scoring.
#[derive(Debug)]
pub struct IsolationForest {
    trees: Vec<Node>,
    normalizer: f64,
}

impl IsolationForest {
    /// Fit on `data`, an n×d matrix with one row per observation.
    ///
    /// Callers guarantee at least one row and a consistent column count.
    pub fn fit(data: &[Vec<f64>], options: &ForestOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let n = data.len();
        let psi = options.max_subsample.min(n).max(1);
        let height_limit = (psi as f64).log2().ceil().max(1.0) as usize;

        let mut trees = Vec::with_capacity(options.trees);
        for _ in 0..options.trees {
            let indices: Vec<usize> = if n <= psi {
                (0..n).collect()
            } else {
                rand::seq::index::sample(&mut rng, n, psi).into_vec()
            };
            trees.push(build_node(&mut rng, data, indices, 0, height_limit));
        }

        Self {
            trees,
            normalizer: average_path_length(psi),
        }
    }

    fn mean_depth(&self, point: &[f64]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, point, 0))
            .sum();
        total / self.trees.len() as f64
    }

    /// Anomaly scores for `data`: -2^(-E[h(x)]/c(ψ)). Lower = more anomalous.
    pub fn score_samples(&self, data: &[Vec<f64>]) -> Vec<f64> {
        data.iter()
            .map(|point| {
                let normalized = if self.normalizer > 0.0 {
                    self.mean_depth(point) / self.normalizer
                } else {
                    1.0
                };
                -2f64.powf(-normalized)
            })
            .collect()
    }
}

fn build_node(
    rng: &mut StdRng,
    data: &[Vec<f64>],
    indices: Vec<usize>,
    depth: usize,
    limit: usize,
) -> Node {
    if depth >= limit || indices.len() <= 1 {
        return Node::Leaf {
            size: indices.len(),
        };
    }
    let dims = data[indices[0]].len();
    let feature = rng.gen_range(0..dims);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &idx in &indices {
        let v = data[idx][feature];
        min = min.min(v);
        max = max.max(v);
    }
    if !(max > min) {
        // No variation along the chosen attribute: the node is unsplittable.
        return Node::Leaf {
            size: indices.len(),
        };
    }
    let threshold = rng.gen_range(min..max);
    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&idx| data[idx][feature] < threshold);
    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(rng, data, left, depth + 1, limit)),
        right: Box::new(build_node(rng, data, right, depth + 1, limit)),
    }
}

fn path_length(node: &Node, point: &[f64], depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if point[*feature] < *threshold {
                path_length(left, point, depth + 1)
            } else {
                path_length(right, point, depth + 1)
            }
        }
    }
}

/// c(n): expected path length of an unsuccessful BST search over n points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let m = n as f64;
            2.0 * ((m - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (m - 1.0) / m
        }
    }
}

/// Binary labels from scores: the `contamination` fraction with the lowest
/// scores is flagged -1 (outlier), everything else +1 (normal). The
/// threshold is the linearly interpolated contamination-quantile of the
/// score distribution, matching the reference predictor.
pub fn label_scores(scores: &[f64], contamination: Contamination) -> Vec<i32> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let threshold = quantile(&sorted, contamination.value());
    scores
        .iter()
        .map(|score| if *score < threshold { -1 } else { 1 })
        .collect()
}

fn quantile(sorted: &[f64], fraction: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = fraction * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    sorted[lo] + (sorted[hi.min(last)] - sorted[lo]) * weight
}
