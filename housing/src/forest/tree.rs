use ndarray::{ArrayView1, ArrayView2};
use rand::{rngs::StdRng, seq::SliceRandom};

use super::ForestParams;

/// Running count, sum and sum of squares of a set of targets.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    n: usize,
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut m = Self::default();
        values.for_each(|v| m.push(v));
        m
    }

    fn push(&mut self, v: f64) {
        self.n += 1;
        self.sum += v;
        self.sum_sq += v * v;
    }

    fn pop(&mut self, v: f64) {
        self.n -= 1;
        self.sum -= v;
        self.sum_sq -= v * v;
    }

    fn mean(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum / self.n as f64
        }
    }

    /// Sum of squared deviations from the mean.
    fn sse(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        (self.sum_sq - self.sum * self.sum / self.n as f64).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// A CART regression tree stored as a flat arena, root at index 0.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl RegressionTree {
    /// Grows a tree on the rows of `x` listed in `samples`.
    ///
    /// `samples` may repeat rows, which is how bootstrap resamples are passed in.
    pub(super) fn fit(
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        mut samples: Vec<usize>,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = Builder {
            x,
            y,
            params,
            nodes: Vec::new(),
            importances: vec![0.0; x.ncols()],
        };

        builder.grow(&mut samples, 0, rng);

        let total: f64 = builder.importances.iter().sum();
        if total > 0.0 {
            builder.importances.iter_mut().for_each(|v| *v /= total);
        }

        Self {
            nodes: builder.nodes,
            importances: builder.importances,
        }
    }

    /// Routes a feature row down to a leaf.
    ///
    /// # Panics
    /// If `features` is shorter than the number of columns the tree was fitted on.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    /// Normalised impurity decrease per feature, zero everywhere for a single-leaf tree.
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    /// Number of split levels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    fn depth_from(&self, id: usize) -> usize {
        match self.nodes[id] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(left).max(self.depth_from(right))
            }
        }
    }
}

struct Builder<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    params: &'a ForestParams,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl Builder<'_> {
    fn grow(&mut self, samples: &mut [usize], depth: usize, rng: &mut StdRng) -> usize {
        let y = self.y;
        let stats = Moments::of(samples.iter().map(|&i| y[i]));

        let stop = depth >= self.params.max_depth
            || samples.len() < self.params.min_samples_split
            || stats.sse() <= f64::EPSILON;

        let split = if stop {
            None
        } else {
            self.best_split(samples, &stats, rng)
        };

        let Some(split) = split else {
            return self.push(Node::Leaf {
                value: stats.mean(),
            });
        };

        self.importances[split.feature] += split.gain;

        let x = self.x;
        let mid = partition(samples, |i| x[[i, split.feature]] <= split.threshold);

        // Reserved now, patched once both children have ids.
        let id = self.push(Node::Leaf {
            value: stats.mean(),
        });

        let (lo, hi) = samples.split_at_mut(mid);
        let left = self.grow(lo, depth + 1, rng);
        let right = self.grow(hi, depth + 1, rng);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Finds the threshold with the largest squared-error reduction.
    ///
    /// Features are visited in random order until `max_features` non-constant ones have
    /// been scanned. Constant features do not use up the budget.
    fn best_split(&self, samples: &[usize], parent: &Moments, rng: &mut StdRng) -> Option<Split> {
        let (x, y) = (self.x, self.y);
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let min_leaf = self.params.min_samples_leaf.max(1);

        let mut features: Vec<usize> = (0..x.ncols()).collect();
        features.shuffle(rng);

        let mut sorted = samples.to_vec();
        let mut scanned = 0;
        let mut best: Option<Split> = None;

        for feature in features {
            if scanned == self.params.max_features {
                break;
            }

            sorted.sort_unstable_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));
            if x[[sorted[0], feature]] == x[[sorted[n - 1], feature]] {
                continue;
            }
            scanned += 1;

            let mut left = Moments::default();
            let mut right = *parent;

            for k in 0..n - 1 {
                let v = y[sorted[k]];
                left.push(v);
                right.pop(v);

                let here = x[[sorted[k], feature]];
                let next = x[[sorted[k + 1], feature]];
                if here == next || left.n < min_leaf || right.n < min_leaf {
                    continue;
                }

                let gain = parent.sse() - (left.sse() + right.sse());
                if gain > 0.0 && best.map_or(true, |b| gain > b.gain) {
                    best = Some(Split {
                        feature,
                        threshold: midpoint(here, next),
                        gain,
                    });
                }
            }
        }

        best
    }
}

fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a + (b - a) / 2.0;
    // rounding can land on `b`, which would send it left
    if mid >= b {
        a
    } else {
        mid
    }
}

/// Moves every sample for which `goes_left` holds to the front, returns how many moved.
fn partition(samples: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for k in 0..samples.len() {
        if goes_left(samples[k]) {
            samples.swap(mid, k);
            mid += 1;
        }
    }
    mid
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1, Array2};
    use rand::SeedableRng;

    use super::*;

    fn params(max_depth: usize, max_features: usize) -> ForestParams {
        ForestParams {
            n_trees: 1,
            max_depth,
            max_features,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: false,
            seed: 0,
        }
    }

    fn fit(x: &Array2<f64>, y: &Array1<f64>, p: &ForestParams) -> RegressionTree {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = (0..x.nrows()).collect();
        RegressionTree::fit(x.view(), y.view(), samples, p, &mut rng)
    }

    #[test]
    fn step_function_is_learned_exactly() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = array![5.0, 5.0, 5.0, 20.0, 20.0, 20.0];
        let tree = fit(&x, &y, &params(3, 1));

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_one(&[0.0]), 5.0);
        assert_eq!(tree.predict_one(&[6.5]), 5.0);
        assert_eq!(tree.predict_one(&[6.6]), 20.0);
        assert_eq!(tree.importances(), [1.0]);
    }

    #[test]
    fn depth_limit_is_respected() {
        let x = Array2::from_shape_fn((64, 1), |(i, _)| i as f64);
        let y = Array1::from_shape_fn(64, |i| (i * i) as f64);
        let tree = fit(&x, &y, &params(3, 1));

        assert_eq!(tree.depth(), 3);
        assert!(tree.n_leaves() <= 8);
    }

    #[test]
    fn zero_depth_is_a_mean_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 6.0];
        let tree = fit(&x, &y, &params(0, 1));

        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict_one(&[100.0]), 3.0);
        assert_eq!(tree.importances(), [0.0]);
    }

    #[test]
    fn constant_features_do_not_use_the_budget() {
        // only column 2 carries signal, the budget allows a single scanned feature
        let x = array![
            [1.0, 4.0, 0.0],
            [1.0, 4.0, 1.0],
            [1.0, 4.0, 2.0],
            [1.0, 4.0, 3.0]
        ];
        let y = array![0.0, 0.0, 9.0, 9.0];
        let tree = fit(&x, &y, &params(1, 1));

        assert_eq!(tree.predict_one(&[1.0, 4.0, 0.5]), 0.0);
        assert_eq!(tree.predict_one(&[1.0, 4.0, 2.5]), 9.0);
    }

    #[test]
    fn repeated_samples_are_weighted() {
        let x = array![[0.0], [1.0]];
        let y = array![0.0, 4.0];
        let mut rng = StdRng::seed_from_u64(1);
        let samples = vec![0, 0, 0, 1];
        let tree = RegressionTree::fit(x.view(), y.view(), samples, &params(0, 1), &mut rng);

        assert_eq!(tree.predict_one(&[0.0]), 1.0);
    }

    #[test]
    fn midpoint_never_equals_upper_value() {
        assert_eq!(midpoint(1.0, 3.0), 2.0);
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        assert_eq!(midpoint(a, b), a);
    }
}
