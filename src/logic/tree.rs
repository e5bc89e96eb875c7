//! Crop classifier over the four condition features.
//!
//! Fitting and prediction are done by aprender's CART
//! `DecisionTreeClassifier`. This module encodes crop labels to class
//! indices (sorted, so the same data always gives the same encoding) and
//! packs condition rows into aprender matrices.

use crate::error::{GrowWiseError, Result};
use crate::models::FEATURE_COUNT;
use aprender::primitives::Matrix;
use aprender::tree::DecisionTreeClassifier as CartTree;
use serde::Deserialize;

/// Tree growth limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth (root is depth 0). `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
}

/// Shape of a fitted aprender tree, read back from its serde form.
#[derive(Debug, Deserialize)]
struct FittedTree {
    tree: Option<TreeShape>,
}

#[derive(Debug, Deserialize)]
enum TreeShape {
    Node {
        left: Box<TreeShape>,
        right: Box<TreeShape>,
    },
    Leaf {},
}

impl TreeShape {
    fn depth(&self) -> usize {
        match self {
            TreeShape::Leaf {} => 0,
            TreeShape::Node { left, right } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            TreeShape::Leaf {} => 1,
            TreeShape::Node { left, right } => left.n_leaves() + right.n_leaves(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    model: CartTree,
    /// Class labels, sorted. Predicted indices point into this.
    classes: Vec<String>,
    depth: usize,
    n_leaves: usize,
}

impl DecisionTreeClassifier {
    pub fn fit(
        samples: &[[f64; FEATURE_COUNT]],
        labels: &[&str],
        params: &TreeParams,
    ) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(GrowWiseError::InvalidData(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(GrowWiseError::EmptyDataset(
                "cannot fit a tree with zero samples".into(),
            ));
        }

        let mut classes: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        classes.sort();
        classes.dedup();

        let encoded = encode_labels(&classes, labels);
        let x = to_matrix(samples)?;

        let mut model = match params.max_depth {
            Some(depth) => CartTree::new().with_max_depth(depth),
            None => CartTree::new(),
        };
        model
            .fit(&x, &encoded)
            .map_err(|e| GrowWiseError::Model(e.to_string()))?;

        let shape: FittedTree = serde_json::from_value(serde_json::to_value(&model)?)?;
        let (depth, n_leaves) = shape
            .tree
            .map_or((0, 0), |root| (root.depth(), root.n_leaves()));

        Ok(Self {
            model,
            classes,
            depth,
            n_leaves,
        })
    }

    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> &str {
        // A single fixed-width row always forms a valid matrix
        let index = to_matrix(std::slice::from_ref(features))
            .ok()
            .and_then(|x| self.model.predict(&x).first().copied())
            .unwrap_or(0);
        self.classes
            .get(index)
            .or_else(|| self.classes.first())
            .map_or("", String::as_str)
    }

    /// Fraction of samples whose label is predicted correctly.
    pub fn score(&self, samples: &[[f64; FEATURE_COUNT]], labels: &[&str]) -> f64 {
        if samples.is_empty() || samples.len() != labels.len() {
            return 0.0;
        }
        match to_matrix(samples) {
            Ok(x) => f64::from(self.model.score(&x, &encode_labels(&self.classes, labels))),
            Err(_) => 0.0,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }
}

/// Index of each label in the sorted class list. Unknown labels map past the
/// end so they never count as a correct prediction.
fn encode_labels(classes: &[String], labels: &[&str]) -> Vec<usize> {
    labels
        .iter()
        .map(|l| {
            classes
                .binary_search_by(|c| c.as_str().cmp(l))
                .unwrap_or(classes.len())
        })
        .collect()
}

fn to_matrix(rows: &[[f64; FEATURE_COUNT]]) -> Result<Matrix<f32>> {
    let data: Vec<f32> = rows
        .iter()
        .flat_map(|row| row.iter().map(|&v| v as f32))
        .collect();
    Matrix::from_vec(rows.len(), FEATURE_COUNT, data)
        .map_err(|e| GrowWiseError::Model(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<[f64; 4]>, Vec<&'static str>) {
        let samples = vec![
            [20.0, 80.0, 6.0, 220.0],
            [21.0, 82.0, 6.2, 240.0],
            [22.0, 85.0, 6.1, 260.0],
            [30.0, 40.0, 7.0, 60.0],
            [32.0, 45.0, 7.2, 70.0],
            [34.0, 42.0, 7.1, 55.0],
            [18.0, 60.0, 5.0, 150.0],
            [17.0, 62.0, 4.8, 160.0],
        ];
        let labels = vec![
            "rice", "rice", "rice", "cotton", "cotton", "cotton", "tea", "tea",
        ];
        (samples, labels)
    }

    #[test]
    fn labels_encode_in_sorted_order() {
        let classes = vec!["cotton".to_string(), "rice".to_string(), "tea".to_string()];
        assert_eq!(
            encode_labels(&classes, &["tea", "cotton", "rice", "jute"]),
            vec![2, 0, 1, 3]
        );
    }

    #[test]
    fn rows_pack_into_matrix() {
        let x = to_matrix(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]).unwrap();
        assert_eq!(x.shape(), (2, 4));
        assert_eq!(x.get(1, 2), 7.0);
    }

    #[test]
    fn fits_separable_data_perfectly() {
        let (x, y) = separable();
        let tree = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        assert_eq!(tree.score(&x, &y), 1.0);
        assert_eq!(tree.classes(), &["cotton", "rice", "tea"]);
        assert!(tree.n_leaves() >= 3);
        assert!(tree.depth() >= 2);
    }

    #[test]
    fn single_class_is_one_leaf() {
        let x = vec![[20.0, 80.0, 6.0, 200.0], [30.0, 40.0, 7.0, 60.0]];
        let y = vec!["rice", "rice"];
        let tree = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict(&[45.0, 30.0, 8.5, 50.0]), "rice");
    }

    #[test]
    fn max_depth_is_respected() {
        let (x, y) = separable();
        let params = TreeParams { max_depth: Some(1) };
        let tree = DecisionTreeClassifier::fit(&x, &y, &params).unwrap();
        assert!(tree.depth() <= 1);
        assert!(tree.n_leaves() <= 2);
    }

    #[test]
    fn zero_depth_predicts_majority() {
        let x = vec![
            [20.0, 80.0, 6.0, 220.0],
            [21.0, 82.0, 6.2, 240.0],
            [30.0, 40.0, 7.0, 60.0],
        ];
        let y = vec!["rice", "rice", "cotton"];
        let tree = DecisionTreeClassifier::fit(&x, &y, &TreeParams { max_depth: Some(0) }).unwrap();
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict(&[30.0, 40.0, 7.0, 60.0]), "rice");
    }

    #[test]
    fn identical_features_with_conflicting_labels() {
        let x = vec![[25.0, 70.0, 6.5, 150.0]; 3];
        let y = vec!["wheat", "maize", "wheat"];
        let tree = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict(&x[0]), "wheat");
    }

    #[test]
    fn predictions_come_from_label_set() {
        let (x, y) = separable();
        let tree = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        for t in [10.0, 25.0, 45.0] {
            for r in [50.0, 175.0, 300.0] {
                let crop = tree.predict(&[t, 65.0, 6.5, r]);
                assert!(y.iter().any(|l| *l == crop), "unexpected label {}", crop);
            }
        }
    }

    #[test]
    fn refitting_is_deterministic() {
        let (x, y) = separable();
        let a = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        let b = DecisionTreeClassifier::fit(&x, &y, &TreeParams::default()).unwrap();
        for t in (10..=45).step_by(5) {
            for h in (30..=100).step_by(10) {
                let q = [t as f64, h as f64, 6.0, 120.0];
                assert_eq!(a.predict(&q), b.predict(&q));
            }
        }
    }

    #[test]
    fn rejects_empty_and_mismatched_input() {
        let empty: Vec<[f64; 4]> = Vec::new();
        assert!(matches!(
            DecisionTreeClassifier::fit(&empty, &[], &TreeParams::default()),
            Err(GrowWiseError::EmptyDataset(_))
        ));

        let x = vec![[1.0, 2.0, 3.0, 4.0]];
        assert!(matches!(
            DecisionTreeClassifier::fit(&x, &["a", "b"], &TreeParams::default()),
            Err(GrowWiseError::InvalidData(_))
        ));
    }
}
