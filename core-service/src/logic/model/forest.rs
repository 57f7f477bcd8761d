//! Random Forest - native port of an exported tree ensemble
//!
//! Trees use the parallel node arrays of the usual tree export: node `i`
//! splits on `feature[i]` at `threshold[i]`, goes to `children_left[i]` when
//! `x[feature] <= threshold` and to `children_right[i]` otherwise. Leaves have
//! `children_left[i] == -1` and carry class weights in `value[i]`.

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::classifier::{default_classes, Classifier};
use super::error::{PipelineError, Stage};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Class weights per node: `[negative, positive]`
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Children must point forward, which also rules out cycles
    fn check(&self) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("node arrays differ in length (expected {})", n));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {} has only one child ({}, {})", i, left, right));
                }
                let weights = self.value[i];
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights[0] + weights[1] <= 0.0 {
                    return Err(format!("leaf {} has unusable class weights {:?}", i, weights));
                }
                continue;
            }
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-order child {}", i, child));
                }
            }
            let feature = self.feature[i];
            if feature < 0 || feature >= FEATURE_COUNT as i64 {
                return Err(format!("node {} splits on feature {}, layout has {}", i, feature, FEATURE_COUNT));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {} has a non-finite threshold", i));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `x`
    fn leaf_distribution(&self, x: &[f64]) -> Result<[f64; 2], PipelineError> {
        let n = self.node_count();
        let mut node = 0usize;

        // every step moves forward, so n steps is enough to reach a leaf
        for _ in 0..n {
            let left = *self.children_left.get(node).ok_or_else(|| corrupt(node))?;
            let right = *self.children_right.get(node).ok_or_else(|| corrupt(node))?;
            if left == LEAF && right == LEAF {
                let [neg, pos] = *self.value.get(node).ok_or_else(|| corrupt(node))?;
                let total = neg + pos;
                return Ok([neg / total, pos / total]);
            }

            let feature = self
                .feature
                .get(node)
                .and_then(|f| usize::try_from(*f).ok())
                .ok_or_else(|| corrupt(node))?;
            let value = *x.get(feature).ok_or(PipelineError::DimensionMismatch {
                stage: Stage::Predict,
                expected: feature + 1,
                actual: x.len(),
            })?;
            let threshold = *self.threshold.get(node).ok_or_else(|| corrupt(node))?;

            let next = if value <= threshold { left } else { right };
            node = usize::try_from(next).map_err(|_| corrupt(node))?;
        }

        Err(corrupt(node))
    }
}

fn corrupt(node: usize) -> PipelineError {
    PipelineError::Model(format!("tree walk left the tree at node {}", node))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

impl RandomForest {
    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check().map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    /// Mean class distribution over all trees
    pub fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2], PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::Model("forest has no trees".to_string()));
        }

        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let [neg, pos] = tree.leaf_distribution(vector.as_slice())?;
            sum[0] += neg;
            sum[1] += pos;
        }

        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

impl Classifier for RandomForest {
    fn predict(&self, vector: &FeatureVector) -> Result<i64, PipelineError> {
        let [neg, pos] = self.predict_proba(vector)?;
        // ties go to the first class
        Ok(if pos > neg { self.classes[1] } else { self.classes[0] })
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on age (feature 0) at 55, then on ca (feature 11) at 0.5
    fn tree() -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, 3, -1, -1],
            children_right: vec![2, -1, 4, -1, -1],
            feature: vec![0, -2, 11, -2, -2],
            threshold: vec![55.0, -2.0, 0.5, -2.0, -2.0],
            value: vec![[50.0, 50.0], [30.0, 10.0], [20.0, 40.0], [15.0, 5.0], [5.0, 35.0]],
        }
    }

    fn vector(age: f64, ca: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = age;
        values[11] = ca;
        FeatureVector::from(values)
    }

    #[test]
    fn test_single_tree_paths() {
        let forest = RandomForest { trees: vec![tree()], classes: [0, 1] };
        assert!(forest.check().is_ok());

        assert_eq!(forest.predict(&vector(40.0, 3.0)).unwrap(), 0);
        assert_eq!(forest.predict(&vector(55.0, 3.0)).unwrap(), 0);
        assert_eq!(forest.predict(&vector(60.0, 0.0)).unwrap(), 0);
        assert_eq!(forest.predict(&vector(60.0, 2.0)).unwrap(), 1);
    }

    #[test]
    fn test_forest_averages_trees() {
        let always_negative = DecisionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![[9.0, 1.0]],
        };
        let forest = RandomForest { trees: vec![tree(), always_negative], classes: [0, 1] };

        // (0.125 + 0.9) / 2 vs (0.875 + 0.1) / 2
        let proba = forest.predict_proba(&vector(60.0, 2.0)).unwrap();
        assert!((proba[0] - 0.5125).abs() < 1e-12);
        assert_eq!(forest.predict(&vector(60.0, 2.0)).unwrap(), 0);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let even = DecisionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![[1.0, 1.0]],
        };
        let forest = RandomForest { trees: vec![even], classes: [0, 1] };
        assert_eq!(forest.predict(&FeatureVector::new()).unwrap(), 0);
    }

    #[test]
    fn test_check_rejects_backward_child() {
        let mut bad = tree();
        bad.children_left[0] = 0;

        let forest = RandomForest { trees: vec![bad], classes: [0, 1] };
        assert!(forest.check().unwrap_err().contains("tree 0"));
    }

    #[test]
    fn test_check_rejects_half_leaf() {
        let mut bad = tree();
        // node 1 keeps a right child but drops the left one
        bad.children_right[1] = 3;

        let err = bad.check().unwrap_err();
        assert!(err.contains("node 1 has only one child"), "{}", err);

        let forest = RandomForest { trees: vec![bad], classes: [0, 1] };
        assert!(forest.check().is_err());
    }

    #[test]
    fn test_half_leaf_is_not_walked_as_leaf() {
        let mut bad = tree();
        bad.children_right[1] = 3;

        // age <= 55 reaches node 1, which is neither a leaf nor a split
        let err = bad.leaf_distribution(vector(40.0, 0.0).as_slice()).unwrap_err();
        assert!(matches!(err, PipelineError::Model(_)));
    }

    #[test]
    fn test_check_rejects_unknown_feature() {
        let mut bad = tree();
        bad.feature[0] = 13;
        assert!(bad.check().unwrap_err().contains("feature 13"));
    }

    #[test]
    fn test_check_rejects_empty_forest() {
        let forest = RandomForest { trees: vec![], classes: [0, 1] };
        assert!(forest.check().is_err());
        assert!(forest.predict(&FeatureVector::new()).is_err());
    }
}
