//! Structure-of-arrays regression tree.
//!
//! - [`Tree`]: immutable storage used for scoring and persistence
//! - [`MutableTree`]: placeholder-then-fill construction used by the grower
//! - [`TreeValidationError`]: structural defects found by [`Tree::validate`]

use thiserror::Error;

use super::NodeId;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node {node}: {side} child {child} out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} references itself")]
    SelfLoop { node: NodeId },

    /// Reached by more than one path.
    #[error("node {node} reached more than once")]
    DuplicateVisit { node: NodeId },

    #[error("cycle through node {node}")]
    CycleDetected { node: NodeId },

    #[error("node {node} unreachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("node {node} splits on feature {feature}, only {n_features} features")]
    FeatureOutOfBounds {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },

    #[error("node {node}: non-finite {field}")]
    NonFinite { node: NodeId, field: &'static str },
}

// ============================================================================
// Tree
// ============================================================================

/// Immutable regression tree.
///
/// Node `0` is the root. A split node sends a sample left when
/// `value < threshold` and right otherwise, so NaN always goes right.
/// Leaf values already include the learning rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    thresholds: Box<[f64]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f64]>,
    /// Split gain per node, zero on leaves.
    gains: Option<Box<[f64]>>,
    /// Hessian sum reaching each node.
    covers: Option<Box<[f64]>>,
}

impl Tree {
    /// Create a tree from parallel arrays of equal length.
    pub fn new(
        split_indices: Vec<u32>,
        thresholds: Vec<f64>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f64>,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_values.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            thresholds: thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
            gains: None,
            covers: None,
        }
    }

    /// Single-leaf tree.
    pub fn leaf(value: f64) -> Self {
        Self::new(
            vec![0],
            vec![0.0],
            vec![0],
            vec![0],
            vec![true],
            vec![value],
        )
    }

    /// Attach per-node gains and covers.
    pub fn with_stats(mut self, gains: Option<Vec<f64>>, covers: Option<Vec<f64>>) -> Self {
        debug_assert!(gains.as_ref().is_none_or(|g| g.len() == self.n_nodes()));
        debug_assert!(covers.as_ref().is_none_or(|c| c.len() == self.n_nodes()));
        self.gains = gains.map(Vec::into_boxed_slice);
        self.covers = covers.map(Vec::into_boxed_slice);
        self
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn threshold(&self, node: NodeId) -> f64 {
        self.thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    pub fn split_indices(&self) -> &[u32] {
        &self.split_indices
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn left_children(&self) -> &[u32] {
        &self.left_children
    }

    pub fn right_children(&self) -> &[u32] {
        &self.right_children
    }

    pub fn leaf_flags(&self) -> &[bool] {
        &self.is_leaf
    }

    pub fn leaf_values(&self) -> &[f64] {
        &self.leaf_values
    }

    pub fn gains(&self) -> Option<&[f64]> {
        self.gains.as_deref()
    }

    pub fn covers(&self) -> Option<&[f64]> {
        self.covers.as_deref()
    }

    /// Leaf reached by `features`. Missing features count as NaN.
    pub fn leaf_for(&self, features: &[f64]) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let value = features
                .get(self.split_index(node) as usize)
                .copied()
                .unwrap_or(f64::NAN);
            node = if value < self.threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }
        node
    }

    /// Leaf value reached by `features`.
    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.leaf_value(self.leaf_for(features))
    }

    /// Maximum root-to-leaf edge count.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0 as NodeId, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if self.is_leaf(node) {
                max_depth = max_depth.max(depth);
            } else {
                stack.push((self.left_child(node), depth + 1));
                stack.push((self.right_child(node), depth + 1));
            }
        }
        max_depth
    }

    /// Validate structural invariants.
    ///
    /// Every node must be reachable from the root exactly once, children
    /// must be in bounds and never self-referencing, split features must be
    /// below `n_features` and thresholds and leaf values must be finite.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, bool)> = vec![(0, false)];

        while let Some((node, exiting)) = stack.pop() {
            let idx = node as usize;
            if exiting {
                color[idx] = 2;
                continue;
            }
            match color[idx] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[idx] = 1;
            stack.push((node, true));

            if self.is_leaf(node) {
                if !self.leaf_value(node).is_finite() {
                    return Err(TreeValidationError::NonFinite {
                        node,
                        field: "leaf_value",
                    });
                }
                continue;
            }

            let feature = self.split_index(node);
            if feature as usize >= n_features {
                return Err(TreeValidationError::FeatureOutOfBounds {
                    node,
                    feature,
                    n_features,
                });
            }
            if !self.threshold(node).is_finite() {
                return Err(TreeValidationError::NonFinite {
                    node,
                    field: "threshold",
                });
            }

            let left = self.left_child(node);
            let right = self.right_child(node);
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }
            stack.push((right, false));
            stack.push((left, false));
        }

        match color.iter().position(|&c| c == 0) {
            Some(node) => Err(TreeValidationError::UnreachableNode { node: node as NodeId }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// MutableTree
// =============================================================================

/// Tree under construction.
///
/// Nodes are allocated as placeholders and filled in once their split or
/// leaf value is known.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    thresholds: Vec<f64>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f64>,
    gains: Vec<f64>,
    covers: Vec<f64>,
}

impl MutableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset and allocate the root placeholder. Returns the root id (0).
    pub fn init_root(&mut self, cover: f64) -> NodeId {
        self.reset();
        self.allocate_node(cover)
    }

    /// Turn `node` into a numeric split, allocating both children.
    ///
    /// Returns `(left_id, right_id)`.
    pub fn apply_split(
        &mut self,
        node: NodeId,
        feature: u32,
        threshold: f64,
        gain: f64,
        covers: (f64, f64),
    ) -> (NodeId, NodeId) {
        let left = self.allocate_node(covers.0);
        let right = self.allocate_node(covers.1);

        let idx = node as usize;
        self.split_indices[idx] = feature;
        self.thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;
        self.gains[idx] = gain;

        (left, right)
    }

    pub fn make_leaf(&mut self, node: NodeId, value: f64) {
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.leaf_values[idx] = value;
    }

    /// Scale every leaf value by `learning_rate`.
    pub fn apply_learning_rate(&mut self, learning_rate: f64) {
        for (is_leaf, value) in self.is_leaf.iter().zip(self.leaf_values.iter_mut()) {
            if *is_leaf {
                *value *= learning_rate;
            }
        }
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    pub fn reset(&mut self) {
        self.split_indices.clear();
        self.thresholds.clear();
        self.left_children.clear();
        self.right_children.clear();
        self.is_leaf.clear();
        self.leaf_values.clear();
        self.gains.clear();
        self.covers.clear();
    }

    /// Finalize into immutable storage.
    pub fn freeze(self) -> Tree {
        Tree::new(
            self.split_indices,
            self.thresholds,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.leaf_values,
        )
        .with_stats(Some(self.gains), Some(self.covers))
    }

    fn allocate_node(&mut self, cover: f64) -> NodeId {
        let id = self.split_indices.len() as NodeId;
        self.split_indices.push(0);
        self.thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        // Placeholders are leaves until split.
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        self.gains.push(0.0);
        self.covers.push(cover);
        id
    }
}
