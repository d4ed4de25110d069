//! Layout engine: turns a [`TreeNode`] into [`PositionedNode`]s inside a pixel budget.
//!
//! Both algorithms work in abstract "separation units" along the breadth axis (1 unit between
//! siblings, 2 between cousins). The units are then fitted into `breadth_scale * height`,
//! insetting the extreme nodes by half a separation, and depth is spread over
//! `depth_scale * width`.

mod bands;
mod tidy;

use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::model::{PositionedNode, TreeLayout};
use scoretree_core::{Dimensions, TreeNode};

pub(crate) struct FlatNode<'a> {
    pub(crate) source: &'a TreeNode,
    pub(crate) parent: Option<usize>,
    pub(crate) depth: usize,
    pub(crate) children: Vec<usize>,
}

/// Pre-order arena view of the input tree.
pub(crate) struct FlatTree<'a> {
    pub(crate) nodes: Vec<FlatNode<'a>>,
}

impl<'a> FlatTree<'a> {
    pub(crate) fn new(root: &'a TreeNode) -> Self {
        let mut nodes: Vec<FlatNode<'a>> = Vec::new();
        let mut stack: Vec<(Option<usize>, usize, &'a TreeNode)> = vec![(None, 0, root)];
        while let Some((parent, depth, source)) = stack.pop() {
            let index = nodes.len();
            if let Some(p) = parent {
                nodes[p].children.push(index);
            }
            nodes.push(FlatNode {
                source,
                parent,
                depth,
                children: Vec::with_capacity(source.children.len()),
            });
            stack.extend(
                source
                    .children
                    .iter()
                    .rev()
                    .map(|child| (Some(index), depth + 1, child)),
            );
        }
        Self { nodes }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_leaf(&self, index: usize) -> bool {
        self.nodes[index].children.is_empty()
    }

    /// 1 between siblings, 2 otherwise (d3's default tree separation).
    pub(crate) fn separation(&self, a: usize, b: usize) -> f64 {
        if self.nodes[a].parent == self.nodes[b].parent {
            1.0
        } else {
            2.0
        }
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

pub fn layout_tree(tree: &TreeNode, dimensions: Dimensions, config: &LayoutConfig) -> TreeLayout {
    let flat = FlatTree::new(tree);
    let units = match config.algorithm {
        LayoutAlgorithm::Bands => bands::breadth_units(&flat),
        LayoutAlgorithm::Tidy => tidy::breadth_units(&flat),
    };

    let breadth_span = config.breadth_scale * dimensions.height;
    let depth_span = config.depth_scale * dimensions.width;

    // Same extreme-node selection as d3: the first node (pre-order) holding the min/max.
    let mut left = 0;
    let mut right = 0;
    for (i, &x) in units.iter().enumerate() {
        if x < units[left] {
            left = i;
        }
        if x > units[right] {
            right = i;
        }
    }
    let inset = if left == right {
        1.0
    } else {
        flat.separation(left, right) / 2.0
    };
    let tx = inset - units[left];
    let kx = breadth_span / (units[right] + inset + tx);
    let ky = depth_span / flat.max_depth().max(1) as f64;

    let nodes = flat
        .nodes
        .iter()
        .enumerate()
        .map(|(index, n)| PositionedNode {
            index,
            parent: n.parent,
            depth: n.depth,
            depth_coord: n.depth as f64 * ky,
            breadth_coord: (units[index] + tx) * kx,
            has_children: !n.children.is_empty(),
            name: n.source.name.clone(),
            node_score: n.source.node_score,
            branch_score: n.source.branch_score,
        })
        .collect();

    tracing::debug!(
        algorithm = ?config.algorithm,
        nodes = flat.len(),
        breadth_span,
        depth_span,
        "tree layout computed"
    );

    TreeLayout {
        nodes,
        dimensions,
        breadth_span,
        depth_span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::leaf("ROOT").with_children([
            TreeNode::leaf("A").with_children([TreeNode::leaf("a1"), TreeNode::leaf("a2")]),
            TreeNode::leaf("b"),
        ])
    }

    #[test]
    fn flat_tree_is_pre_order_with_ordered_children() {
        let tree = sample();
        let flat = FlatTree::new(&tree);
        let names: Vec<&str> = flat.nodes.iter().map(|n| n.source.name.as_str()).collect();
        assert_eq!(names, vec!["ROOT", "A", "a1", "a2", "b"]);
        assert_eq!(flat.nodes[0].children, vec![1, 4]);
        assert_eq!(flat.nodes[1].children, vec![2, 3]);
        assert_eq!(flat.nodes[4].parent, Some(0));
        assert_eq!(flat.max_depth(), 2);
        assert_eq!(flat.separation(2, 3), 1.0);
        assert_eq!(flat.separation(3, 4), 2.0);
    }

    #[test]
    fn single_node_sits_at_band_center() {
        let tree = TreeNode::leaf("solo");
        for algorithm in [LayoutAlgorithm::Bands, LayoutAlgorithm::Tidy] {
            let cfg = LayoutConfig {
                algorithm,
                ..Default::default()
            };
            let layout = layout_tree(&tree, Dimensions::new(100.0, 50.0), &cfg);
            let root = layout.root().unwrap();
            assert_eq!(root.breadth_coord, 100.0);
            assert_eq!(root.depth_coord, 0.0);
        }
    }

    #[test]
    fn spans_follow_dimensions() {
        let layout = layout_tree(
            &sample(),
            Dimensions::new(1000.0, 200.0),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.breadth_span, 800.0);
        assert_eq!(layout.depth_span, 900.0);
        let bounds = layout.bounds().unwrap();
        assert!((bounds.max_x - 900.0).abs() < 1e-9);
        assert!(bounds.min_y > 0.0 && bounds.max_y < 800.0);
    }
}
