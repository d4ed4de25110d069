use scoretree_core::{Dimensions, Score};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

/// A tree node with screen coordinates. Lives for a single render pass.
///
/// `depth_coord` is the horizontal position (grows away from the root) and `breadth_coord` the
/// vertical one (separates siblings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    /// Pre-order index; the root is 0.
    pub index: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub depth_coord: f64,
    pub breadth_coord: f64,
    pub has_children: bool,
    pub name: String,
    pub node_score: Score,
    pub branch_score: Score,
}

impl PositionedNode {
    pub fn point(&self) -> (f64, f64) {
        (self.depth_coord, self.breadth_coord)
    }
}

/// Link from a parent to one of its children. Styling reads the child's branch score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedEdge {
    pub parent: usize,
    pub child: usize,
    pub branch_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    /// Nodes in pre-order.
    pub nodes: Vec<PositionedNode>,
    /// Surface size the layout was fitted to.
    pub dimensions: Dimensions,
    pub breadth_span: f64,
    pub depth_span: f64,
}

impl TreeLayout {
    pub fn node(&self, index: usize) -> Option<&PositionedNode> {
        self.nodes.get(index)
    }

    pub fn root(&self) -> Option<&PositionedNode> {
        self.nodes.first()
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &PositionedNode> + '_ {
        self.nodes
            .iter()
            .filter(move |n| n.parent == Some(index))
    }

    /// One edge per non-root node, in pre-order of the child.
    pub fn edges(&self) -> Vec<PositionedEdge> {
        self.nodes
            .iter()
            .filter_map(|n| {
                n.parent.map(|parent| PositionedEdge {
                    parent,
                    child: n.index,
                    branch_score: n.branch_score,
                })
            })
            .collect()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.nodes.iter().map(PositionedNode::point))
    }
}
