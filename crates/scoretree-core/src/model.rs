//! Scored tree input model.
//!
//! Trees arrive as JSON documents shaped like:
//!
//! ```json
//! {
//!   "name": "ROOT",
//!   "node_score": 0.7,
//!   "branch_score": "null",
//!   "children": [{ "name": "Homo sapiens", "node_score": 0.2, "branch_score": 0.8 }]
//! }
//! ```
//!
//! The string `"null"` is the upstream "unscored" marker. It is converted to [`Score::UNSCORED`]
//! during deserialization and never reaches numeric code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The literal string used by upstream tree producers to mean "no score computed".
pub const UNSCORED_SENTINEL: &str = "null";

/// An optional score. `None` means the producer did not compute one.
///
/// The derived `Deserialize` reads the canonical form (a number or `null`); raw producer input
/// with the `"null"` sentinel goes through [`Score::from_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(Option<f64>);

impl Score {
    pub const UNSCORED: Self = Self(None);

    pub fn new(value: f64) -> Self {
        Self(Some(value))
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_scored(self) -> bool {
        self.0.is_some()
    }

    /// Interprets one raw JSON score field.
    ///
    /// Accepted: finite numbers, numeric strings, JSON `null` and the `"null"` sentinel.
    pub fn from_json(value: &Value) -> std::result::Result<Self, ScoreError> {
        match value {
            Value::Null => Ok(Self::UNSCORED),
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Ok(Self::new(v)),
                _ => Err(ScoreError::NonFinite),
            },
            Value::String(s) if s == UNSCORED_SENTINEL => Ok(Self::UNSCORED),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Self::new(v)),
                Ok(_) => Err(ScoreError::NonFinite),
                Err(_) => Err(ScoreError::Invalid(format!(
                    "expected a number or {UNSCORED_SENTINEL:?}, got string {s:?}"
                ))),
            },
            Value::Bool(_) => Err(ScoreError::Invalid("expected a number, got a boolean".into())),
            Value::Array(_) => Err(ScoreError::Invalid("expected a number, got an array".into())),
            Value::Object(_) => Err(ScoreError::Invalid("expected a number, got an object".into())),
        }
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    NonFinite,
    Invalid(String),
}

impl ScoreError {
    fn into_error(self, node: &str, field: &'static str) -> Error {
        match self {
            ScoreError::NonFinite => Error::NonFiniteScore {
                node: node.to_string(),
                field,
            },
            ScoreError::Invalid(message) => Error::InvalidScore {
                node: node.to_string(),
                field,
                message,
            },
        }
    }
}

/// One node of the input tree. Children are owned, so the structure is acyclic by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTreeNode")]
pub struct TreeNode {
    pub name: String,
    pub node_score: Score,
    /// Score of the edge entering this node from its parent. Unscored on the root.
    pub branch_score: Score,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_scores(
        mut self,
        node_score: impl Into<Score>,
        branch_score: impl Into<Score>,
    ) -> Self {
        self.node_score = node_score.into();
        self.branch_score = branch_score.into();
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.walk_pre_order().count()
    }

    /// Depth of the deepest descendant; a lone root has depth 0.
    pub fn max_depth(&self) -> usize {
        self.walk_pre_order().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// Depth-first pre-order traversal yielding `(depth, node)`, children in input order.
    pub fn walk_pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![(0, self)],
        }
    }

    /// Re-checks score invariants for trees assembled in code rather than deserialized.
    pub fn validate(&self) -> Result<()> {
        for (_, node) in self.walk_pre_order() {
            for (field, score) in [
                ("node_score", node.node_score),
                ("branch_score", node.branch_score),
            ] {
                if score.value().is_some_and(|v| !v.is_finite()) {
                    return Err(ScoreError::NonFinite.into_error(&node.name, field));
                }
            }
        }
        Ok(())
    }
}

pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[derive(Debug, Deserialize)]
struct RawTreeNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    node_score: Value,
    #[serde(default)]
    branch_score: Value,
    #[serde(default)]
    children: Option<Vec<RawTreeNode>>,
}

impl TryFrom<RawTreeNode> for TreeNode {
    type Error = Error;

    fn try_from(raw: RawTreeNode) -> Result<Self> {
        let node_score = Score::from_json(&raw.node_score)
            .map_err(|e| e.into_error(&raw.name, "node_score"))?;
        let branch_score = Score::from_json(&raw.branch_score)
            .map_err(|e| e.into_error(&raw.name, "branch_score"))?;
        let children = raw
            .children
            .unwrap_or_default()
            .into_iter()
            .map(TreeNode::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: raw.name,
            node_score,
            branch_score,
            children,
        })
    }
}

/// Pixel size of the drawing surface, as reported by the host's size observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Parses a JSON tree of any nesting depth.
///
/// serde_json's recursion limit is lifted and the stack grows on demand, so deep caterpillar
/// trees are accepted.
pub fn parse_tree_json(text: &str) -> Result<TreeNode> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let raw = RawTreeNode::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    let tree = TreeNode::try_from(raw)?;
    tracing::debug!(nodes = tree.node_count(), depth = tree.max_depth(), "parsed scored tree");
    Ok(tree)
}

pub fn tree_from_value(value: &Value) -> Result<TreeNode> {
    let raw = RawTreeNode::deserialize(value)?;
    TreeNode::try_from(raw)
}
