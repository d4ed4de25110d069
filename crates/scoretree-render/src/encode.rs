//! Score-to-visual-channel mapping. Every function here is pure and independent of any surface.

use crate::config::{EdgeConfig, LabelConfig, NodeConfig};
use crate::model::PositionedNode;
use crate::scene::{Paint, TextAnchor};
use scoretree_core::Score;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: String,
    /// Dash length; `0` draws a solid stroke.
    pub dash: f64,
    pub opacity: f64,
    pub stroke_width: f64,
}

impl EdgeStyle {
    pub fn is_dashed(&self) -> bool {
        self.dash > 0.0
    }
}

/// Maps the branch score of an edge's child node to its stroke.
///
/// | score | color | dash | opacity |
/// |---|---|---|---|
/// | unscored | unscored color | `unscored_dash` | `unscored_opacity` |
/// | `> 0` | positive color | solid | `max(|s|, min_opacity)` |
/// | `<= 0` | negative color | solid | `max(|s|, min_opacity)` |
pub fn score_to_edge_style(score: Score, cfg: &EdgeConfig) -> EdgeStyle {
    let Some(s) = score.value() else {
        return EdgeStyle {
            color: cfg.unscored_color.clone(),
            dash: cfg.unscored_dash,
            opacity: cfg.unscored_opacity,
            stroke_width: cfg.stroke_width,
        };
    };

    let color = if s > 0.0 {
        &cfg.positive_color
    } else {
        &cfg.negative_color
    };
    let magnitude = s.abs();
    let opacity = if magnitude < cfg.min_opacity {
        cfg.min_opacity
    } else {
        magnitude
    };

    EdgeStyle {
        color: color.clone(),
        dash: 0.0,
        opacity,
        stroke_width: cfg.stroke_width,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub fill: Paint,
    pub radius: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

impl NodeStyle {
    pub fn is_visible(&self) -> bool {
        self.radius > 0.0
    }
}

/// Maps a node score to the circle drawn for it.
///
/// Below `hollow_below` the circle is hollow; above `hide_above` it collapses to radius 0. An
/// unscored node fails both comparisons and is drawn solid and visible.
pub fn score_to_node_style(score: Score, cfg: &NodeConfig) -> NodeStyle {
    let hollow = score.value().is_some_and(|s| s < cfg.hollow_below);
    let hidden = score.value().is_some_and(|s| s > cfg.hide_above);

    NodeStyle {
        fill: if hollow {
            Paint::Transparent
        } else {
            Paint::Color(cfg.fill.clone())
        },
        radius: if hidden { 0.0 } else { cfg.radius },
        stroke: cfg.stroke.clone(),
        stroke_width: cfg.stroke_width,
    }
}

/// All-caps names mark synthetic internal nodes and get no label.
///
/// A name counts as all-caps when upper-casing leaves it unchanged, which includes names without
/// any cased letters (`"42"`, `""`).
pub fn label_text(name: &str) -> &str {
    if name.to_uppercase() == name {
        ""
    } else {
        name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub x: f64,
    pub y: f64,
    pub dy_em: f64,
    pub anchor: TextAnchor,
    pub font_size: f64,
}

/// Interior nodes get their label to the left, right-aligned; leaves to the right, left-aligned.
pub fn label_placement(node: &PositionedNode, cfg: &LabelConfig) -> LabelStyle {
    let (x, anchor) = if node.has_children {
        (node.depth_coord - cfg.offset, TextAnchor::End)
    } else {
        (node.depth_coord + cfg.offset, TextAnchor::Start)
    };
    LabelStyle {
        x,
        y: node.breadth_coord,
        dy_em: cfg.baseline_shift_em,
        anchor,
        font_size: cfg.font_size,
    }
}
