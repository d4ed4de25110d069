//! Typed chart settings resolved from a [`ChartConfig`], with built-in defaults for every key.

use crate::{Error, Result};
use scoretree_core::ChartConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Breadth span multiplier applied to the surface height. Values above 1 overflow the surface
/// vertically; hosts are expected to scroll.
pub const DEFAULT_BREADTH_SCALE: f64 = 4.0;
/// Depth span multiplier applied to the surface width; the remainder is the leaf label margin.
pub const DEFAULT_DEPTH_SCALE: f64 = 0.9;

pub const POSITIVE_COLOR: &str = "#C35D57";
pub const NEGATIVE_COLOR: &str = "#57bdc3";
pub const UNSCORED_COLOR: &str = "black";
const UNSCORED_DASH: f64 = 5.0;
const EDGE_STROKE_WIDTH: f64 = 4.0;
const MIN_EDGE_OPACITY: f64 = 0.25;
const UNSCORED_EDGE_OPACITY: f64 = 0.25;

const HOLLOW_BELOW: f64 = 0.5;
const HIDE_ABOVE: f64 = 1.0;
const NODE_RADIUS: f64 = 4.0;
const NODE_COLOR: &str = "black";
const NODE_STROKE_WIDTH: f64 = 1.0;

const LABEL_OFFSET: f64 = 5.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_BASELINE_SHIFT_EM: f64 = 0.32;

const LEGEND_X: f64 = 20.0;
const LEGEND_Y: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    /// Leaves on consecutive slots, parents centered over their children. Sibling subtrees never
    /// share breadth.
    #[default]
    Bands,
    /// Buchheim tidy tree (d3 `tree()`), more compact but subtrees may interleave across levels.
    Tidy,
}

impl LayoutAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutAlgorithm::Bands => "bands",
            LayoutAlgorithm::Tidy => "tidy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub algorithm: LayoutAlgorithm,
    pub breadth_scale: f64,
    pub depth_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::Bands,
            breadth_scale: DEFAULT_BREADTH_SCALE,
            depth_scale: DEFAULT_DEPTH_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeConfig {
    pub positive_color: String,
    pub negative_color: String,
    pub unscored_color: String,
    pub unscored_dash: f64,
    pub stroke_width: f64,
    pub min_opacity: f64,
    pub unscored_opacity: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            positive_color: POSITIVE_COLOR.to_string(),
            negative_color: NEGATIVE_COLOR.to_string(),
            unscored_color: UNSCORED_COLOR.to_string(),
            unscored_dash: UNSCORED_DASH,
            stroke_width: EDGE_STROKE_WIDTH,
            min_opacity: MIN_EDGE_OPACITY,
            unscored_opacity: UNSCORED_EDGE_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub hollow_below: f64,
    pub hide_above: f64,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            hollow_below: HOLLOW_BELOW,
            hide_above: HIDE_ABOVE,
            radius: NODE_RADIUS,
            fill: NODE_COLOR.to_string(),
            stroke: NODE_COLOR.to_string(),
            stroke_width: NODE_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfig {
    pub offset: f64,
    pub font_size: f64,
    pub baseline_shift_em: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            offset: LABEL_OFFSET,
            font_size: LABEL_FONT_SIZE,
            baseline_shift_em: LABEL_BASELINE_SHIFT_EM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendConfig {
    pub x: f64,
    pub y: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            x: LEGEND_X,
            y: LEGEND_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderConfig {
    pub layout: LayoutConfig,
    pub edge: EdgeConfig,
    pub node: NodeConfig,
    pub label: LabelConfig,
    pub legend: LegendConfig,
}

impl RenderConfig {
    /// Built-in defaults as a [`ChartConfig`], under the same camelCase keys hosts override.
    pub fn default_chart_config() -> ChartConfig {
        let d = Self::default();
        let mut cfg = ChartConfig::empty_object();
        for (key, value) in [
            ("layout.algorithm", Value::from(d.layout.algorithm.as_str())),
            ("layout.breadthScale", Value::from(d.layout.breadth_scale)),
            ("layout.depthScale", Value::from(d.layout.depth_scale)),
            ("edge.positiveColor", Value::from(d.edge.positive_color)),
            ("edge.negativeColor", Value::from(d.edge.negative_color)),
            ("edge.unscoredColor", Value::from(d.edge.unscored_color)),
            ("edge.unscoredDash", Value::from(d.edge.unscored_dash)),
            ("edge.strokeWidth", Value::from(d.edge.stroke_width)),
            ("edge.minOpacity", Value::from(d.edge.min_opacity)),
            ("edge.unscoredOpacity", Value::from(d.edge.unscored_opacity)),
            ("node.hollowBelow", Value::from(d.node.hollow_below)),
            ("node.hideAbove", Value::from(d.node.hide_above)),
            ("node.radius", Value::from(d.node.radius)),
            ("node.fill", Value::from(d.node.fill)),
            ("node.stroke", Value::from(d.node.stroke)),
            ("node.strokeWidth", Value::from(d.node.stroke_width)),
            ("label.offset", Value::from(d.label.offset)),
            ("label.fontSize", Value::from(d.label.font_size)),
            ("label.baselineShiftEm", Value::from(d.label.baseline_shift_em)),
            ("legend.x", Value::from(d.legend.x)),
            ("legend.y", Value::from(d.legend.y)),
        ] {
            cfg.set_value(key, value);
        }
        cfg
    }

    /// Deep-merges `overlay` onto [`RenderConfig::default_chart_config`] and validates every key
    /// of the result.
    pub fn from_chart_config(overlay: &ChartConfig) -> Result<Self> {
        let mut cfg = Self::default_chart_config();
        cfg.deep_merge(overlay.as_value());
        tracing::trace!(config = %cfg.as_value(), "resolved chart config");

        let algorithm = {
            let v = required(&cfg, "layout.algorithm")?;
            serde_json::from_value(v.clone()).map_err(|_| Error::InvalidConfig {
                key: "layout.algorithm",
                message: format!("expected \"bands\" or \"tidy\", got {v}"),
            })?
        };

        let layout = LayoutConfig {
            algorithm,
            breadth_scale: positive(&cfg, "layout.breadthScale")?,
            depth_scale: positive(&cfg, "layout.depthScale")?,
        };

        let edge = EdgeConfig {
            positive_color: color(&cfg, "edge.positiveColor")?,
            negative_color: color(&cfg, "edge.negativeColor")?,
            unscored_color: color(&cfg, "edge.unscoredColor")?,
            unscored_dash: non_negative(&cfg, "edge.unscoredDash")?,
            stroke_width: non_negative(&cfg, "edge.strokeWidth")?,
            min_opacity: non_negative(&cfg, "edge.minOpacity")?,
            unscored_opacity: non_negative(&cfg, "edge.unscoredOpacity")?,
        };

        let node = NodeConfig {
            hollow_below: finite(&cfg, "node.hollowBelow")?,
            hide_above: finite(&cfg, "node.hideAbove")?,
            radius: non_negative(&cfg, "node.radius")?,
            fill: color(&cfg, "node.fill")?,
            stroke: color(&cfg, "node.stroke")?,
            stroke_width: non_negative(&cfg, "node.strokeWidth")?,
        };

        let label = LabelConfig {
            offset: finite(&cfg, "label.offset")?,
            font_size: positive(&cfg, "label.fontSize")?,
            baseline_shift_em: finite(&cfg, "label.baselineShiftEm")?,
        };

        let legend = LegendConfig {
            x: finite(&cfg, "legend.x")?,
            y: finite(&cfg, "legend.y")?,
        };

        Ok(Self {
            layout,
            edge,
            node,
            label,
            legend,
        })
    }
}

/// Every key exists after merging onto the defaults unless the overlay replaced a whole section
/// with a non-object.
fn required<'a>(cfg: &'a ChartConfig, key: &'static str) -> Result<&'a Value> {
    cfg.get(key).ok_or_else(|| Error::InvalidConfig {
        key,
        message: "missing (was its section replaced by a non-object?)".to_string(),
    })
}

fn finite(cfg: &ChartConfig, key: &'static str) -> Result<f64> {
    let v = required(cfg, key)?;
    match v.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(Error::InvalidConfig {
            key,
            message: "must be finite".to_string(),
        }),
        None => Err(Error::InvalidConfig {
            key,
            message: format!("expected a number, got {v}"),
        }),
    }
}

fn non_negative(cfg: &ChartConfig, key: &'static str) -> Result<f64> {
    let v = finite(cfg, key)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(Error::InvalidConfig {
            key,
            message: format!("must be >= 0, got {v}"),
        })
    }
}

fn positive(cfg: &ChartConfig, key: &'static str) -> Result<f64> {
    let v = finite(cfg, key)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(Error::InvalidConfig {
            key,
            message: format!("must be > 0, got {v}"),
        })
    }
}

fn color(cfg: &ChartConfig, key: &'static str) -> Result<String> {
    let v = required(cfg, key)?;
    match v.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(Error::InvalidConfig {
            key,
            message: format!("expected a non-empty color string, got {v}"),
        }),
    }
}
