#![forbid(unsafe_code)]

//! Headless layout + encoding renderer for scored trees.
//!
//! A render pass is a pure function `(tree, dimensions) -> Scene`; [`surface::apply_scene`] then
//! replaces every element role on a retained [`surface::DrawingSurface`]. [`chart::TreeChart`]
//! wires the two together for hosts.

pub mod chart;
pub mod config;
pub mod encode;
pub mod layout;
pub mod legend;
pub mod model;
pub mod path;
pub mod scene;
pub mod surface;
pub mod svg;

use crate::config::RenderConfig;
use crate::encode::{label_placement, label_text, score_to_edge_style, score_to_node_style};
use crate::model::TreeLayout;
use crate::scene::{CirclePrimitive, Paint, PathPrimitive, Primitive, Scene, TextPrimitive};
use scoretree_core::{ChartConfig, Dimensions, TreeNode};

pub use chart::{RenderOutcome, TreeChart};
pub use svg::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] scoretree_core::Error),
    #[error("invalid surface dimensions: {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid config value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: RenderConfig,
}

impl RenderOptions {
    pub fn from_chart_config(cfg: &ChartConfig) -> Result<Self> {
        Ok(Self {
            config: RenderConfig::from_chart_config(cfg)?,
        })
    }
}

/// Maps a laid-out tree to drawing primitives: one link per edge, one circle and one label per
/// node, plus the legend.
pub fn encode_scene(layout: &TreeLayout, config: &RenderConfig) -> Scene {
    let links = layout
        .edges()
        .into_iter()
        .map(|edge| {
            let source = layout.nodes[edge.parent].point();
            let target = layout.nodes[edge.child].point();
            let style = score_to_edge_style(edge.branch_score, &config.edge);
            Primitive::Path(PathPrimitive {
                d: path::link_horizontal(source, target),
                fill: Paint::None,
                stroke: style.color,
                stroke_width: style.stroke_width,
                dash: style.dash,
                opacity: style.opacity,
            })
        })
        .collect();

    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            let style = score_to_node_style(node.node_score, &config.node);
            Primitive::Circle(CirclePrimitive {
                cx: node.depth_coord,
                cy: node.breadth_coord,
                r: style.radius,
                fill: style.fill,
                stroke: style.stroke,
                stroke_width: style.stroke_width,
                opacity: 1.0,
            })
        })
        .collect();

    let labels = layout
        .nodes
        .iter()
        .map(|node| {
            let style = label_placement(node, &config.label);
            Primitive::Text(TextPrimitive {
                x: style.x,
                y: style.y,
                dy_em: Some(style.dy_em),
                anchor: Some(style.anchor),
                font_size: Some(style.font_size),
                content: label_text(&node.name).to_string(),
            })
        })
        .collect();

    Scene {
        links,
        nodes,
        labels,
        legend: legend::legend_primitives(&config.legend, &config.edge),
        extent: (
            layout.dimensions.width,
            layout.dimensions.height.max(layout.breadth_span),
        ),
    }
}

/// One pure render pass. `None` dimensions mean the surface is not measured yet: no work is
/// done and `Ok(None)` is returned.
pub fn render_scene(
    tree: &TreeNode,
    dimensions: Option<Dimensions>,
    options: &RenderOptions,
) -> Result<Option<Scene>> {
    let Some(dimensions) = dimensions else {
        tracing::debug!("render pass skipped: surface dimensions unavailable");
        return Ok(None);
    };
    if !dimensions.is_valid() {
        return Err(Error::InvalidDimensions {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    tree.validate()?;

    let layout = layout::layout_tree(tree, dimensions, &options.config.layout);
    let scene = encode_scene(&layout, &options.config);
    tracing::debug!(
        nodes = scene.nodes.len(),
        links = scene.links.len(),
        width = dimensions.width,
        height = dimensions.height,
        "render pass complete"
    );
    Ok(Some(scene))
}

/// Renders straight to a standalone SVG document.
pub fn render_svg(
    tree: &TreeNode,
    dimensions: Dimensions,
    options: &RenderOptions,
) -> Result<String> {
    let mut chart = TreeChart::with_options(SvgSurface::new(), options.clone());
    chart.render(tree, Some(dimensions))?;
    Ok(chart.surface().to_svg_string())
}
