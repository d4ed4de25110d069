#![forbid(unsafe_code)]

//! `scoretree` renders scored trees as horizontal node-link diagrams.
//!
//! Branch scores drive edge color, dash and opacity; node scores drive node fill and radius.
//!
//! # Features
//!
//! - `render`: enable layout + scene encoding + SVG output (`scoretree::render`)

pub use scoretree_core::*;

#[cfg(feature = "render")]
pub mod render {
    use scoretree_core::{Dimensions, TreeNode};

    pub use scoretree_render::config::{
        EdgeConfig, LabelConfig, LayoutAlgorithm, LayoutConfig, LegendConfig, NodeConfig,
        RenderConfig,
    };
    pub use scoretree_render::layout::layout_tree;
    pub use scoretree_render::model::{PositionedEdge, PositionedNode, TreeLayout};
    pub use scoretree_render::scene::{Primitive, Role, Scene};
    pub use scoretree_render::surface::{DrawingSurface, apply_scene};
    pub use scoretree_render::{
        RenderOptions, RenderOutcome, SvgSurface, TreeChart, encode_scene, render_scene,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] scoretree_core::Error),
        #[error(transparent)]
        Render(#[from] scoretree_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Builds [`RenderOptions`] from a JSON config overlay (camelCase keys, see [`RenderConfig`]).
    pub fn render_options_from_json(config: serde_json::Value) -> Result<RenderOptions> {
        let cfg = scoretree_core::ChartConfig::from_value(config);
        Ok(RenderOptions::from_chart_config(&cfg)?)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        tree: &TreeNode,
        dimensions: Dimensions,
        options: &RenderOptions,
    ) -> Result<String> {
        Ok(scoretree_render::render_svg(tree, dimensions, options)?)
    }

    /// Parses a JSON tree and renders it in one go.
    pub fn render_json_svg_sync(
        json: &str,
        dimensions: Dimensions,
        options: &RenderOptions,
    ) -> Result<String> {
        let tree = scoretree_core::parse_tree_json(json)?;
        render_svg_sync(&tree, dimensions, options)
    }
}
