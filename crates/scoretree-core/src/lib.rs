#![forbid(unsafe_code)]

//! Scored tree model (headless).
//!
//! - [`TreeNode`]: the input tree, with explicit optional scores
//! - [`parse_tree_json`] / [`tree_from_value`]: ingestion, converting the upstream `"null"`
//!   sentinel to [`Score::UNSCORED`] and rejecting anything that is not a number
//! - [`ChartConfig`]: JSON-backed chart configuration

pub mod config;
pub mod error;
pub mod model;

pub use config::ChartConfig;
pub use error::{Error, Result};
pub use model::{
    Dimensions, PreOrder, Score, ScoreError, TreeNode, UNSCORED_SENTINEL, parse_tree_json,
    tree_from_value,
};
