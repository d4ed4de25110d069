//! Host-facing render pass.

use crate::surface::{DrawingSurface, apply_scene};
use crate::{RenderOptions, Result, render_scene};
use scoretree_core::{Dimensions, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The surface had no size yet; nothing was touched.
    Skipped,
    Rendered { nodes: usize, links: usize },
}

/// Owns a drawing surface and redraws it from scratch on every call to [`TreeChart::render`].
///
/// The chart keeps no record of previous inputs: the host calls `render` whenever it observes a
/// change to the tree or to the surface size.
#[derive(Debug, Clone)]
pub struct TreeChart<S> {
    surface: S,
    options: RenderOptions,
}

impl<S: DrawingSurface> TreeChart<S> {
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, RenderOptions::default())
    }

    pub fn with_options(surface: S, options: RenderOptions) -> Self {
        Self { surface, options }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Runs one synchronous pass. On error the surface is left untouched.
    pub fn render(
        &mut self,
        tree: &TreeNode,
        dimensions: Option<Dimensions>,
    ) -> Result<RenderOutcome> {
        let Some(scene) = render_scene(tree, dimensions, &self.options)? else {
            return Ok(RenderOutcome::Skipped);
        };
        apply_scene(&mut self.surface, &scene);
        Ok(RenderOutcome::Rendered {
            nodes: scene.nodes.len(),
            links: scene.links.len(),
        })
    }
}
