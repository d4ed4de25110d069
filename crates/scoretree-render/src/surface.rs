//! Adapter between the pure scene and a persistent drawing surface.

use crate::scene::{Primitive, Role, Scene};

/// A retained 2D surface that can replace all elements of one [`Role`] at once.
///
/// Implementations must make `replace_role` idempotent: calling it twice with the same elements
/// leaves the surface exactly as after the first call.
pub trait DrawingSurface {
    fn replace_role(&mut self, role: Role, elements: &[Primitive]);

    /// Called once per applied pass, before any role is replaced.
    fn set_extent(&mut self, _width: f64, _height: f64) {}
}

/// Fully re-syncs every role of `surface` to `scene`. There is no diffing: stale elements from a
/// previous tree shape cannot survive.
pub fn apply_scene<S: DrawingSurface + ?Sized>(surface: &mut S, scene: &Scene) {
    surface.set_extent(scene.extent.0, scene.extent.1);
    for role in Role::ALL {
        let elements = scene.role(role);
        tracing::trace!(role = role.class_name(), elements = elements.len(), "replace role");
        surface.replace_role(role, elements);
    }
}
