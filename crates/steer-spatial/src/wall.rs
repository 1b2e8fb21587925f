//! Virtual walls.
//!
//! A wall is a point on a surface, the surface's inward normal, and the
//! querying agent's distance to it.  The only walls the built-in queries
//! produce are the four world-boundary edges.

use steer_core::{Vec3, WorldBounds};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wall {
    /// Closest point on the wall to the querying position.
    pub position: Vec3,
    /// Unit normal pointing into the playable area.
    pub normal:   Vec3,
    pub distance: f32,
}

/// Boundary edges of `bounds` closer than `radius` to `pos`, in the order
/// left, right, bottom, top.
pub fn boundary_walls(bounds: &WorldBounds, pos: Vec3, radius: f32) -> Vec<Wall> {
    let (hw, hh) = (bounds.half_width, bounds.half_height);
    let candidates = [
        (Vec3::xy(-hw, pos.y), Vec3::xy(1.0, 0.0),  (pos.x + hw).abs()),
        (Vec3::xy(hw, pos.y),  Vec3::xy(-1.0, 0.0), (pos.x - hw).abs()),
        (Vec3::xy(pos.x, -hh), Vec3::xy(0.0, 1.0),  (pos.y + hh).abs()),
        (Vec3::xy(pos.x, hh),  Vec3::xy(0.0, -1.0), (pos.y - hh).abs()),
    ];
    candidates
        .into_iter()
        .filter(|&(_, _, d)| d < radius)
        .map(|(position, normal, distance)| Wall { position, normal, distance })
        .collect()
}
