//! Source paths the sampler walks along.
//!
//! Anything with an arc length and a way to evaluate a point at a given
//! distance can feed a track. [`Polyline`] is always available; the
//! lyon-backed [`VectorPath`] and SVG document loading need the `vectors`
//! feature.

use glam::Vec2;

mod polyline;
mod document;
#[cfg(feature = "vectors")]
mod vector;

pub use polyline::Polyline;
pub use document::{PathDocument, PathElement};
#[cfg(feature = "vectors")]
pub use vector::VectorPath;

/// An immutable planar curve that can be evaluated by arc length.
pub trait FlowPath {
    /// Total arc length in source units.
    fn length(&self) -> f32;

    /// Point at `offset` units along the curve. Offsets outside
    /// `[0, length]` are clamped to the nearest end.
    fn point_at(&self, offset: f32) -> Vec2;
}

impl<P: FlowPath + ?Sized> FlowPath for Box<P> {
    fn length(&self) -> f32 {
        (**self).length()
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        (**self).point_at(offset)
    }
}

impl<P: FlowPath + ?Sized> FlowPath for &P {
    fn length(&self) -> f32 {
        (**self).length()
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        (**self).point_at(offset)
    }
}
