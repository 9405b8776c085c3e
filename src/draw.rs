//! The frame draw list.
//!
//! Simulations describe a frame as plain geometry — gradient discs and
//! stroked segments — and the GPU layer turns that into instanced
//! draws. Keeping this boundary CPU-side means every simulation can be
//! stepped and inspected in tests without a surface or adapter.
//!
//! # Usage
//!
//! ```ignore
//! let mut frame = DrawList::new();
//! circuit.render(&mut frame);
//! field.render(&mut frame);
//! gpu.render(&frame, time.elapsed())?;
//! frame.clear(); // reused next frame
//! ```

use glam::Vec2;

use crate::visuals::Rgba;

/// A filled disc with a three-stop radial gradient.
///
/// Stop positions are fixed at 0, 0.3 and 1.0 of the radius; a solid
/// fill is just three equal stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    /// Gradient colors at the center, at 30% of the radius, and at the edge.
    pub stops: [Rgba; 3],
}

impl Disc {
    /// A gradient disc.
    pub fn new(center: Vec2, radius: f32, stops: [Rgba; 3]) -> Self {
        Self { center, radius, stops }
    }

    /// A solid single-color disc.
    pub fn solid(center: Vec2, radius: f32, color: Rgba) -> Self {
        Self { center, radius, stops: [color; 3] }
    }
}

/// A stroked line segment with a linear gradient between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    /// Stroke width in pixels.
    pub width: f32,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl Segment {
    /// A gradient stroke.
    pub fn new(start: Vec2, end: Vec2, width: f32, start_color: Rgba, end_color: Rgba) -> Self {
        Self { start, end, width, start_color, end_color }
    }

    /// A uniform-color stroke.
    pub fn solid(start: Vec2, end: Vec2, width: f32, color: Rgba) -> Self {
        Self::new(start, end, width, color, color)
    }
}

/// Everything to draw for one frame.
///
/// Segments render beneath discs; within each list, later entries
/// render on top (painter's order, no depth buffer).
#[derive(Debug, Default)]
pub struct DrawList {
    pub segments: Vec<Segment>,
    pub discs: Vec<Disc>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn push_disc(&mut self, disc: Disc) {
        self.discs.push(disc);
    }

    /// Forget the frame's contents, keeping allocations for reuse.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.discs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.discs.is_empty()
    }
}
