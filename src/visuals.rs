//! Colors and stroke styling for the effect layers.
//!
//! This module holds the neon palette and the per-class stroke
//! constants, separate from the behavioral code that decides where
//! things are drawn.

use crate::circuit::ConnectionClass;

/// An RGBA color with non-premultiplied components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// The neon cyan the circuit layer is drawn in.
    pub const CYAN: Rgba = Rgba::new(0.0, 1.0, 1.0, 1.0);

    /// The softer electric blue used on peripheral particles.
    pub const ELECTRIC_BLUE: Rgba = Rgba::new(0.0, 150.0 / 255.0, 1.0, 1.0);

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// The same color with its alpha zeroed (for gradient tails).
    pub const fn faded(self) -> Rgba {
        self.with_alpha(0.0)
    }

    /// As a `[r, g, b, a]` array for GPU upload.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Stroke and trail constants for one connection class.
///
/// Widths are in pixels, alphas in `[0, 1]`. The layered stroke (core +
/// glow + optional highlight) fakes a neon glow without a blur filter.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionStyle {
    /// Width of the solid core stroke.
    pub core_width: f32,
    /// Alpha of the solid core stroke.
    pub core_alpha: f32,
    /// Width of the wide translucent glow stroke.
    pub glow_width: f32,
    /// Alpha of the glow stroke.
    pub glow_alpha: f32,
    /// Extra thin white highlight stroke (main connections only).
    pub highlight: bool,
    /// Trail-length constant: trail offset = speed * trail_length.
    pub trail_length: f32,
}

impl ConnectionStyle {
    /// The stroke constants for a connection class.
    pub fn for_class(class: ConnectionClass) -> Self {
        match class {
            ConnectionClass::Main => Self {
                core_width: 3.0,
                core_alpha: 0.5,
                glow_width: 8.0,
                glow_alpha: 0.2,
                highlight: true,
                trail_length: 30.0,
            },
            ConnectionClass::Peripheral => Self {
                core_width: 2.0,
                core_alpha: 0.3,
                glow_width: 6.0,
                glow_alpha: 0.1,
                highlight: false,
                trail_length: 20.0,
            },
        }
    }

    /// Gradient stops for a flow particle of this class at a given
    /// brightness: `[center, mid, edge]` of the radial gradient.
    pub fn particle_stops(&self, brightness: f32) -> [Rgba; 3] {
        if self.highlight {
            [
                Rgba::CYAN.with_alpha(brightness),
                Rgba::WHITE.with_alpha(brightness * 0.7),
                Rgba::CYAN.faded(),
            ]
        } else {
            [
                Rgba::CYAN.with_alpha(brightness * 0.8),
                Rgba::ELECTRIC_BLUE.with_alpha(brightness * 0.5),
                Rgba::CYAN.faded(),
            ]
        }
    }

    /// Head color of the trail gradient for this class.
    pub fn trail_color(&self, brightness: f32) -> Rgba {
        if self.highlight {
            Rgba::CYAN.with_alpha(brightness * 0.8)
        } else {
            Rgba::CYAN.with_alpha(brightness * 0.6)
        }
    }
}
