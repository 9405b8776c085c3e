//! # circuitfx - Circuit Particle Effects
//!
//! GPU-rendered 2D particle effects: a pointer-reactive particle field,
//! animated circuit connections with traveling pulses, and an ambient
//! starfield backdrop.
//!
//! The simulations are plain CPU state machines that emit a [`DrawList`]
//! of discs and line segments each frame; the wgpu renderer turns the
//! list into two instanced passes. That split keeps every effect fully
//! testable without a window or a device.
//!
//! ## Quick Start
//!
//! ```ignore
//! use circuitfx::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Simulation::new()
//!         .with_scene(RadialScene::new(6))
//!         .with_title("circuitfx demo")
//!         .with_node_click(|node| {
//!             if let Some(link) = &node.link {
//!                 println!("open {link}");
//!             }
//!         })
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Scenes
//!
//! A [`Scene`] maps a viewport size to a set of [`NodeSeed`]s: positions,
//! hit radii, an optional link payload, and a `main` flag. Connections
//! are derived from the nodes — the first main node links to every other
//! node, and the remaining nodes link pairwise.
//!
//! ### Layers
//!
//! Three independent simulations render back to front:
//!
//! - [`AmbientSim`] — twinkling stars plus short-lived rising floaters
//! - [`CircuitSim`] — connection strokes, glow, and traveling pulses
//! - [`FieldSim`] — the pointer-repelled particle field
//!
//! Each owns its state, steps once per frame, and appends to the shared
//! [`DrawList`].
//!
//! ### Pointer interaction
//!
//! The field particles flee the cursor inside a fixed influence radius
//! and ease back to their home positions when released. Hovering a node
//! excites the connections that touch it (faster, brighter pulses);
//! leaving relaxes them. Clicking a hovered node fires the
//! `with_node_click` callback with its [`NodeSeed`].

pub mod ambient;
pub mod circuit;
pub mod draw;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod scene;
mod simulation;
pub mod time;
pub mod visuals;

pub use ambient::{AmbientConfig, AmbientSim};
pub use circuit::{CircuitSim, Connection, ConnectionClass, Node};
pub use draw::{Disc, DrawList, Segment};
pub use error::{GpuError, RunError};
pub use field::{FieldConfig, FieldSim};
pub use glam::Vec2;
pub use scene::{NodeSeed, RadialScene, Scene};
pub use simulation::Simulation;
pub use visuals::{ConnectionStyle, Rgba};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use circuitfx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ambient::{AmbientConfig, AmbientSim};
    pub use crate::circuit::{CircuitSim, ConnectionClass, Node};
    pub use crate::draw::DrawList;
    pub use crate::error::RunError;
    pub use crate::field::{FieldConfig, FieldSim};
    pub use crate::scene::{NodeSeed, RadialScene, Scene};
    pub use crate::simulation::Simulation;
    pub use crate::visuals::Rgba;
    pub use crate::Vec2;
}
