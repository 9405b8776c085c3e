//! Pointer state tracking.
//!
//! A reduced window-event abstraction: this crate only consumes the
//! cursor position, primary-button press edges, and which node (if any)
//! the cursor is hovering. Hover transitions are resolved here so the
//! frame loop can forward enter/leave to the circuit simulation.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::scene::NodeSeed;

/// Pointer state, fed from winit window events.
#[derive(Debug, Default)]
pub struct Pointer {
    position: Option<Vec2>,
    pressed: bool,
    clicked: bool,
    hovered: Option<usize>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in pixels, `None` before the cursor has
    /// entered the surface (or after it left).
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether the primary button went down this frame.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Index of the node currently under the cursor.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Clear per-frame edges. Call once per frame, after consuming them.
    pub fn begin_frame(&mut self) {
        self.clicked = false;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            if !self.pressed {
                                self.clicked = true;
                            }
                            self.pressed = true;
                        }
                        ElementState::Released => {
                            self.pressed = false;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Re-resolve which node the cursor is over and return the
    /// transition as `(left, entered)` node indices.
    ///
    /// A node is hovered while the cursor is within its hit radius; the
    /// first match wins.
    pub fn resolve_hover(&mut self, nodes: &[NodeSeed]) -> (Option<usize>, Option<usize>) {
        let now = self.position.and_then(|cursor| {
            nodes
                .iter()
                .position(|n| n.position.distance(cursor) <= n.radius)
        });

        if now == self.hovered {
            return (None, None);
        }
        let left = self.hovered.take();
        self.hovered = now;
        (left, now)
    }
}
