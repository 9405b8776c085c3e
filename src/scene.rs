//! Scene layout: where the circuit nodes live.
//!
//! The circuit simulation doesn't know about windows or documents; it
//! is seeded from a [`Scene`], the minimal capability interface for
//! "give me node positions for this viewport". The layout is re-queried
//! wholesale when the viewport resizes — positions are never adjusted
//! incrementally.

use glam::Vec2;

use crate::circuit::Node;

/// A node as placed by a scene: position, hover hit area, main flag,
/// and an optional outbound link reported when the node is clicked.
#[derive(Debug, Clone)]
pub struct NodeSeed {
    pub position: Vec2,
    /// Hover/click hit radius in pixels.
    pub radius: f32,
    pub main: bool,
    pub link: Option<String>,
}

impl NodeSeed {
    /// The simulation-facing node for this seed.
    pub fn node(&self) -> Node {
        Node { position: self.position, main: self.main }
    }
}

/// Provides node positions for a viewport size.
pub trait Scene {
    /// Lay out the nodes for a `width` x `height` viewport in pixels.
    fn layout(&self, width: f32, height: f32) -> Vec<NodeSeed>;
}

/// A main node at the viewport center with peripheral nodes arranged on
/// a surrounding ellipse. Placement is fractional, so resizing rescales
/// the whole layout.
#[derive(Debug, Clone)]
pub struct RadialScene {
    peripherals: Vec<Option<String>>,
    /// Hit radius as a fraction of the smaller viewport dimension.
    hit_fraction: f32,
}

impl RadialScene {
    /// A scene with `count` unlabeled peripheral nodes.
    pub fn new(count: usize) -> Self {
        Self {
            peripherals: vec![None; count],
            hit_fraction: 0.05,
        }
    }

    /// A scene with one peripheral node per link.
    pub fn with_links(links: Vec<String>) -> Self {
        Self {
            peripherals: links.into_iter().map(Some).collect(),
            hit_fraction: 0.05,
        }
    }
}

impl Scene for RadialScene {
    fn layout(&self, width: f32, height: f32) -> Vec<NodeSeed> {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let radius_x = width * 0.35;
        let radius_y = height * 0.35;
        let hit = width.min(height) * self.hit_fraction;

        let mut nodes = vec![NodeSeed {
            position: center,
            radius: hit * 1.5,
            main: true,
            link: None,
        }];

        let count = self.peripherals.len();
        for (i, link) in self.peripherals.iter().enumerate() {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU
                - std::f32::consts::FRAC_PI_2;
            nodes.push(NodeSeed {
                position: center + Vec2::new(angle.cos() * radius_x, angle.sin() * radius_y),
                radius: hit,
                main: false,
                link: link.clone(),
            });
        }
        nodes
    }
}
