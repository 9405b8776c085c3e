//! Glowing circuit connections with traveling particles.
//!
//! Nodes (one optionally marked main) are joined by straight
//! connections: the main node connects to every other node, and every
//! pair of non-main nodes connects once. Each connection carries a
//! handful of flow particles that travel along it, wrap around at the
//! ends, and flicker.
//!
//! Topology is rebuilt wholesale whenever node positions change
//! (viewport resize) — particle state is discarded, never migrated.
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut circuit = CircuitSim::new(nodes, &mut rng);
//! loop {
//!     circuit.step(&mut rng);
//!     circuit.render(&mut frame);
//! }
//! ```

use glam::Vec2;
use rand::Rng;

use crate::draw::{Disc, DrawList, Segment};
use crate::visuals::{ConnectionStyle, Rgba};

/// Speed range a flow particle re-samples from after wrapping.
const RESET_SPEED_MIN: f32 = 0.005;
const RESET_SPEED_SPAN: f32 = 0.01;

/// Per-frame brightness jitter amplitude.
const BRIGHTNESS_JITTER: f32 = 0.05;

/// Brightness clamp bounds applied after every update.
const BRIGHTNESS_MIN: f32 = 0.2;
const BRIGHTNESS_MAX: f32 = 1.0;

/// A circuit node: a fixed 2D point, endpoint of one or more connections.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub position: Vec2,
    /// The single distinguished node connected to all others.
    pub main: bool,
}

/// Connection class; decides particle counts, kinematics and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionClass {
    /// Touches the main node: denser, faster, brighter.
    Main,
    /// Joins two non-main nodes.
    Peripheral,
}

impl ConnectionClass {
    /// Number of flow particles per connection of this class.
    pub fn particle_count(self) -> usize {
        match self {
            ConnectionClass::Main => 5,
            ConnectionClass::Peripheral => 3,
        }
    }

    /// Initial speed range `[min, min + span)`.
    fn speed_range(self) -> (f32, f32) {
        match self {
            ConnectionClass::Main => (0.008, 0.012),
            ConnectionClass::Peripheral => (0.005, 0.008),
        }
    }

    /// Rendered size range `[min, min + span)`.
    fn size_range(self) -> (f32, f32) {
        match self {
            ConnectionClass::Main => (3.0, 4.0),
            ConnectionClass::Peripheral => (2.0, 3.0),
        }
    }
}

/// A particle traveling along a connection.
///
/// `progress` is its normalized position: 0 at the start node, 1 at the
/// end node. `direction` is +1 or -1.
#[derive(Debug, Clone, Copy)]
pub struct FlowParticle {
    pub progress: f32,
    pub speed: f32,
    pub size: f32,
    pub brightness: f32,
    pub direction: f32,
}

impl FlowParticle {
    fn spawn(class: ConnectionClass, rng: &mut impl Rng) -> Self {
        let (speed_min, speed_span) = class.speed_range();
        let (size_min, size_span) = class.size_range();
        Self {
            progress: rng.gen::<f32>(),
            speed: speed_min + rng.gen::<f32>() * speed_span,
            size: size_min + rng.gen::<f32>() * size_span,
            brightness: rng.gen::<f32>(),
            direction: if rng.gen::<f32>() > 0.5 { 1.0 } else { -1.0 },
        }
    }

    /// Advance one frame: move along the connection, wrap at the ends,
    /// jitter the brightness.
    fn step(&mut self, rng: &mut impl Rng) {
        self.progress += self.speed * self.direction;

        // One-shot wraparound: restart from the opposite end with fresh
        // speed and brightness. Direction is kept (not a bounce).
        if self.progress > 1.0 || self.progress < 0.0 {
            self.progress = if self.direction > 0.0 { 0.0 } else { 1.0 };
            self.brightness = rng.gen::<f32>();
            self.speed = RESET_SPEED_MIN + rng.gen::<f32>() * RESET_SPEED_SPAN;
        }

        self.brightness += (rng.gen::<f32>() - 0.5) * 2.0 * BRIGHTNESS_JITTER;
        self.brightness = self.brightness.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
    }
}

/// A connection between two nodes, carrying its flow particles.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Index of the start node.
    pub start: usize,
    /// Index of the end node.
    pub end: usize,
    pub class: ConnectionClass,
    pub particles: Vec<FlowParticle>,
}

impl Connection {
    fn new(start: usize, end: usize, class: ConnectionClass, rng: &mut impl Rng) -> Self {
        let particles = (0..class.particle_count())
            .map(|_| FlowParticle::spawn(class, rng))
            .collect();
        Self { start, end, class, particles }
    }

    fn touches(&self, node: usize) -> bool {
        self.start == node || self.end == node
    }
}

/// The circuit connection simulation.
pub struct CircuitSim {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl CircuitSim {
    /// Build the connection topology for a set of nodes.
    ///
    /// With one main node among N, this creates `N - 1` main
    /// connections plus `C(N-1, 2)` peripheral ones — exactly one
    /// connection per unordered pair. Without a main node every pair is
    /// peripheral. If several nodes are flagged main, the first wins.
    pub fn new(nodes: Vec<Node>, rng: &mut impl Rng) -> Self {
        let mut sim = Self { nodes: Vec::new(), connections: Vec::new() };
        sim.rebuild(nodes, rng);
        sim
    }

    /// Discard the topology and all particle state, then rebuild from
    /// the given node positions (viewport resize).
    pub fn rebuild(&mut self, nodes: Vec<Node>, rng: &mut impl Rng) {
        self.nodes = nodes;
        self.connections.clear();

        let main = self.nodes.iter().position(|n| n.main);

        // Main node connects to every other node.
        if let Some(main) = main {
            for other in 0..self.nodes.len() {
                if other != main {
                    self.connections
                        .push(Connection::new(main, other, ConnectionClass::Main, rng));
                }
            }
        }

        // Every pair of non-main nodes connects once.
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                if Some(i) == main || Some(j) == main {
                    continue;
                }
                self.connections
                    .push(Connection::new(i, j, ConnectionClass::Peripheral, rng));
            }
        }
    }

    /// Advance every flow particle by one frame.
    pub fn step(&mut self, rng: &mut impl Rng) {
        for connection in &mut self.connections {
            for particle in &mut connection.particles {
                particle.step(rng);
            }
        }
    }

    /// Pointer entered a node: excite the particles on every connection
    /// touching it. Speed doubles and brightness amplifies 1.5x (capped
    /// at 1).
    pub fn hover_enter(&mut self, node: usize) {
        for connection in &mut self.connections {
            if connection.touches(node) {
                for particle in &mut connection.particles {
                    particle.speed *= 2.0;
                    particle.brightness = (particle.brightness * 1.5).min(1.0);
                }
            }
        }
    }

    /// Pointer left a node: halve the speed on its connections.
    ///
    /// Deliberately not a restore to a stored baseline — a wraparound
    /// between enter and leave re-randomizes speed, so repeated
    /// hovering drifts it. Quirk kept from the original behavior.
    pub fn hover_leave(&mut self, node: usize) {
        for connection in &mut self.connections {
            if connection.touches(node) {
                for particle in &mut connection.particles {
                    particle.speed *= 0.5;
                }
            }
        }
    }

    /// Emit the frame geometry: layered strokes per connection, then a
    /// gradient disc (+ halo on main) and a fading trail per particle.
    pub fn render(&self, frame: &mut DrawList) {
        for connection in &self.connections {
            let start = self.nodes[connection.start].position;
            let end = self.nodes[connection.end].position;
            let style = ConnectionStyle::for_class(connection.class);

            // Layered neon stroke: solid core under a wide translucent
            // glow, plus a thin white highlight on main connections.
            frame.push_segment(Segment::solid(
                start,
                end,
                style.core_width,
                Rgba::CYAN.with_alpha(style.core_alpha),
            ));
            frame.push_segment(Segment::solid(
                start,
                end,
                style.glow_width,
                Rgba::CYAN.with_alpha(style.glow_alpha),
            ));
            if style.highlight {
                frame.push_segment(Segment::solid(
                    start,
                    end,
                    1.0,
                    Rgba::WHITE.with_alpha(0.1),
                ));
            }

            for particle in &connection.particles {
                let position = start.lerp(end, particle.progress);

                frame.push_disc(Disc::new(
                    position,
                    particle.size,
                    style.particle_stops(particle.brightness),
                ));

                if style.highlight {
                    frame.push_disc(Disc::new(
                        position,
                        particle.size * 1.5,
                        [
                            Rgba::WHITE.with_alpha(particle.brightness * 0.3),
                            Rgba::WHITE.with_alpha(particle.brightness * 0.15),
                            Rgba::WHITE.faded(),
                        ],
                    ));
                }

                // Trail: a short gradient stroke reaching backward along
                // the connection, opposite to the travel direction.
                let tail = position
                    - (end - start) * (particle.speed * style.trail_length) * particle.direction;
                frame.push_segment(Segment::new(
                    position,
                    tail,
                    particle.size / 2.0,
                    style.trail_color(particle.brightness),
                    Rgba::CYAN.faded(),
                ));
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nodes(count: usize, main: Option<usize>) -> Vec<Node> {
        (0..count)
            .map(|i| Node {
                position: Vec2::new(i as f32 * 100.0, 50.0),
                main: Some(i) == main,
            })
            .collect()
    }

    #[test]
    fn test_topology_with_main() {
        let mut rng = StdRng::seed_from_u64(1);
        let sim = CircuitSim::new(nodes(5, Some(0)), &mut rng);

        // N = 5 with one main: (N-1) main + C(N-1, 2) peripheral.
        let main: Vec<_> = sim
            .connections()
            .iter()
            .filter(|c| c.class == ConnectionClass::Main)
            .collect();
        let peripheral: Vec<_> = sim
            .connections()
            .iter()
            .filter(|c| c.class == ConnectionClass::Peripheral)
            .collect();
        assert_eq!(main.len(), 4);
        assert_eq!(peripheral.len(), 6);

        for c in main {
            assert!(c.touches(0));
            assert_eq!(c.particles.len(), 5);
        }
        for c in peripheral {
            assert!(!c.touches(0));
            assert_eq!(c.particles.len(), 3);
        }
    }

    #[test]
    fn test_topology_without_main() {
        let mut rng = StdRng::seed_from_u64(2);
        let sim = CircuitSim::new(nodes(4, None), &mut rng);

        assert_eq!(sim.connections().len(), 6); // C(4, 2)
        assert!(sim
            .connections()
            .iter()
            .all(|c| c.class == ConnectionClass::Peripheral));
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let mut rng = StdRng::seed_from_u64(3);
        let sim = CircuitSim::new(nodes(6, Some(2)), &mut rng);

        let mut pairs: Vec<(usize, usize)> = sim
            .connections()
            .iter()
            .map(|c| (c.start.min(c.end), c.start.max(c.end)))
            .collect();
        let total = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
        assert_eq!(total, 5 + 10); // (N-1) + C(N-1, 2) for N = 6
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(4);
        let sim = CircuitSim::new(nodes(4, Some(0)), &mut rng);

        for c in sim.connections() {
            let (speed_lo, speed_hi, size_lo, size_hi) = match c.class {
                ConnectionClass::Main => (0.008, 0.020, 3.0, 7.0),
                ConnectionClass::Peripheral => (0.005, 0.013, 2.0, 5.0),
            };
            for p in &c.particles {
                assert!(p.speed >= speed_lo && p.speed < speed_hi);
                assert!(p.size >= size_lo && p.size < size_hi);
                assert!((0.0..1.0).contains(&p.progress));
                assert!((0.0..1.0).contains(&p.brightness));
                assert!(p.direction == 1.0 || p.direction == -1.0);
            }
        }
    }

    #[test]
    fn test_wraparound_forward() {
        // 0.995 moving +1 at 0.01 exits past 1 and restarts from the
        // opposite end with re-sampled speed and brightness.
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = FlowParticle {
            progress: 0.995,
            speed: 0.01,
            size: 2.0,
            brightness: 0.9,
            direction: 1.0,
        };
        p.step(&mut rng);

        assert_eq!(p.progress, 0.0);
        assert!(p.speed >= RESET_SPEED_MIN && p.speed < RESET_SPEED_MIN + RESET_SPEED_SPAN);
        assert!(p.brightness >= BRIGHTNESS_MIN && p.brightness <= BRIGHTNESS_MAX);
        assert_eq!(p.direction, 1.0);
    }

    #[test]
    fn test_wraparound_backward() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut p = FlowParticle {
            progress: 0.003,
            speed: 0.01,
            size: 2.0,
            brightness: 0.9,
            direction: -1.0,
        };
        p.step(&mut rng);

        assert_eq!(p.progress, 1.0);
        assert_eq!(p.direction, -1.0);
    }

    #[test]
    fn test_progress_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sim = CircuitSim::new(nodes(4, Some(1)), &mut rng);

        for _ in 0..2000 {
            sim.step(&mut rng);
            for c in sim.connections() {
                for p in &c.particles {
                    assert!((0.0..=1.0).contains(&p.progress));
                    assert!(p.brightness >= BRIGHTNESS_MIN && p.brightness <= BRIGHTNESS_MAX);
                }
            }
        }
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut sim = CircuitSim::new(nodes(3, Some(0)), &mut rng);

        let before: Vec<Vec<f32>> = sim
            .connections()
            .iter()
            .map(|c| c.particles.iter().map(|p| p.speed).collect())
            .collect();

        // Node 1 touches both main connections' subset and the one
        // peripheral connection (1, 2).
        sim.hover_enter(1);
        for (c, speeds) in sim.connections().iter().zip(&before) {
            for (p, &speed) in c.particles.iter().zip(speeds) {
                if c.touches(1) {
                    assert!((p.speed - speed * 2.0).abs() < 1e-6);
                    assert!(p.brightness <= 1.0);
                } else {
                    assert_eq!(p.speed, speed);
                }
            }
        }

        // Leave halves: with no wraparound in between, the net factor
        // is exactly 1.
        sim.hover_leave(1);
        for (c, speeds) in sim.connections().iter().zip(&before) {
            for (p, &speed) in c.particles.iter().zip(speeds) {
                assert!((p.speed - speed).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_hover_brightness_capped() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sim = CircuitSim::new(nodes(2, Some(0)), &mut rng);
        for c in &mut sim.connections {
            for p in &mut c.particles {
                p.brightness = 0.9;
            }
        }
        sim.hover_enter(0);
        for c in sim.connections() {
            for p in &c.particles {
                assert_eq!(p.brightness, 1.0);
            }
        }
    }

    #[test]
    fn test_rebuild_discards_particles() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut sim = CircuitSim::new(nodes(3, Some(0)), &mut rng);
        sim.hover_enter(0); // perturb state

        sim.rebuild(nodes(3, Some(0)), &mut rng);
        assert_eq!(sim.connections().len(), 3); // 2 main + 1 peripheral
        for c in sim.connections() {
            for p in &c.particles {
                let (lo, hi) = match c.class {
                    ConnectionClass::Main => (0.008, 0.020),
                    ConnectionClass::Peripheral => (0.005, 0.013),
                };
                assert!(p.speed >= lo && p.speed < hi);
            }
        }
    }

    #[test]
    fn test_render_layer_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let sim = CircuitSim::new(nodes(3, Some(0)), &mut rng);
        // 2 main connections (5 particles each) + 1 peripheral (3).

        let mut frame = DrawList::new();
        sim.render(&mut frame);

        // Strokes: main = core + glow + highlight + 5 trails = 8 each,
        // peripheral = core + glow + 3 trails = 5.
        assert_eq!(frame.segments.len(), 2 * 8 + 5);
        // Discs: main particles draw disc + halo, peripheral just disc.
        assert_eq!(frame.discs.len(), 2 * 5 * 2 + 3);
    }
}
