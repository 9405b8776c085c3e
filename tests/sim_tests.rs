//! Integration tests for the effect layers.
//!
//! These drive the public API the way the frame loop does — seed a
//! scene, step the simulations, inspect the draw list — with seeded
//! RNGs so every run is reproducible.

use circuitfx::circuit::{CircuitSim, ConnectionClass};
use circuitfx::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scene_nodes(width: f32, height: f32) -> Vec<Node> {
    RadialScene::new(5)
        .layout(width, height)
        .iter()
        .map(NodeSeed::node)
        .collect()
}

// ============================================================================
// Field
// ============================================================================

#[test]
fn test_field_repulsion_and_recovery() {
    let mut rng = StdRng::seed_from_u64(100);
    let config = FieldConfig { count: 200, ..FieldConfig::default() };
    let mut field = FieldSim::new(config, 800.0, 600.0, &mut rng);

    // Park the cursor at the center for a while.
    let cursor = Vec2::new(400.0, 300.0);
    for _ in 0..30 {
        field.step(Some(cursor));
    }

    // Nothing inside the influence radius, and every particle that was
    // pushed sits further from the cursor than its base.
    let radius = field.config().influence_radius;
    let mut pushed = 0;
    for p in field.particles() {
        if p.base.distance(cursor) < radius {
            pushed += 1;
            assert!(p.position.distance(cursor) >= p.base.distance(cursor));
        }
    }
    assert!(pushed > 0, "cursor at the center should reach some particles");

    // Release: everything converges back toward its base.
    for _ in 0..200 {
        field.step(None);
    }
    for p in field.particles() {
        assert!(p.position.distance(p.base) < 1.0);
    }
}

#[test]
fn test_field_positions_stay_finite() {
    let mut rng = StdRng::seed_from_u64(101);
    let config = FieldConfig { count: 200, ..FieldConfig::default() };
    let mut field = FieldSim::new(config, 800.0, 600.0, &mut rng);

    // Sweep the cursor across the viewport, including right on top of
    // particle spawn points.
    for i in 0..600 {
        let t = i as f32;
        field.step(Some(Vec2::new(t * 1.4, t)));
    }
    for p in field.particles() {
        assert!(p.position.x.is_finite() && p.position.y.is_finite());
    }
}

// ============================================================================
// Circuit
// ============================================================================

#[test]
fn test_circuit_topology_from_scene() {
    let mut rng = StdRng::seed_from_u64(200);
    let circuit = CircuitSim::new(scene_nodes(1280.0, 720.0), &mut rng);

    // 6 nodes, one main: 5 main connections + C(5, 2) peripheral.
    let main = circuit
        .connections()
        .iter()
        .filter(|c| c.class == ConnectionClass::Main)
        .count();
    let peripheral = circuit
        .connections()
        .iter()
        .filter(|c| c.class == ConnectionClass::Peripheral)
        .count();
    assert_eq!(main, 5);
    assert_eq!(peripheral, 10);

    for c in circuit.connections() {
        assert_eq!(c.particles.len(), c.class.particle_count());
    }
}

#[test]
fn test_circuit_long_run_invariants() {
    let mut rng = StdRng::seed_from_u64(201);
    let mut circuit = CircuitSim::new(scene_nodes(1280.0, 720.0), &mut rng);

    for _ in 0..5000 {
        circuit.step(&mut rng);
    }
    for c in circuit.connections() {
        for p in &c.particles {
            assert!((0.0..=1.0).contains(&p.progress));
            assert!((0.2..=1.0).contains(&p.brightness));
            assert!(p.speed > 0.0);
            assert!(p.direction == 1.0 || p.direction == -1.0);
        }
    }
}

#[test]
fn test_peripheral_only_long_run_invariants() {
    // No main node: every pair is peripheral, the slowest class, so
    // wraparounds are rare per frame and a long run covers many.
    let mut rng = StdRng::seed_from_u64(204);
    let nodes: Vec<Node> = (0..4)
        .map(|i| Node { position: Vec2::new(i as f32 * 200.0, 100.0), main: false })
        .collect();
    let mut circuit = CircuitSim::new(nodes, &mut rng);
    assert!(circuit.connections().iter().all(|c| c.class == ConnectionClass::Peripheral));

    for _ in 0..20_000 {
        circuit.step(&mut rng);
        for c in circuit.connections() {
            for p in &c.particles {
                assert!((0.0..=1.0).contains(&p.progress));
                assert!((0.2..=1.0).contains(&p.brightness));
            }
        }
    }
}

#[test]
fn test_circuit_rebuild_on_resize() {
    let mut rng = StdRng::seed_from_u64(202);
    let scene = RadialScene::new(5);

    let seeds = scene.layout(800.0, 600.0);
    let mut circuit =
        CircuitSim::new(seeds.iter().map(NodeSeed::node).collect(), &mut rng);
    for _ in 0..100 {
        circuit.step(&mut rng);
    }

    let seeds = scene.layout(1920.0, 1080.0);
    circuit.rebuild(seeds.iter().map(NodeSeed::node).collect(), &mut rng);

    // Same topology at the new positions, all particle state fresh.
    assert_eq!(circuit.connections().len(), 15);
    assert_eq!(circuit.nodes().len(), 6);
    assert_eq!(circuit.nodes()[0].position, Vec2::new(960.0, 540.0));
    for c in circuit.connections() {
        for p in &c.particles {
            assert!((0.0..1.0).contains(&p.progress));
        }
    }
}

#[test]
fn test_hover_excites_only_touching_connections() {
    let mut rng = StdRng::seed_from_u64(203);
    let mut circuit = CircuitSim::new(scene_nodes(1280.0, 720.0), &mut rng);

    let before: Vec<Vec<f32>> = circuit
        .connections()
        .iter()
        .map(|c| c.particles.iter().map(|p| p.speed).collect())
        .collect();

    // Hover peripheral node 3: its 1 main connection plus 4 peripheral
    // links speed up, the other 10 are untouched.
    circuit.hover_enter(3);
    let mut excited = 0;
    for (c, speeds) in circuit.connections().iter().zip(&before) {
        let touching = c.start == 3 || c.end == 3;
        for (p, &speed) in c.particles.iter().zip(speeds) {
            if touching {
                assert!((p.speed - speed * 2.0).abs() < 1e-6);
            } else {
                assert_eq!(p.speed, speed);
            }
        }
        excited += touching as usize;
    }
    assert_eq!(excited, 5);

    circuit.hover_leave(3);
    for (c, speeds) in circuit.connections().iter().zip(&before) {
        for (p, &speed) in c.particles.iter().zip(speeds) {
            assert!((p.speed - speed).abs() < 1e-6);
        }
    }
}

// ============================================================================
// Ambient
// ============================================================================

#[test]
fn test_ambient_floater_population_is_bounded() {
    let mut rng = StdRng::seed_from_u64(300);
    let config = AmbientConfig { spawn_chance: 1.0, ..AmbientConfig::default() };
    let mut ambient = AmbientSim::new(config, 800.0, 600.0, &mut rng);

    // Guaranteed spawn every interval, lifetimes under 10 s: population
    // settles at lifetime / interval at most.
    for _ in 0..10_000 {
        ambient.step(1.0 / 60.0, &mut rng);
    }
    assert!(ambient.floater_count() >= 1);
    assert!(ambient.floater_count() <= 5);
}

// ============================================================================
// Full frame composition
// ============================================================================

#[test]
fn test_frame_composition_layer_order() {
    let mut rng = StdRng::seed_from_u64(400);
    let scene = RadialScene::new(5);
    let seeds = scene.layout(1280.0, 720.0);

    let mut ambient = AmbientSim::new(AmbientConfig::default(), 1280.0, 720.0, &mut rng);
    let mut circuit =
        CircuitSim::new(seeds.iter().map(NodeSeed::node).collect(), &mut rng);
    let field_config = FieldConfig { count: 100, ..FieldConfig::default() };
    let mut field = FieldSim::new(field_config, 1280.0, 720.0, &mut rng);

    let mut frame = DrawList::new();
    for _ in 0..60 {
        field.step(Some(Vec2::new(640.0, 360.0)));
        circuit.step(&mut rng);
        ambient.step(1.0 / 60.0, &mut rng);

        frame.clear();
        ambient.render(&mut frame);
        circuit.render(&mut frame);
        field.render(&mut frame);
    }

    // Back-to-front: the stars are the first discs, the field particles
    // the last 100.
    assert!(frame.discs.len() >= 50 + 100);
    let stars = &frame.discs[..50];
    assert!(stars.iter().all(|d| d.radius == 1.0));
    let field_discs = &frame.discs[frame.discs.len() - 100..];
    assert!(field_discs.iter().all(|d| d.radius == 3.0));

    // Strokes: 5 main connections emit 8 segments each, 10 peripheral
    // emit 5 each.
    assert_eq!(frame.segments.len(), 5 * 8 + 10 * 5);
}

#[test]
fn test_frame_reuse_does_not_accumulate() {
    let mut rng = StdRng::seed_from_u64(401);
    let mut circuit = CircuitSim::new(scene_nodes(800.0, 600.0), &mut rng);

    let mut frame = DrawList::new();
    circuit.render(&mut frame);
    let (segments, discs) = (frame.segments.len(), frame.discs.len());

    for _ in 0..10 {
        circuit.step(&mut rng);
        frame.clear();
        circuit.render(&mut frame);
        assert_eq!(frame.segments.len(), segments);
        assert_eq!(frame.discs.len(), discs);
    }
}
