//! Simulation builder and windowed frame loop.
//!
//! [`Simulation`] wires the three effect layers (ambient background,
//! circuit connections, pointer field) to a winit window and a wgpu
//! surface. All state is owned here — stepping happens once per
//! `RedrawRequested`, and closing the window stops the loop for good.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::ambient::{AmbientConfig, AmbientSim};
use crate::circuit::CircuitSim;
use crate::draw::DrawList;
use crate::error::RunError;
use crate::field::{FieldConfig, FieldSim};
use crate::gpu::GpuState;
use crate::input::Pointer;
use crate::scene::{NodeSeed, Scene};
use crate::time::Time;

type ClickHandler = Box<dyn FnMut(&NodeSeed)>;

/// An animation builder.
///
/// Use method chaining to configure, then call `.run()` to open the
/// window and block until it is closed.
///
/// ```ignore
/// Simulation::new()
///     .with_scene(RadialScene::new(6))
///     .with_title("circuitfx")
///     .with_node_click(|node| {
///         if let Some(link) = &node.link {
///             println!("open {link}");
///         }
///     })
///     .run()?;
/// ```
pub struct Simulation {
    scene: Option<Box<dyn Scene>>,
    field_config: FieldConfig,
    ambient_config: AmbientConfig,
    title: String,
    size: (u32, u32),
    on_node_click: Option<ClickHandler>,
}

impl Simulation {
    /// Create a new animation with default settings.
    pub fn new() -> Self {
        Self {
            scene: None,
            field_config: FieldConfig::default(),
            ambient_config: AmbientConfig::default(),
            title: "circuitfx".to_string(),
            size: (1280, 720),
            on_node_click: None,
        }
    }

    /// Set the scene that lays out the circuit nodes.
    pub fn with_scene(mut self, scene: impl Scene + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    /// Configure the pointer-reactive particle field.
    pub fn with_field(mut self, config: FieldConfig) -> Self {
        self.field_config = config;
        self
    }

    /// Configure the ambient background layer.
    pub fn with_ambient(mut self, config: AmbientConfig) -> Self {
        self.ambient_config = config;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the callback invoked when a node is clicked.
    pub fn with_node_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&NodeSeed) + 'static,
    {
        self.on_node_click = Some(Box::new(handler));
        self
    }

    /// Run the animation. Blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        let scene = self.scene.ok_or(RunError::NoScene)?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(
            scene,
            self.field_config,
            self.ambient_config,
            self.title,
            self.size,
            self.on_node_click,
        );
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// The three simulations plus the node seeds they were built from.
/// Discarded and rebuilt wholesale on resize.
struct Stage {
    seeds: Vec<NodeSeed>,
    circuit: CircuitSim,
    field: FieldSim,
    ambient: AmbientSim,
}

impl Stage {
    fn build(
        scene: &dyn Scene,
        field_config: FieldConfig,
        ambient_config: AmbientConfig,
        width: f32,
        height: f32,
        rng: &mut StdRng,
    ) -> Self {
        let seeds = scene.layout(width, height);
        let nodes = seeds.iter().map(NodeSeed::node).collect();
        Self {
            circuit: CircuitSim::new(nodes, rng),
            field: FieldSim::new(field_config, width, height, rng),
            ambient: AmbientSim::new(ambient_config, width, height, rng),
            seeds,
        }
    }
}

struct App {
    scene: Box<dyn Scene>,
    field_config: FieldConfig,
    ambient_config: AmbientConfig,
    title: String,
    size: (u32, u32),
    on_node_click: Option<ClickHandler>,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    stage: Option<Stage>,
    pointer: Pointer,
    time: Time,
    rng: StdRng,
    frame: DrawList,
    error: Option<RunError>,
}

impl App {
    fn new(
        scene: Box<dyn Scene>,
        field_config: FieldConfig,
        ambient_config: AmbientConfig,
        title: String,
        size: (u32, u32),
        on_node_click: Option<ClickHandler>,
    ) -> Self {
        Self {
            scene,
            field_config,
            ambient_config,
            title,
            size,
            on_node_click,
            window: None,
            gpu: None,
            stage: None,
            pointer: Pointer::new(),
            time: Time::new(),
            rng: StdRng::from_entropy(),
            frame: DrawList::new(),
            error: None,
        }
    }

    /// Re-query the scene layout and rebuild every layer for the
    /// current surface size. Prior particle state is discarded.
    fn rebuild_stage(&mut self, width: u32, height: u32) {
        self.stage = Some(Stage::build(
            self.scene.as_ref(),
            self.field_config,
            self.ambient_config,
            width as f32,
            height as f32,
            &mut self.rng,
        ));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (elapsed, dt) = self.time.update();

        let running = !self.time.is_paused();
        if let Some(stage) = self.stage.as_mut().filter(|_| running) {
            // Hover transitions excite/relax the touched connections.
            let (left, entered) = self.pointer.resolve_hover(&stage.seeds);
            if let Some(node) = left {
                stage.circuit.hover_leave(node);
            }
            if let Some(node) = entered {
                stage.circuit.hover_enter(node);
            }

            if self.pointer.clicked() {
                if let (Some(node), Some(handler)) =
                    (self.pointer.hovered(), self.on_node_click.as_mut())
                {
                    handler(&stage.seeds[node]);
                }
            }

            stage.field.step(self.pointer.position());
            stage.circuit.step(&mut self.rng);
            stage.ambient.step(dt, &mut self.rng);

            self.frame.clear();
            stage.ambient.render(&mut self.frame);
            stage.circuit.render(&mut self.frame);
            stage.field.render(&mut self.frame);
        }

        // Click edges are cleared every frame, consumed or not, so a
        // press made while paused doesn't fire after resuming.
        self.pointer.begin_frame();

        if let Some(gpu) = &mut self.gpu {
            match gpu.render(&self.frame, elapsed) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                }),
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => eprintln!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(RunError::Window(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let gpu = match pollster::block_on(GpuState::new(window)) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.error = Some(RunError::Gpu(e));
                event_loop.exit();
                return;
            }
        };
        let (width, height) = (gpu.config.width, gpu.config.height);
        self.gpu = Some(gpu);
        self.rebuild_stage(width, height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                // Idempotent stop: no further frames are scheduled.
                event_loop.exit();
            }
            WindowEvent::Focused(focused) => {
                // Freeze the animation while the window is in the
                // background; the last frame keeps presenting.
                if focused {
                    self.time.resume();
                } else {
                    self.time.pause();
                }
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.rebuild_stage(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
