//=========================================================================
// Trellis Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(renderer)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|simulation| ..)
//         ├─ with_channel_capacity() └─ spawns simulation thread,
//         ├─ with_viewport()            runs platform,
//         ├─ with_camera_options()      blocks until exit
//         ├─ with_scroll_sensitivity()
//         └─ with_initial_scene()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::camera::{CameraController, CameraOptions, Viewport};
use crate::core::input::{InputEdgeDetector, DEFAULT_SCROLL_WHEEL_SENSITIVITY};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::Renderer;
use crate::core::scene::SceneKey;
use crate::core::simulation::{FrameContext, Simulation};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (simulation ticks per second)
/// - **Channel capacity**: 128 events
/// - **Viewport**: 800x600
/// - **Camera options**: [`CameraOptions::default`]
/// - **Scroll sensitivity**: 0.01
/// - **Initial scene**: none
///
/// # Examples
///
/// ```no_run
/// use trellis::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Menu }
/// impl SceneKey for GameScene {}
///
/// EngineBuilder::<GameScene>::new()
///     .with_tps(120.0)
///     .with_viewport(Viewport::new(1280, 720))
///     .with_initial_scene(GameScene::Menu)
///     .build()
///     .init(|simulation| {
///         simulation.register_scene(
///             GameScene::Menu,
///             SceneDescriptor::new("Main Menu", |graph, target| Ok(graph.create_root(target)))
///                 .pausable(false),
///         );
///     })
///     .run(DrawList::new());
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    title: String,
    viewport: Viewport,
    camera_options: CameraOptions,
    scroll_sensitivity: f32,
    initial_scene: Option<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: "Trellis".into(),
            viewport: Viewport::default(),
            camera_options: CameraOptions::default(),
            scroll_sensitivity: DEFAULT_SCROLL_WHEEL_SENSITIVITY,
            initial_scene: None,
        }
    }

    /// Sets the target ticks per second for the simulation thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → simulation communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window and camera viewport size.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_camera_options(mut self, options: CameraOptions) -> Self {
        self.camera_options = options;
        self
    }

    /// Sets the multiplier applied to raw scroll wheel deltas.
    pub fn with_scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    /// Scene entered on the first tick.
    pub fn with_initial_scene(mut self, scene: S) -> Self {
        self.initial_scene = Some(scene);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<S> {
        info!(
            "Building engine (TPS: {}, channel: {}, viewport: {}x{})",
            self.tps, self.channel_capacity, self.viewport.width, self.viewport.height
        );

        let ctx = FrameContext::new(
            InputEdgeDetector::with_sensitivity(self.scroll_sensitivity),
            CameraController::new(self.viewport, self.camera_options),
        );
        let mut simulation = Simulation::with_context(ctx);
        if let Some(scene) = self.initial_scene {
            simulation.request_scene(scene);
        }

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(simulation),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig { title: self.title, size: self.viewport },
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Trellis runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Simulation Thread @ TPS)
///   │     └─► Simulation → Renderer
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded channel (PlatformEvent) + shutdown flag
/// ```
pub struct Engine<S: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<S>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Configures the simulation (scene registration, camera start pose)
    /// before the engine runs.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Simulation<S>),
    {
        info!("Initializing engine systems");

        self.orchestrator.init_systems(init_fn);

        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the channel for platform → simulation communication
    /// 2. Spawns the simulation thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close the simulation thread terminates; when the
    ///    simulation stops first, the platform closes the window
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run<R>(self, renderer: R)
    where
        R: Renderer + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let shutdown = Arc::new(AtomicBool::new(false));

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the simulation thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(
            rx,
            self.tps,
            Box::new(renderer),
            Arc::clone(&shutdown),
        );
        info!("Simulation thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window, shutdown);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for simulation thread to terminate ---------
        match core_handle.join() {
            Ok(()) => {
                info!("Simulation thread terminated cleanly");
            }
            Err(e) => {
                error!("Simulation thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneDescriptor;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.viewport, Viewport::new(800, 600));
        assert_eq!(builder.scroll_sensitivity, DEFAULT_SCROLL_WHEEL_SENSITIVITY);
        assert_eq!(builder.initial_scene, None);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<TestScene>::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::<TestScene>::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::<TestScene>::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_title("Sandbox")
            .with_viewport(Viewport::new(1280, 720))
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.title, "Sandbox");
        assert_eq!(engine.window.size, Viewport::new(1280, 720));
    }

    //=====================================================================
    // Simulation Wiring
    //=====================================================================

    #[test]
    fn build_wires_camera_and_input_settings() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_viewport(Viewport::new(1000, 500))
            .with_camera_options(CameraOptions { max_zoom: 4.0, ..CameraOptions::default() })
            .with_scroll_sensitivity(0.5)
            .build();

        let ctx = engine.orchestrator.simulation().context();
        assert_eq!(ctx.camera.camera().viewport(), Viewport::new(1000, 500));
        assert_eq!(ctx.camera.camera().options().max_zoom, 4.0);
        assert_eq!(ctx.input.scroll_wheel_sensitivity(), 0.5);
    }

    #[test]
    fn initial_scene_is_requested_and_init_runs() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_initial_scene(TestScene::Main)
            .build()
            .init(|simulation| {
                simulation.register_scene(
                    TestScene::Main,
                    SceneDescriptor::new("Main", |graph, target| Ok(graph.create_root(target))),
                );
            });

        let simulation = engine.orchestrator.simulation();
        assert_eq!(simulation.context().scenes.pending(), Some(TestScene::Main));
        assert!(simulation.scenes().is_registered(TestScene::Main));
    }
}
