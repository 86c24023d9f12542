//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the simulation thread via a
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Simulation Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  EventCollector      │
//  │   ↓                      │    │  ↓                   │
//  │  InputProcessor          │    │  Simulation::tick()  │
//  │   └─ Converts Winit      │    │   ├─ StateTracker    │
//  │   ↓                      │    │   ├─ Pause / Scenes  │
//  │  InputBuffer             │    │   └─ Graph + Draw    │
//  │   ├─ discrete: Vec<>     │    │                      │
//  │   ├─ continuous: Set<>   │    └──────────────────────┘
//  │   └─ wheel: i32          │             ↑
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → Simulation processes at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Focus and resize changes flush pending input first, then are sent
// immediately so they stay ordered after the input they follow.
//
// Shutdown: closing the window sends WindowClosed; a simulation that
// stops on its own raises the shared shutdown flag, checked each frame.
//
// Winit mandates the main thread on macOS/iOS, so this runs on the
// thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::camera::Viewport;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Initial window parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub size: Viewport,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "Trellis".into(), size: Viewport::default() }
    }
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread and sends batched events to the simulation
/// thread. Not Send/Sync; communication happens only through the sender.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Buffers input until the frame boundary.
    buffer: InputBuffer,

    /// Channel to the simulation thread.
    event_sender: Sender<PlatformEvent>,

    /// Set by the simulation thread when it stops on its own.
    shutdown: Arc<AtomicBool>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance. The window is created lazily in
    /// `resumed()`.
    pub fn new(
        event_sender: Sender<PlatformEvent>,
        config: WindowConfig,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            shutdown,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input as a single [`PlatformEvent::Inputs`].
    ///
    /// If the simulation thread is gone, the events are dropped with a
    /// warning so the window can still be closed.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            self.send(PlatformEvent::Inputs { discrete, continuous });
        }
    }

    fn send(&self, event: PlatformEvent) {
        if let Err(e) = self.event_sender.send(event) {
            warn!(target: "platform", "Channel disconnected, dropping {:?}", e.into_inner());
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation (or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.size.width, self.config.size.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.send(PlatformEvent::Resized { width: size.width, height: size.height });
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform", "Focus changed: {}", focused);
                self.flush_input_buffer();
                self.send(PlatformEvent::FocusChanged(*focused));
            }

            WindowEvent::Resized(size) => {
                self.flush_input_buffer();
                self.send(PlatformEvent::Resized { width: size.width, height: size.height });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let units = self.input_processor.process_wheel(*delta);
                self.buffer.push_wheel(units);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(touch);
                self.buffer.push_continuous(event);
            }

            WindowEvent::RedrawRequested => {
                if self.shutdown.load(Ordering::Acquire) {
                    info!(target: "platform", "Simulation stopped, closing window");
                    event_loop.exit();
                    return;
                }

                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
