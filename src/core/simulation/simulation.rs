//=========================================================================
// Simulation
//=========================================================================
//
// One fixed step of the game: input, pause gate, scene swap, update and
// draw, executed serially.
//
// Tick order:
//   1. apply platform events (input, focus, resize)
//   2. capture input (always, so unpause stays detectable); a tick that
//      loses focus reports no input edges
//   3. paused with pending faults → return them as FrameFaults
//   4. exit control released      → TickControl::Exit
//   5. paused                     → pause update only
//   6. pause update → scene swap → camera → graph update → draw
//
// The tick on which the player pauses still draws its frame. Ticks that
// lose focus or raise a fault do not.
//
// Errors raised in step 6 are collected as faults and force the pause.
// They are not returned from the tick that raised them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use super::FrameContext;
use crate::core::camera::Viewport;
use crate::core::error::EngineError;
use crate::core::input::{Control, GamepadButton, KeyCode, StateTracker};
use crate::core::metrics::FrameMetrics;
use crate::core::platform_bridge::{PlatformEvent, TickControl};
use crate::core::render::{RenderTarget, Renderer};
use crate::core::scene::{SceneDescriptor, SceneGraph, SceneKey, SceneStateMachine};

//=== Bindings ============================================================

const EXIT: [Control; 2] = [
    Control::Key(KeyCode::Escape),
    Control::Gamepad(GamepadButton::Back),
];

/// Render target scene roots are bound to.
pub const SCENE_TARGET: RenderTarget = RenderTarget(0);

//=== Simulation ==========================================================

pub struct Simulation<S: SceneKey> {
    graph: SceneGraph<S>,
    scenes: SceneStateMachine<S>,
    devices: StateTracker,
    ctx: FrameContext<S>,
    faults: Vec<EngineError>,
    metrics: FrameMetrics,
}

impl<S: SceneKey> Simulation<S> {
    pub fn new() -> Self {
        Self::with_context(FrameContext::default())
    }

    pub fn with_context(ctx: FrameContext<S>) -> Self {
        Self {
            graph: SceneGraph::new(),
            scenes: SceneStateMachine::new(SCENE_TARGET),
            devices: StateTracker::new(),
            ctx,
            faults: Vec::new(),
            metrics: FrameMetrics::new(),
        }
    }

    //=====================================================================
    // Scene Setup
    //=====================================================================

    pub fn register_scene(&mut self, key: S, descriptor: SceneDescriptor<S>) {
        self.scenes.register_scene(key, descriptor);
    }

    /// Requests a scene change, applied at the start of the next tick.
    pub fn request_scene(&mut self, key: S) {
        self.ctx.scenes.request_scene_change(key);
    }

    //=====================================================================
    // Accessors
    //=====================================================================

    pub fn active_scene(&self) -> Option<S> {
        self.scenes.active_scene()
    }

    pub fn graph(&self) -> &SceneGraph<S> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph<S> {
        &mut self.graph
    }

    pub fn scenes(&self) -> &SceneStateMachine<S> {
        &self.scenes
    }

    pub fn context(&self) -> &FrameContext<S> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut FrameContext<S> {
        &mut self.ctx
    }

    pub fn devices(&self) -> &StateTracker {
        &self.devices
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.pause.is_paused()
    }

    /// Faults collected since they were last surfaced.
    pub fn pending_faults(&self) -> &[EngineError] {
        &self.faults
    }

    //=====================================================================
    // Tick
    //=====================================================================

    /// Runs one simulation step.
    ///
    /// # Errors
    ///
    /// [`EngineError::FrameFaults`] when paused with faults collected in
    /// earlier ticks. The faults are drained; the next tick starts clean.
    pub fn tick(
        &mut self,
        events: &[PlatformEvent],
        delta: Duration,
        renderer: &mut dyn Renderer,
    ) -> Result<TickControl, EngineError> {
        //--- 1. Platform events ---------------------------------------------
        let focus_lost = events
            .iter()
            .any(|event| matches!(event, PlatformEvent::FocusChanged(false)));
        if self.apply_platform_events(events) == TickControl::Exit {
            return Ok(TickControl::Exit);
        }

        //--- 2. Input capture -----------------------------------------------
        self.ctx.input.capture_frame(&self.devices);
        self.devices.clear();
        if focus_lost {
            // Controls were force-released, not released by the player
            self.ctx.input.discard_edges();
        }
        self.ctx.delta = delta.as_secs_f32();
        self.metrics.record_frame(delta);

        //--- 3. Surface faults ----------------------------------------------
        if self.ctx.pause.is_paused() && !self.faults.is_empty() {
            let faults = std::mem::take(&mut self.faults);
            error!("Surfacing {} fault(s) from previous frames", faults.len());
            return Err(EngineError::FrameFaults(faults));
        }

        //--- 4. Exit control ------------------------------------------------
        if self.ctx.input.is_released(&EXIT) {
            info!(target: "input", "Exit requested");
            return Ok(TickControl::Exit);
        }

        //--- 5. Paused path -------------------------------------------------
        if self.ctx.pause.is_paused() {
            self.ctx.pause.update(&self.ctx.input, self.ctx.focused);
            return Ok(TickControl::Continue);
        }

        //--- 6. Frame -------------------------------------------------------
        let draw_frame = self.ctx.focused;
        let updated = self.update_frame();
        let faulted = updated.is_err();
        self.record_fault(updated);

        if draw_frame && !faulted {
            let drawn = self.graph.draw(self.ctx.camera.camera().transform(), renderer);
            self.record_fault(drawn);
        }

        Ok(TickControl::Continue)
    }

    //--- Internal ---------------------------------------------------------

    fn apply_platform_events(&mut self, events: &[PlatformEvent]) -> TickControl {
        for event in events {
            match event {
                PlatformEvent::Inputs { discrete, continuous } => {
                    self.devices.process_events(discrete);
                    self.devices.process_events(continuous);
                }
                PlatformEvent::FocusChanged(focused) => {
                    self.ctx.focused = *focused;
                    if !focused {
                        self.devices.release_all();
                    }
                }
                PlatformEvent::Resized { width, height } => {
                    self.ctx
                        .camera
                        .camera_mut()
                        .set_viewport(Viewport::new(*width, *height));
                }
                PlatformEvent::WindowClosed => return TickControl::Exit,
            }
        }
        TickControl::Continue
    }

    fn update_frame(&mut self) -> Result<(), EngineError> {
        self.ctx.pause.update(&self.ctx.input, self.ctx.focused);
        if self.ctx.pause.is_paused() {
            return Ok(());
        }

        self.scenes.tick(&mut self.graph, &mut self.ctx)?;
        self.ctx.camera.update(&self.ctx.input, self.ctx.delta);
        self.graph.update(&mut self.ctx)
    }

    fn record_fault(&mut self, result: Result<(), EngineError>) {
        if let Err(err) = result {
            warn!("Frame fault, pausing: {}", err);
            self.faults.push(err);
            self.ctx.pause.force_pause();
        }
    }
}

impl<S: SceneKey> Default for Simulation<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
