//=========================================================================
// Input Buffer
//
// Collects input events from the window between two frame boundaries,
// split into two categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete inputs (key/button edges) in arrival order
// - Drop consecutive duplicate discrete inputs (key repeat)
// - Coalesce continuous inputs (pointer position, touch moves)
// - Sum scroll wheel deltas into a single event per frame
//
// Notes:
// The buffer is drained by the platform on every RedrawRequested and the
// result is sent to the simulation thread as one `PlatformEvent::Inputs`.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: ordered one-shot inputs (e.g., KeyDown)
// - `continuous`: last-known value of continuous inputs (e.g., MouseMoved)
// - `wheel`: scroll delta accumulated this frame
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
    wheel: i32,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for typical per-frame event counts.
    //
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 16;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
            wheel: 0,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest event replaces any previous one that compares equal
    // (pointer moves; touch updates with the same id and phase).
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to absorb key repeat.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Scroll Handling --------------------------------------------------

    pub(crate) fn push_wheel(&mut self, delta: i32) {
        self.wheel = self.wheel.wrapping_add(delta);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns (discrete, continuous) for this frame and resets the buffer,
    // or `None` if nothing was collected.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let mut continuous: Vec<InputEvent> = self.continuous.drain().collect();
        if self.wheel != 0 {
            continuous.push(InputEvent::MouseWheel { delta: self.wheel });
            self.wheel = 0;
        }
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
        self.wheel = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty() && self.wheel == 0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
