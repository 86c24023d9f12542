//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the simulation thread.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Simulation-side event collection with bounded
//   polling
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::{PlatformError, PlatformEvent};

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
