//=========================================================================
// Trellis: Library Root
//
// This crate defines the public API surface of the Trellis 2D game
// framework.
//
// Responsibilities:
// - Expose the engine entry point (`Engine`, `EngineBuilder`)
// - Keep internal modules (like `platform`) hidden from end users
// - Provide clean separation between the game-facing systems (scenes,
//   camera, input, pause) and lower-level OS integration
//
// Typical usage:
// ```no_run
// use trellis::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum GameScene { Main }
// impl SceneKey for GameScene {}
//
// fn main() {
//     EngineBuilder::new()
//         .with_initial_scene(GameScene::Main)
//         .build()
//         .init(|simulation| {
//             simulation.register_scene(
//                 GameScene::Main,
//                 SceneDescriptor::new("Main", |graph, target| Ok(graph.create_root(target))),
//             );
//         })
//         .run(DrawList::new());
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine systems (scene graph, camera, input, pause,
// simulation step, persistence, logging). It is exposed publicly so games
// and tests can drive a `Simulation` directly without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, input
// translation) and is kept private.
//
// `engine` defines the builder and runtime that tie both threads together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use core::logging::install as install_logger;
pub use engine::{Engine, EngineBuilder};
