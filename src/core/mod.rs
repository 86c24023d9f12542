//=========================================================================
// Core Systems Orchestrator
//
// Drives the `Simulation` on the logic (non-platform) thread.
//
// Responsibilities:
// - Receive platform events via the crossbeam channel
// - Tick the simulation at a fixed rate (TPS)
// - Stop on window close, exit request, or surfaced frame faults
//
// Notes:
// The orchestrator runs independently from the platform layer. It owns
// the simulation and the renderer and moves both onto its thread. The
// platform is told about a self-initiated stop through a shared flag.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::{error, info};

//=== Module Declarations =================================================

pub mod camera;
pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod pause;
pub mod platform_bridge;
pub mod render;
pub mod save;
pub mod scene;
pub mod simulation;

//=== Internal Modules ====================================================
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use render::Renderer;
use scene::SceneKey;
use simulation::Simulation;

//=== CoreSystemsOrchestrator =============================================
//
// Owns the simulation until the logic thread is spawned.
//
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    simulation: Simulation<S>,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    pub fn new(simulation: Simulation<S>) -> Self {
        Self { simulation }
    }

    /// Gives setup code mutable access before the thread starts.
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut Simulation<S>),
    {
        init_fn(&mut self.simulation);
    }

    pub fn simulation(&self) -> &Simulation<S> {
        &self.simulation
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events
    //  2. Ticks the simulation with the measured frame time
    //  3. Sleeps to maintain fixed pacing
    //  4. Exits on shutdown signal, exit request or surfaced faults
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
        mut renderer: Box<dyn Renderer + Send>,
        shutdown: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut simulation = self.simulation;
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Platform closed, core thread exiting");
                    break;
                }

                //--- Step 2: Tick the simulation ---------------------------
                let delta = frame_start.duration_since(last_tick);
                last_tick = frame_start;

                match simulation.tick(collector.events(), delta, renderer.as_mut()) {
                    Ok(TickControl::Continue) => {}
                    Ok(TickControl::Exit) => {
                        info!("Exit requested, core thread exiting");
                        break;
                    }
                    Err(e) => {
                        error!("Simulation stopped: {}", e);
                        break;
                    }
                }

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            shutdown.store(true, Ordering::Release);
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::DrawList;
    use crate::core::scene::SceneDescriptor;
    use crossbeam_channel::bounded;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn init_systems_configures_simulation() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Simulation::<TestScene>::new());
        orchestrator.init_systems(|sim| {
            sim.register_scene(
                TestScene::Main,
                SceneDescriptor::new("Main", |graph, target| Ok(graph.create_root(target))),
            );
        });

        assert!(orchestrator.simulation().scenes().is_registered(TestScene::Main));
    }

    #[test]
    fn core_thread_stops_on_window_closed_and_raises_flag() {
        let (tx, rx) = bounded(8);
        let shutdown = Arc::new(AtomicBool::new(false));
        let orchestrator = CoreSystemsOrchestrator::new(Simulation::<TestScene>::new());

        let handle = orchestrator.spawn_core_thread(
            rx,
            240.0,
            Box::new(DrawList::new()),
            Arc::clone(&shutdown),
        );
        tx.send(PlatformEvent::WindowClosed).unwrap();

        handle.join().unwrap();
        assert!(shutdown.load(Ordering::Acquire));
    }

    #[test]
    fn core_thread_stops_when_sender_dropped() {
        let (tx, rx) = bounded::<PlatformEvent>(8);
        let orchestrator = CoreSystemsOrchestrator::new(Simulation::<TestScene>::new());

        let handle = orchestrator.spawn_core_thread(rx, 240.0, Box::new(DrawList::new()), Arc::default());
        drop(tx);

        handle.join().unwrap();
    }
}
