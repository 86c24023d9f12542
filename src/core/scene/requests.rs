//=========================================================================
// Scene Requests
//=========================================================================
//
// Pending scene-change slot.
//
// Behaviors record requests here during updates. The scene state machine
// consumes the slot at the start of the next tick. Only one request can
// be pending; a later request overwrites an earlier one.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== SceneRequests =======================================================

/// Single-slot, last-write-wins scene change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequests<S: SceneKey> {
    pending: Option<S>,
}

impl<S: SceneKey> SceneRequests<S> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Records `key` as the next scene, replacing any pending request.
    pub fn request_scene_change(&mut self, key: S) {
        if let Some(previous) = self.pending.replace(key) {
            debug!(target: "scene", "Scene request {:?} overwritten by {:?}", previous, key);
        }
    }

    /// Returns the pending key without consuming it.
    pub fn pending(&self) -> Option<S> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending request.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Takes the pending request, leaving the slot empty.
    pub fn take(&mut self) -> Option<S> {
        self.pending.take()
    }
}

impl<S: SceneKey> Default for SceneRequests<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        A,
        B,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn starts_empty() {
        let requests = SceneRequests::<TestScene>::new();
        assert!(!requests.is_pending());
        assert_eq!(requests.pending(), None);
    }

    #[test]
    fn last_write_wins() {
        let mut requests = SceneRequests::new();
        requests.request_scene_change(TestScene::A);
        requests.request_scene_change(TestScene::B);

        assert_eq!(requests.take(), Some(TestScene::B));
        assert_eq!(requests.take(), None);
    }

    #[test]
    fn clear_drops_request() {
        let mut requests = SceneRequests::new();
        requests.request_scene_change(TestScene::A);
        requests.clear();
        assert!(!requests.is_pending());
    }
}
