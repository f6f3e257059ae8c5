//! When the frame loop should be running
//!
//! Three independent inputs: whether the host wants the loop, whether the
//! page is visible, and whether the container is still in the document.
//! The loop runs only when all three agree. Hiding the page never touches
//! the host's choice, so an explicit stop survives a hide/show cycle.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopControl {
    wanted: bool,
    visible: bool,
    detached: bool,
}

impl LoopControl {
    /// Host hasn't asked for the loop yet; page visible
    pub fn new() -> Self {
        Self {
            wanted: false,
            visible: true,
            detached: false,
        }
    }

    /// Host asked the loop to run
    pub fn start(&mut self) {
        self.wanted = true;
    }

    /// Host asked the loop to stop
    pub fn stop(&mut self) {
        self.wanted = false;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Container left the document; permanent
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn should_run(&self) -> bool {
        self.wanted && self.visible && !self.detached
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}
