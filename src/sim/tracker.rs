//! Pointer activity tracking
//!
//! Two states, Idle and Moving. Every move (re)arms a deadline; the only
//! other transition is Moving -> Idle once the deadline passes. Time is
//! passed in by the caller so the machine stays deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tracker state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerState {
    Idle,
    /// Pointer moved recently; goes idle at `deadline_ms`
    Moving { deadline_ms: f64 },
}

/// What the frame updater reads each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    /// Last known position, container-relative
    pub position: Vec2,
    pub moving: bool,
}

impl PointerSnapshot {
    /// A pointer that isn't influencing anything
    pub const IDLE: Self = Self {
        position: Vec2::ZERO,
        moving: false,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerTracker {
    position: Vec2,
    state: PointerState,
    idle_timeout_ms: f64,
}

impl PointerTracker {
    pub fn new(idle_timeout_ms: f64) -> Self {
        Self {
            position: Vec2::ZERO,
            state: PointerState::Idle,
            idle_timeout_ms: idle_timeout_ms.max(0.0),
        }
    }

    /// Record a pointer move at `now_ms`
    pub fn pointer_moved(&mut self, position: Vec2, now_ms: f64) {
        self.position = position;
        self.state = PointerState::Moving {
            deadline_ms: now_ms + self.idle_timeout_ms,
        };
    }

    /// Pointer left the container
    pub fn pointer_left(&mut self) {
        self.state = PointerState::Idle;
    }

    /// Apply the timeout transition; returns true if it fired
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.state {
            PointerState::Moving { deadline_ms } if now_ms >= deadline_ms => {
                self.state = PointerState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, PointerState::Moving { .. })
    }

    pub fn snapshot(&self) -> PointerSnapshot {
        PointerSnapshot {
            position: self.position,
            moving: self.is_moving(),
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}
