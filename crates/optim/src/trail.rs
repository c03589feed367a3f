//! Bounded history of recent particle positions.
//!
//! The trail is a newest-first sequence of world-space points `(x, loss, z)`
//! with a fixed capacity; pushing beyond it drops the oldest point. It is
//! purely derived state: cleared on every reset, never consulted by the
//! physics.

use glam::DVec3;
use std::collections::VecDeque;

/// Default trail capacity in points.
pub const TRAIL_CAP: usize = 160;

/// Fixed-capacity, newest-first position history.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<DVec3>,
    cap: usize,
}

impl Trail {
    /// Creates an empty trail with the given capacity.
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Prepends a point, dropping the oldest when the capacity is exceeded.
    pub fn push(&mut self, point: DVec3) {
        if self.cap == 0 {
            return;
        }
        self.points.push_front(point);
        while self.points.len() > self.cap {
            self.points.pop_back();
        }
    }

    /// Number of valid points (supports partial-fill right after a reset).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Logically empties the trail; capacity is unchanged.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Iterates points newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &DVec3> {
        self.points.iter()
    }

    /// The most recently pushed point, if any.
    pub fn latest(&self) -> Option<&DVec3> {
        self.points.front()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_CAP)
    }
}
