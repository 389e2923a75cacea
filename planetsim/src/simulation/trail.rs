//! Bounded per-body position history used for drawing trails
//!
//! Oldest point first. Pushing onto a full trail evicts the oldest point.

use std::collections::VecDeque;

use super::states::NVec2;

/// Default number of points kept per body
pub const TRAIL_LENGTH: usize = 1000;

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec2>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding at most `capacity` points
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(TRAIL_LENGTH)),
            capacity,
        }
    }

    /// Append a point at the tail, dropping the oldest when full
    pub fn push(&mut self, p: NVec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn oldest(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&NVec2> {
        self.points.back()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_LENGTH)
    }
}
