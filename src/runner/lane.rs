//! Lane model: three fixed tracks mapped to world offsets.

use crate::core::constants::{LANE_COUNT, LANE_OFFSETS, START_LANE};
use serde::{Deserialize, Serialize};

/// One of the three lanes. Always in `0..LANE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);

    pub const ALL: [Lane; LANE_COUNT] = [Lane::LEFT, Lane::CENTER, Lane::RIGHT];

    /// Build a lane from a raw index, rejecting anything out of range.
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < LANE_COUNT).then_some(Lane(index))
    }

    /// Lane index, 0 = left.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// World-space horizontal offset of the lane centre.
    pub fn offset(self) -> f64 {
        LANE_OFFSETS[self.index()]
    }

    /// Lane reached by moving `delta` lanes, clamped to the outer lanes.
    pub fn shifted(self, delta: i8) -> Lane {
        let max = (LANE_COUNT - 1) as i16;
        let target = (self.0 as i16 + delta as i16).clamp(0, max);
        Lane(target as u8)
    }
}

impl Default for Lane {
    fn default() -> Self {
        Lane(START_LANE)
    }
}

/// Discrete steering intent from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneIntent {
    Left,
    Right,
}

impl LaneIntent {
    pub fn delta(self) -> i8 {
        match self {
            LaneIntent::Left => -1,
            LaneIntent::Right => 1,
        }
    }
}
