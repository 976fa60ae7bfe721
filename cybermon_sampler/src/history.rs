//! Bounded CPU history for the sparkline.

use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LEN: usize = 40;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Fixed-width FIFO of percentages, pre-filled with zeros so the sparkline
/// is full width from the first frame.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    values: VecDeque<f32>,
    cap: usize,
}

impl HistoryBuffer {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            values: std::iter::repeat(0.0).take(cap).collect(),
            cap,
        }
    }

    pub fn push(&mut self, value: f32) {
        push_capped(&mut self.values, value, self.cap);
    }

    /// Oldest to newest.
    pub fn snapshot(&self) -> Vec<f32> {
        self.values.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

/// Map a percentage onto `levels` intensity steps (0 = idle, levels-1 = full).
/// Out-of-range or NaN input is clamped.
pub fn spark_level(value: f32, levels: usize) -> usize {
    if levels < 2 {
        return 0;
    }
    let top = (levels - 1) as f32;
    let level = (value / 100.0 * top).round();
    if level.is_nan() {
        return 0;
    }
    level.clamp(0.0, top) as usize
}
