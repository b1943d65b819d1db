//! Rate history buffer
//!
//! Fixed-capacity window over the most recent local rates. Every push that
//! overflows the window hands back the evicted value so the caller can undo
//! the push exactly.

use std::collections::VecDeque;

/// Ordered window of recent local rates, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RateHistory {
    rates: VecDeque<f64>,
    capacity: usize,
}

impl RateHistory {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rates: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Create a history holding `capacity` copies of `value`.
    pub fn filled(capacity: usize, value: f64) -> Self {
        let mut history = Self::new(capacity);
        history.reset(value);
        history
    }

    /// Append `rate`, evicting and returning the oldest value when the
    /// capacity is exceeded.
    pub fn push(&mut self, rate: f64) -> Option<f64> {
        self.rates.push_back(rate);
        if self.rates.len() > self.capacity {
            self.rates.pop_front()
        } else {
            None
        }
    }

    /// Reverse the immediately preceding `push`.
    ///
    /// `evicted` must be the value that push returned.
    pub fn undo_push(&mut self, evicted: Option<f64>) {
        if let Some(value) = evicted {
            self.rates.push_front(value);
        }
        self.rates.pop_back();
    }

    /// Arithmetic mean, summed oldest to newest. `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.rates.is_empty() {
            return None;
        }
        let sum: f64 = self.rates.iter().sum();
        Some(sum / self.rates.len() as f64)
    }

    /// Replace the contents with `capacity` copies of `value`.
    pub fn reset(&mut self, value: f64) {
        self.reset_with_count(value, self.capacity);
    }

    /// Replace the contents with `count` copies of `value`.
    pub fn reset_with_count(&mut self, value: f64, count: usize) {
        self.rates.clear();
        self.rates.extend(std::iter::repeat(value).take(count));
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.rates.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.rates.iter().copied().collect()
    }
}
