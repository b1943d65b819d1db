//! Live-bound rate value
//!
//! The smoother writes the published rate into a `RateHandle`; audio targets
//! hold clones of the same handle and read it whenever they need the current
//! value. The f64 is stored as bits in an atomic so readers on an audio
//! thread never block.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, continuously observed scalar.
///
/// Clones refer to the same underlying value.
#[derive(Debug, Clone)]
pub struct RateHandle {
    bits: Arc<AtomicU64>,
}

impl RateHandle {
    pub fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Whether both handles are bound to the same value.
    pub fn same_binding(&self, other: &RateHandle) -> bool {
        Arc::ptr_eq(&self.bits, &other.bits)
    }
}

impl Default for RateHandle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let handle = RateHandle::new(1.0);
        let observer = handle.clone();
        handle.set(1.37);
        assert_eq!(observer.get(), 1.37);
        assert!(observer.same_binding(&handle));
    }

    #[test]
    fn test_separate_handles_are_distinct() {
        let a = RateHandle::new(1.0);
        let b = RateHandle::new(1.0);
        assert!(!a.same_binding(&b));
    }

    #[test]
    fn test_value_visible_across_threads() {
        let handle = RateHandle::new(1.0);
        let writer = handle.clone();
        std::thread::spawn(move || writer.set(0.85))
            .join()
            .unwrap();
        assert_eq!(handle.get(), 0.85);
    }
}
