// Audio module - how the adaptive rate reaches playback
//
// The engine never mixes audio. It publishes a scalar through a RateHandle
// and binds that handle to host-provided adjustment targets.

pub mod adjustment;
pub mod rate_handle;
pub mod router;

pub use adjustment::{AdjustableProperty, AdjustmentTarget, TrackAdjustments};
pub use rate_handle::RateHandle;
pub use router::AdjustmentRouter;
