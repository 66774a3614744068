//! Serializable diagnostics produced alongside the detector output.
//!
//! [`FrameReport`] is what the binaries dump as JSON: input shape, the
//! parameters used, per-stage timings and one [`ChainDescriptor`] per chain
//! with its strength statistics, NFA and principal-axis geometry.

pub mod report;
pub mod timing;

pub use report::{ChainDescriptor, FrameReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
