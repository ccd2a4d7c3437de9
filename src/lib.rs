//! Annotated stopwatch with automatic time-unit scaling.
//!
//! `mark_start` optionally prints a message and returns a monotonic
//! clock reading; `mark_stop` takes that reading back, scales the
//! elapsed time to an explicit or automatically chosen unit, prints
//! the annotated result, and returns it. Timer identity lives entirely
//! in the caller's hands, so timers nest and interleave for free.
//!
//! ```
//! use tictoc::{StartOptions, StopOptions, Stopwatch};
//!
//! let mut sw = Stopwatch::new();
//! let t0 = sw.mark_start(StartOptions {
//!     message: Some("Loading".to_string()),
//!     timestamp: false,
//! });
//! // ... the work being timed ...
//! let elapsed = sw.mark_stop(t0, StopOptions::default());
//! println!("took {} {}", elapsed.value, elapsed.unit);
//! ```

pub mod logging;
pub mod stopwatch;
pub mod unit;

pub use crate::stopwatch::{Measurement, StartOptions, StopOptions, Stopwatch};
pub use crate::unit::{ParseTimeUnitError, TimeUnit};
