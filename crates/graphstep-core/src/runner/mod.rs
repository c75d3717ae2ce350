//! Drivers that step an [`Algorithm`](crate::algorithm::Algorithm) to completion.
//!
//! - [`TimedRunner`]: interactive, pausable, paced by [`RunnerConfig`]
//! - [`HeadlessRunner`]: synchronous drain with no delay, for tests and
//!   algorithms that run other algorithms as sub-routines

mod config;
mod headless;
mod timed;

pub use config::{RunnerConfig, MAX_SPEED};
pub use headless::{run_headless, HeadlessRunner};
pub use timed::{PendingResult, RunnerState, TimedRunner};
