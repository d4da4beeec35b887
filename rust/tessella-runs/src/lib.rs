//! Half-open value-bearing intervals ("runs") and their interval arithmetic.
//!
//! A [`Run`] is the fundamental unit of run-length-encoded series storage:
//! a half-open offset interval `[start, end)`. Offsets are signed primitive
//! integers whose extreme values act as the ±infinity sentinels, so a run
//! can describe an infinite head or tail segment with ordinary comparisons.
//!
//! # Key items
//!
//! - [`Run`] - the interval type, with intersection, containment and length
//!   queries.
//! - [`OffsetType`] - extension trait defining the infinity sentinels and
//!   pinned translation over any signed primitive integer.
//! - [`find_period`] - locates the fixed-width, anchor-aligned bucket that
//!   contains a given offset (the workhorse of grid resampling).

pub mod offset;
pub mod run;

pub use offset::OffsetType;
pub use run::{Run, find_period};
