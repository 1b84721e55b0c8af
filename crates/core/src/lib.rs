//! Live frosted-glass effect: shared snapshot caching for scene targets,
//! Gaussian blur, and overlay consumers refreshed on a timed cadence.

pub mod blurring;
pub mod overlay;
pub mod scene;
pub mod shared;
pub mod snapshot;
