//! Rapidly-exploring Random Tree (RRT) growth over a bounded N-dimensional configuration space.
//!
//! The planner connects a start and a goal configuration by repeatedly sampling the
//! space on a grid, finding the nearest tree node and extending towards the sample in
//! fixed-length hops. The resulting graph is left to the caller for path extraction.

pub mod error;
pub mod rrt;

pub use error::{Result, RrtError};
