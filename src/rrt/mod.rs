pub mod config;
pub mod neighbors;
pub mod rrt;
pub mod sampling;
pub mod state;
pub mod steering;
pub mod termination;
pub mod tree;

pub use config::PlannerConfig;
pub use neighbors::{nearest, KdTreeNearestNeighbors, LinearNearestNeighbors, NearestNeighbors};
pub use rrt::{GOAL_INDEX, RRT, START_INDEX};
pub use sampling::{SamplingDistribution, UniformGridDistribution};
pub use state::Configuration;
pub use termination::{MaxIterationsTermination, TerminationCondition, TimeoutTermination};
pub use tree::Tree;
