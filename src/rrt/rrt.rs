use crate::error::{Result, RrtError};
use crate::rrt::config::PlannerConfig;
use crate::rrt::neighbors::{LinearNearestNeighbors, NearestNeighbors};
use crate::rrt::sampling::{SamplingDistribution, UniformGridDistribution};
use crate::rrt::state::Configuration;
use crate::rrt::steering;
use crate::rrt::termination::TerminationCondition;
use crate::rrt::tree::Tree;
use num_traits::Float;
use rand::Rng;
use json::JsonValue;
use std::collections::BTreeSet;
use std::ops::Range;

/// Index of the start configuration in the tree.
pub const START_INDEX: usize = 0;
/// Index of the goal configuration in the tree.
pub const GOAL_INDEX: usize = 1;

/// A Rapidly-exploring Random Tree (RRT) planner over a bounded configuration space.
///
/// The start and goal are inserted as the first two nodes, with no edge between
/// them. Every iteration draws a sample, finds the nearest node and walks towards
/// the sample in hops of `step_size`, adding one node and one edge per hop, until
/// the last node is within `step_size` of the sample. The planner never inspects
/// the goal while growing; callers extract paths from the finished graph.
///
/// Template Parameters:
/// - `F`: The floating-point type.
/// - `NN`: The nearest neighbors data structure.
pub struct RRT<F: Float, NN: NearestNeighbors<F> = LinearNearestNeighbors<F>> {
    start: Configuration<F>,
    goal: Configuration<F>,
    /// The length of one extension hop.
    step_size: F,
    /// The number of iterations performed by `run`.
    iterations: usize,
    tree: Tree<F>,
    /// The node indices added by each completed iteration, in order.
    growth: Vec<Range<usize>>,
    sampling_distribution: Box<dyn SamplingDistribution<F>>,
    nearest_neighbors: NN,
}

impl<F: Float + 'static, NN: NearestNeighbors<F>> RRT<F, NN> {
    /// Constructs a new planner with the default step size.
    ///
    /// Parameters:
    /// - `start`: The start configuration (node 0).
    /// - `goal`: The goal configuration (node 1).
    /// - `limits`: The `(min, max)` bounds, one pair per dimension.
    /// - `iterations`: The number of iterations performed by `run`.
    ///
    /// Fails with `DimensionMismatch` unless start, goal and limits share the same dimensionality.
    pub fn new(
        start: Configuration<F>,
        goal: Configuration<F>,
        limits: Vec<(F, F)>,
        iterations: usize,
    ) -> Result<Self> {
        Self::from_config(start, goal, &PlannerConfig::new(limits, iterations))
    }

    /// Constructs a new planner sampling with a generator seeded from OS entropy.
    pub fn from_config(
        start: Configuration<F>,
        goal: Configuration<F>,
        config: &PlannerConfig<F>,
    ) -> Result<Self> {
        config.validate()?;
        let sampling_distribution =
            UniformGridDistribution::new(config.limits.clone(), config.step_size)?;
        Self::with_sampling(start, goal, config, Box::new(sampling_distribution))
    }

    /// Constructs a new planner sampling with the given generator.
    pub fn with_rng<R: Rng + 'static>(
        start: Configuration<F>,
        goal: Configuration<F>,
        config: &PlannerConfig<F>,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let sampling_distribution =
            UniformGridDistribution::with_rng(config.limits.clone(), config.step_size, rng)?;
        Self::with_sampling(start, goal, config, Box::new(sampling_distribution))
    }
}

impl<F: Float, NN: NearestNeighbors<F>> RRT<F, NN> {
    /// Constructs a new planner drawing samples from `sampling_distribution`.
    ///
    /// The distribution must produce configurations with one coordinate per entry in
    /// `config.limits`.
    pub fn with_sampling(
        start: Configuration<F>,
        goal: Configuration<F>,
        config: &PlannerConfig<F>,
        sampling_distribution: Box<dyn SamplingDistribution<F>>,
    ) -> Result<Self> {
        config.validate()?;
        start.check_dimension(&goal)?;
        for found in [config.dimension(), sampling_distribution.dimension()] {
            if found != start.dimension() {
                return Err(RrtError::DimensionMismatch {
                    expected: start.dimension(),
                    found,
                });
            }
        }

        let mut rrt = Self {
            start: start.clone(),
            goal: goal.clone(),
            step_size: config.step_size,
            iterations: config.iterations,
            tree: Tree::new(),
            growth: Vec::new(),
            sampling_distribution,
            nearest_neighbors: NN::new(),
        };
        rrt.add_node(start)?;
        rrt.add_node(goal)?;
        log::debug!(
            "created {}-dimensional RRT, step size {:?}, {} iterations",
            rrt.start.dimension(),
            rrt.step_size.to_f64(),
            rrt.iterations
        );
        Ok(rrt)
    }

    /// Runs the configured number of iterations.
    ///
    /// Returns the number of extension hops performed.
    pub fn run(&mut self) -> Result<usize> {
        self.build_graph(self.iterations)
    }

    /// Runs exactly `iterations` iterations of the growth loop. Does not terminate early
    /// when the goal is reached.
    ///
    /// Returns the number of extension hops performed. Any error aborts the run.
    pub fn build_graph(&mut self, iterations: usize) -> Result<usize> {
        let mut hops = 0;
        for iteration in 0..iterations {
            hops += self.iteration(iteration)?;
        }
        log::debug!(
            "ran {} iterations: {} hops, {} nodes",
            iterations,
            hops,
            self.tree.len()
        );
        Ok(hops)
    }

    /// Runs iterations until `termination` evaluates to true. The condition is checked
    /// before every iteration.
    ///
    /// Returns the number of extension hops performed.
    pub fn build_graph_until<T: TerminationCondition>(
        &mut self,
        termination: &mut T,
    ) -> Result<usize> {
        let mut hops = 0;
        let mut iterations = 0;
        while !termination.evaluate() {
            hops += self.iteration(iterations)?;
            iterations += 1;
        }
        log::debug!(
            "terminated after {} iterations: {} hops, {} nodes",
            iterations,
            hops,
            self.tree.len()
        );
        Ok(hops)
    }

    /// Expands the tree by one iteration.
    ///
    /// 1. Sample a configuration from the sampling distribution.
    /// 2. Find the nearest node in the tree to the sample.
    /// 3. Step from the nearest node towards the sample, adding a node and an edge
    ///    per hop, until the last node is within `step_size` of the sample.
    ///
    /// Returns the number of hops. Fails with `StalledStep` if a hop does not bring the
    /// tree strictly closer to the sample.
    fn iteration(&mut self, iteration: usize) -> Result<usize> {
        let sample = self.sampling_distribution.sample();
        let first_new = self.tree.len();

        let nearest_index = self.nearest_neighbors.nearest_one(&sample)?;
        let mut near_index = nearest_index;
        let mut near = self.tree.node_at(near_index)?.clone();

        let mut hops = 0;
        let mut remaining = near.distance(&sample)?;
        while remaining > self.step_size {
            let step_node = steering::step(&near, &sample, self.step_size)?;
            let next_remaining = step_node.distance(&sample)?;
            if !(next_remaining < remaining) {
                return Err(RrtError::StalledStep);
            }
            let new_index = self.add_node(step_node.clone())?;
            self.tree.add_edge(near_index, new_index)?;
            near = step_node;
            near_index = new_index;
            remaining = next_remaining;
            hops += 1;
        }
        self.growth.push(first_new..self.tree.len());

        log::trace!(
            "iteration {}: sample {:?}, nearest {}, {} hops",
            iteration,
            sample.values().iter().map(|v| v.to_f64()).collect::<Vec<_>>(),
            nearest_index,
            hops
        );
        Ok(hops)
    }

    /// Adds a node to the tree and the nearest neighbors data structure.
    fn add_node(&mut self, config: Configuration<F>) -> Result<usize> {
        self.nearest_neighbors.add(&config, self.tree.len())?;
        Ok(self.tree.add_node(config))
    }

    /// Returns the index of the node closest to the goal, excluding the goal node
    /// itself, and its distance to the goal.
    pub fn nearest_to_goal(&self) -> Result<(usize, F)> {
        let mut nearest: Option<(usize, F)> = None;
        for (index, node) in self.tree.nodes().iter().enumerate() {
            if index == GOAL_INDEX {
                continue;
            }
            let distance = node.distance(&self.goal)?;
            match nearest {
                Some((_, shortest)) if !(distance < shortest) => {}
                _ => nearest = Some((index, distance)),
            }
        }
        nearest.ok_or(RrtError::EmptyTree)
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn node_at(&self, index: usize) -> Result<&Configuration<F>> {
        self.tree.node_at(index)
    }

    /// Returns the indices connected to node `index`.
    pub fn neighbors(&self, index: usize) -> Result<&BTreeSet<usize>> {
        self.tree.neighbors(index)
    }

    pub fn tree(&self) -> &Tree<F> {
        &self.tree
    }

    /// Returns, for each completed iteration, the range of node indices it added.
    /// Iterations whose sample was already within reach add an empty range.
    pub fn growth(&self) -> &[Range<usize>] {
        &self.growth
    }

    /// Serializes the tree together with the per-iteration growth, each iteration
    /// as a `[first, end)` pair of node indices, so the growth can be replayed.
    pub fn to_json(&self) -> JsonValue {
        let mut growth = JsonValue::new_array();
        for range in &self.growth {
            let _ = growth.push(json::array![range.start, range.end]);
        }
        let mut value = self.tree.to_json();
        value["iterations"] = growth;
        value
    }

    pub fn start(&self) -> &Configuration<F> {
        &self.start
    }

    pub fn goal(&self) -> &Configuration<F> {
        &self.goal
    }

    pub fn step_size(&self) -> F {
        self.step_size
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Deconstructs the planner into its tree, without cloning it.
    pub fn into_tree(self) -> Tree<F> {
        self.tree
    }
}
