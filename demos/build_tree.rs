//! # Growing an RRT over a bounded configuration space
//!
//! ## Usage
//! Run the program with:
//! ```bash
//! cargo run --example build_tree -- --start=-5,-5 --goal=5,20 \
//!     --limit=-10,10 --limit=-25,25 --step-size 1.0
//! cargo run --example build_tree -- --config planner.json --start=0 --goal=1
//! ```
//! The config file holds `{"limits": [[min, max], ...], "step_size": s, "iterations": n}`.

use clap::Parser;
use config_rrt::rrt::{Configuration, PlannerConfig, GOAL_INDEX, RRT, START_INDEX};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version, about = "Grow an RRT between two configurations", long_about = None)]
struct CliArgs {
    /// JSON planner configuration; overrides --limit, --step-size and --iterations
    #[arg(short, long)]
    config: Option<String>,

    /// Start configuration, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    start: Vec<f64>,

    /// Goal configuration, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    goal: Vec<f64>,

    /// Bounds of one dimension as `min,max`; repeat once per dimension
    #[arg(long = "limit", value_parser = parse_limit, allow_hyphen_values = true)]
    limits: Vec<(f64, f64)>,

    #[arg(long, default_value_t = 0.01)]
    step_size: f64,

    #[arg(short, long, default_value_t = 100)]
    iterations: usize,

    /// Seed for the sampler; drawn from OS entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full tree and the nodes added per iteration instead of a summary
    #[arg(long)]
    dump_tree: bool,
}

fn parse_limit(value: &str) -> Result<(f64, f64), String> {
    let (min, max) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `min,max`, got `{value}`"))?;
    let min = min.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let max = max.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((min, max))
}

fn main() {
    let args: CliArgs = CliArgs::parse();

    let config = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path).expect("Failed to read the config file");
            PlannerConfig::from_json_str(&source).expect("Failed to parse the config file")
        }
        None => {
            PlannerConfig::new(args.limits.clone(), args.iterations).with_step_size(args.step_size)
        }
    };

    let start = Configuration::new(args.start.clone());
    let goal = Configuration::new(args.goal.clone());
    let planner = match args.seed {
        Some(seed) => RRT::<f64>::with_rng(start, goal, &config, StdRng::seed_from_u64(seed)),
        None => RRT::<f64>::from_config(start, goal, &config),
    };
    let mut rrt = match planner {
        Ok(rrt) => rrt,
        Err(e) => {
            eprintln!("Error creating the planner: {}", e);
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let hops = match rrt.run() {
        Ok(hops) => hops,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = started.elapsed();

    if args.dump_tree {
        println!("{}", rrt.to_json().pretty(2));
        return;
    }

    let (closest, distance) = rrt.nearest_to_goal().expect("The tree always holds the start");
    let start_component = rrt
        .tree()
        .reachable_from(START_INDEX)
        .expect("The start is always node 0");
    let summary = json::object! {
        config: config.to_json(),
        hops: hops,
        nodes: rrt.node_count(),
        edges: rrt.tree().edge_count(),
        start_component_size: start_component.len(),
        goal_degree: rrt.neighbors(GOAL_INDEX).map(|n| n.len()).unwrap_or(0),
        nearest_to_goal: closest,
        nearest_to_goal_distance: distance,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    };
    println!("{}", summary.pretty(2));
}
