//! anima - goal-oriented action planning from the command line.
//!
//! - `anima plan` - plan once for a scenario and print the result
//! - `anima simulate` - tick a group of agents against a shared world

mod scenario;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use anima_core::{AgentId, Task};
use anima_goap::{tick_agents, AgentTick, GoapAgent, Planner};

use crate::scenario::{Scenario, SimWorld};

#[derive(Parser)]
#[command(name = "anima")]
#[command(about = "Goal-oriented action planner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan once and print the chosen tasks
    Plan {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Override the scenario's search depth
        #[arg(long)]
        depth: Option<u8>,

        /// Withhold plans that were only found at the depth limit
        #[arg(long)]
        strict: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run agents against a live world, one action per agent per tick
    Simulate {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Number of agents sharing the task library
        #[arg(long, default_value_t = 10)]
        agents: u32,

        /// Number of ticks to run
        #[arg(long, default_value_t = 8)]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Plan {
            scenario,
            depth,
            strict,
            json,
        } => plan(&scenario, depth, strict, json),
        Commands::Simulate {
            scenario,
            agents,
            ticks,
        } => simulate(&scenario, agents, ticks),
    }
}

fn plan(path: &Path, depth: Option<u8>, strict: bool, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let tasks = scenario.build_tasks();

    let mut planner = Planner::new(scenario.planner);
    if let Some(depth) = depth {
        planner.set_depth(depth);
    }
    if strict {
        planner.set_allow_partial_plan_at_depth(false);
    }

    let facts = scenario.facts();
    tracing::info!(
        scenario = %path.display(),
        facts = %facts,
        goal = %scenario.goal,
        tasks = tasks.len(),
        "Planning"
    );

    let started = Instant::now();
    let outcome = planner
        .construct_plan(&facts, &scenario.goal, &tasks)
        .with_context(|| format!("No plan for {}", path.display()))?;
    let elapsed = started.elapsed();

    let plan = outcome.plan();
    if json {
        let report = serde_json::json!({
            "tasks": plan.task_names(),
            "depth_limited": outcome.depth_limited(),
            "truncated": outcome.is_truncated(),
            "elapsed_us": micros(elapsed),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if outcome.is_truncated() {
        println!("Goal reached at the depth limit; plan withheld (--strict)");
    } else if plan.is_empty() {
        println!("Goal already satisfied");
    } else {
        for (i, task) in plan.iter().enumerate() {
            println!("{:>3}. {}", i + 1, task.name());
        }
        if outcome.depth_limited() {
            println!("(found at the depth limit)");
        }
    }
    println!("Time(us): {}", elapsed.as_micros());
    Ok(())
}

fn simulate(path: &Path, agent_count: u32, ticks: u64) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let tasks: Arc<[Task<SimWorld>]> = Arc::from(scenario.build_tasks());

    let mut planner = Planner::new(scenario.planner);
    let mut world = SimWorld {
        facts: scenario.shared.clone(),
        ..Default::default()
    };
    let mut agents: Vec<GoapAgent<SimWorld>> = (0..agent_count)
        .map(|id| {
            GoapAgent::new(
                AgentId(id),
                tasks.clone(),
                scenario.start.clone(),
                scenario.goal.clone(),
            )
        })
        .collect();

    tracing::info!(
        scenario = %path.display(),
        agents = agent_count,
        ticks,
        "Starting simulation"
    );

    let started = Instant::now();
    for tick in 0..ticks {
        let shared = world.facts.clone();
        let results = tick_agents(&mut agents, &mut planner, &shared, &mut world);
        tracing::info!(tick, summary = %summarize(&results), world = %world.facts, "Tick");
    }
    let elapsed = started.elapsed();

    println!("World: {}", world.facts);
    println!("Actions invoked: {}", world.invocations);
    println!("Time(ms): {}", elapsed.as_millis());
    Ok(())
}

fn summarize(results: &[(AgentId, AgentTick)]) -> String {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (_, tick) in results {
        let label = match tick {
            AgentTick::Planned { .. } => "planned",
            AgentTick::Idle => "idle",
            AgentTick::PlanFailed(_) => "plan_failed",
            AgentTick::Running { .. } => "running",
            AgentTick::ActionFailed { .. } => "action_failed",
            AgentTick::Completed => "completed",
        };
        *counts.entry(label).or_default() += 1;
    }
    counts
        .iter()
        .map(|(label, n)| format!("{label}={n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole microseconds, saturating at `u64::MAX`.
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
