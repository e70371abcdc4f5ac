//! Depth-bounded best-first GOAP planner over `anima-core` tasks.
//!
//! [`Planner::construct_plan`] searches for a sequence of tasks that turns a
//! start state into a goal. [`GoapAgent`] drives planning and step-by-step
//! execution for one agent, one action per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod error;
mod node;
pub mod plan;
pub mod planner;

pub use agent::{tick_agents, AgentTick, GoapAgent};
pub use config::PlannerConfig;
pub use error::{InvalidRequest, PlanError};
pub use plan::{Plan, PlanOutcome, PlanStep};
pub use planner::Planner;
