//! Symbolic world state, actions and tasks for GOAP planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod task;
pub mod world;

pub use action::{Action, AdjustInt, Noop, RequireFact, SetFact};
pub use agent::AgentId;
pub use task::Task;
pub use world::{AttrKey, WorldState, WorldValue};
