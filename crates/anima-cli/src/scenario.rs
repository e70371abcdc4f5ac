//! YAML scenario files: planner settings, facts, goal and a task library.

use std::path::Path;

use anima_core::{Action, AdjustInt, RequireFact, SetFact, Task, WorldState};
use anima_goap::PlannerConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Live world the scenario actions run against.
#[derive(Debug, Default)]
pub struct SimWorld {
    pub facts: WorldState,
    pub invocations: u64,
}

/// Action vocabulary available to scenario files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioAction {
    /// Write a fact.
    Set(SetFact),
    /// Require a fact to hold, both while planning and when executed.
    Require(RequireFact),
    /// Add to an integer fact.
    Add(AdjustInt),
    /// Fail when executed.
    Fail,
}

impl Action<SimWorld> for ScenarioAction {
    fn check_requirement(&self, state: &WorldState) -> bool {
        match self {
            ScenarioAction::Require(require) => {
                Action::<SimWorld>::check_requirement(require, state)
            }
            _ => true,
        }
    }

    fn apply_effect(&self, state: &mut WorldState) {
        match self {
            ScenarioAction::Set(set) => Action::<SimWorld>::apply_effect(set, state),
            ScenarioAction::Add(add) => Action::<SimWorld>::apply_effect(add, state),
            ScenarioAction::Require(_) | ScenarioAction::Fail => {}
        }
    }

    fn invoke(&self, world: &mut SimWorld) -> bool {
        world.invocations += 1;
        match self {
            ScenarioAction::Fail => false,
            ScenarioAction::Require(_) => self.check_requirement(&world.facts),
            ScenarioAction::Set(_) | ScenarioAction::Add(_) => {
                self.apply_effect(&mut world.facts);
                true
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub actions: Vec<ScenarioAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Agent-private facts.
    #[serde(default)]
    pub start: WorldState,

    /// Facts shared by every agent.
    #[serde(default)]
    pub shared: WorldState,

    pub goal: WorldState,

    pub tasks: Vec<TaskSpec>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        if let Some(task) = scenario.tasks.iter().find(|t| t.actions.is_empty()) {
            bail!("task '{}' has no actions", task.name);
        }
        Ok(scenario)
    }

    /// Private facts merged with the shared ones.
    pub fn facts(&self) -> WorldState {
        let mut facts = self.start.clone();
        facts.merge_shared(&self.shared);
        facts
    }

    pub fn build_tasks(&self) -> Vec<Task<SimWorld>> {
        self.tasks
            .iter()
            .map(|spec| {
                let mut task = Task::new(spec.name.clone());
                for action in &spec.actions {
                    task.add_action(action.clone());
                }
                task
            })
            .collect()
    }
}
