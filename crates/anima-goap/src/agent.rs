use std::sync::Arc;

use anima_core::{AgentId, Task, WorldState};

use crate::{PlanError, Planner};

/// What a single [`GoapAgent::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentTick {
    /// A new plan of `steps` tasks was adopted.
    Planned { steps: usize, depth_limited: bool },
    /// Planning succeeded without anything to do. The agent plans again on
    /// its next tick.
    Idle,
    /// Planning failed. The agent plans again on its next tick.
    PlanFailed(PlanError),
    /// Action `action` of task `task` ran and the plan continues.
    Running { task: usize, action: usize },
    /// Action `action` of task `task` failed; the plan was dropped.
    ActionFailed { task: usize, action: usize },
    /// The last action of the plan ran.
    Completed,
}

/// Per-agent planning and plan execution.
///
/// Each tick either builds a plan (private facts merged with the shared ones)
/// or runs exactly one action of the current plan. A failed action drops the
/// plan and the next tick replans; nothing is retried in place.
pub struct GoapAgent<W> {
    id: AgentId,
    tasks: Arc<[Task<W>]>,
    blackboard: WorldState,
    goal: WorldState,
    plan: Vec<usize>,
    plan_step: usize,
    task_step: usize,
    needs_plan: bool,
}

impl<W> GoapAgent<W> {
    pub fn new(
        id: impl Into<AgentId>,
        tasks: Arc<[Task<W>]>,
        blackboard: WorldState,
        goal: WorldState,
    ) -> Self {
        Self {
            id: id.into(),
            tasks,
            blackboard,
            goal,
            plan: Vec::new(),
            plan_step: 0,
            task_step: 0,
            needs_plan: true,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn blackboard(&self) -> &WorldState {
        &self.blackboard
    }

    pub fn goal(&self) -> &WorldState {
        &self.goal
    }

    /// Replace the goal; the current plan is dropped.
    pub fn set_goal(&mut self, goal: WorldState) {
        self.goal = goal;
        self.request_replan();
    }

    /// Indices into [`GoapAgent::tasks`], in execution order.
    pub fn plan(&self) -> &[usize] {
        &self.plan
    }

    pub fn needs_plan(&self) -> bool {
        self.needs_plan
    }

    /// The task the next tick will execute from, if a plan is active.
    pub fn current_task(&self) -> Option<&Task<W>> {
        if self.needs_plan {
            return None;
        }
        self.plan.get(self.plan_step).map(|i| &self.tasks[*i])
    }

    pub fn request_replan(&mut self) {
        self.plan.clear();
        self.plan_step = 0;
        self.task_step = 0;
        self.needs_plan = true;
    }

    pub fn tick(&mut self, planner: &mut Planner, shared: &WorldState, world: &mut W) -> AgentTick {
        if self.needs_plan {
            return self.replan(planner, shared);
        }

        let Some(&task_index) = self.plan.get(self.plan_step) else {
            self.request_replan();
            return AgentTick::Completed;
        };

        let task = &self.tasks[task_index];
        let action = self.task_step;
        if !task.execute_action(action, world) {
            tracing::warn!(
                agent = %self.id,
                task = task.name(),
                action,
                "action failed, dropping plan"
            );
            self.request_replan();
            return AgentTick::ActionFailed {
                task: task_index,
                action,
            };
        }

        if task.is_task_finished(action) {
            self.plan_step += 1;
            self.task_step = 0;
        } else {
            self.task_step += 1;
        }

        if self.plan_step == self.plan.len() {
            tracing::debug!(agent = %self.id, "plan completed");
            self.request_replan();
            return AgentTick::Completed;
        }

        AgentTick::Running {
            task: task_index,
            action,
        }
    }

    fn replan(&mut self, planner: &mut Planner, shared: &WorldState) -> AgentTick {
        let mut facts = self.blackboard.clone();
        facts.merge_shared(shared);

        self.request_replan();
        match planner.construct_plan(&facts, &self.goal, &self.tasks[..]) {
            Ok(outcome) => {
                self.plan = outcome.plan().task_indices();
                if self.plan.is_empty() {
                    tracing::debug!(
                        agent = %self.id,
                        truncated = outcome.is_truncated(),
                        "nothing to execute"
                    );
                    return AgentTick::Idle;
                }

                self.needs_plan = false;
                tracing::debug!(
                    agent = %self.id,
                    steps = self.plan.len(),
                    tasks = ?outcome.plan().task_names(),
                    "adopted plan"
                );
                AgentTick::Planned {
                    steps: self.plan.len(),
                    depth_limited: outcome.depth_limited(),
                }
            }
            Err(err) => {
                tracing::warn!(agent = %self.id, error = %err, "planning failed");
                AgentTick::PlanFailed(err)
            }
        }
    }
}

/// Tick every agent once, in ascending id order.
pub fn tick_agents<W>(
    agents: &mut [GoapAgent<W>],
    planner: &mut Planner,
    shared: &WorldState,
    world: &mut W,
) -> Vec<(AgentId, AgentTick)> {
    agents.sort_by_key(|a| a.id.stable_id());
    let mut ticks = Vec::with_capacity(agents.len());
    for agent in agents.iter_mut() {
        let tick = agent.tick(planner, shared, world);
        ticks.push((agent.id, tick));
    }
    ticks
}
