use anima_core::{Task, WorldState};

use crate::error::{InvalidRequest, PlanError, Result};
use crate::node::{NodeArena, NodeId};
use crate::plan::{Plan, PlanOutcome};
use crate::PlannerConfig;

/// Depth-bounded best-first planner.
///
/// The search always expands the open node with the lowest `f`. A child is
/// admitted only if its `f` does not exceed its parent's, and the first
/// admitted child at `max_depth` ends the whole search. Visited states are
/// not tracked, so the same state may be expanded along several paths.
///
/// Scratch memory is kept between calls, which is why planning needs
/// `&mut self`. Run concurrent requests on separate planners.
#[derive(Debug)]
pub struct Planner {
    config: PlannerConfig,
    arena: NodeArena,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            arena: NodeArena::with_depth_hint(config.max_depth),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.set_depth(config.max_depth);
        self.config = config;
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Change the search horizon. Releases the retained scratch memory.
    pub fn set_depth(&mut self, max_depth: u8) {
        self.config.max_depth = max_depth;
        self.arena.reset(max_depth);
    }

    pub fn set_allow_partial_plan_at_depth(&mut self, allow: bool) {
        self.config.allow_partial_plan_at_depth = allow;
    }

    /// Search for a sequence of `tasks` that turns `start` into `goal`.
    ///
    /// `Ok` means the goal was reached. The plan can still be empty: when the
    /// start already meets the goal, or when the goal was only reached at the
    /// depth limit and partial plans are disabled (see
    /// [`PlanOutcome::is_truncated`]).
    pub fn construct_plan<'t, W>(
        &mut self,
        start: &WorldState,
        goal: &WorldState,
        tasks: &'t [Task<W>],
    ) -> Result<PlanOutcome<'t, W>> {
        validate(start, goal, tasks)?;

        tracing::debug!(
            max_depth = self.config.max_depth,
            allow_partial = self.config.allow_partial_plan_at_depth,
            tasks = tasks.len(),
            start = start.len(),
            goal = goal.len(),
            "constructing plan"
        );

        let result = self.search(start, goal, tasks);
        self.arena.clear();
        result
    }

    fn search<'t, W>(
        &mut self,
        start: &WorldState,
        goal: &WorldState,
        tasks: &'t [Task<W>],
    ) -> Result<PlanOutcome<'t, W>> {
        let max_depth = u32::from(self.config.max_depth);
        self.arena.push_root(start.clone(), start.distance(goal));

        let mut expanded: usize = 0;
        let mut terminal: Option<NodeId> = None;
        let mut depth_limited = false;

        'search: while let Some(current) = self.arena.best_open() {
            let (g, f) = {
                let node = self.arena.node(current);
                if node.state.satisfies(goal) {
                    terminal = Some(current);
                    break;
                }
                (node.g, node.f)
            };

            expanded += 1;
            tracing::trace!(node = ?current, g, f, open = self.arena.open_len(), "expanding");

            for (index, task) in tasks.iter().enumerate() {
                let state = &self.arena.node(current).state;
                if !task.check_requirements(state) {
                    continue;
                }

                let child_state = task.apply_result(state);
                let child_f = u64::from(g) + child_state.distance(goal) + 1;
                if f < child_f {
                    tracing::trace!(task = task.name(), child_f, "rejected");
                    continue;
                }

                let child = self.arena.push_child(current, index, child_state, child_f);
                tracing::trace!(task = task.name(), child = ?child, child_f, "admitted");

                if g + 1 >= max_depth {
                    depth_limited = true;
                    // Only the node that tripped the limit can have reached the goal,
                    // and only if it is not already past the limit.
                    if g < max_depth && self.arena.node(child).state.satisfies(goal) {
                        terminal = Some(child);
                    }
                    break 'search;
                }
            }

            self.arena.close(current);
        }

        tracing::debug!(
            expanded,
            nodes = self.arena.len(),
            found = terminal.is_some(),
            depth_limited,
            "search finished"
        );

        match (terminal, depth_limited) {
            (Some(id), false) => Ok(PlanOutcome::new(self.recover(tasks, id), false)),
            (Some(id), true) => {
                let plan = if self.config.allow_partial_plan_at_depth {
                    self.recover(tasks, id)
                } else {
                    Plan::empty()
                };
                Ok(PlanOutcome::new(plan, true))
            }
            (None, true) => Err(PlanError::DepthLimitReached {
                max_depth: self.config.max_depth,
            }),
            (None, false) => Err(PlanError::Exhausted { expanded }),
        }
    }

    fn recover<'t, W>(&self, tasks: &'t [Task<W>], terminal: NodeId) -> Plan<'t, W> {
        Plan::from_goal_to_start(tasks, self.arena.tasks_to_root(terminal))
    }
}

fn validate<W>(start: &WorldState, goal: &WorldState, tasks: &[Task<W>]) -> Result<()> {
    if tasks.is_empty() {
        return Err(InvalidRequest::NoTasks.into());
    }
    if goal.is_empty() {
        return Err(InvalidRequest::EmptyGoal.into());
    }
    if goal.len() > start.len() {
        return Err(InvalidRequest::GoalWiderThanStart {
            goal: goal.len(),
            start: start.len(),
        }
        .into());
    }
    Ok(())
}
