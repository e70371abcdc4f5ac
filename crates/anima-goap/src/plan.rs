use core::fmt;
use std::iter::Rev;
use std::slice;

use anima_core::Task;

/// One task of a plan together with its index in the candidate list it was
/// chosen from.
pub struct PlanStep<'t, W> {
    pub index: usize,
    pub task: &'t Task<W>,
}

impl<W> Clone for PlanStep<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for PlanStep<'_, W> {}

impl<W> fmt::Debug for PlanStep<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStep")
            .field("index", &self.index)
            .field("task", &self.task.name())
            .finish()
    }
}

/// Tasks chosen by the planner, in execution order (start first).
pub struct Plan<'t, W> {
    steps: Vec<PlanStep<'t, W>>,
}

impl<'t, W> Plan<'t, W> {
    pub(crate) fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Build a plan from the goal-to-start order produced by walking parent
    /// links back from the terminal node.
    pub(crate) fn from_goal_to_start(tasks: &'t [Task<W>], reversed: Vec<usize>) -> Self {
        let steps = reversed
            .into_iter()
            .rev()
            .map(|index| PlanStep {
                index,
                task: &tasks[index],
            })
            .collect();
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PlanStep<'t, W>] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &'t Task<W>> + '_ {
        self.steps.iter().map(|s| s.task)
    }

    /// Steps in the order the search recovered them: nearest the goal first.
    pub fn iter_goal_to_start(&self) -> Rev<slice::Iter<'_, PlanStep<'t, W>>> {
        self.steps.iter().rev()
    }

    /// Candidate-list indices in execution order.
    pub fn task_indices(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.index).collect()
    }

    pub fn task_names(&self) -> Vec<&'t str> {
        self.steps.iter().map(|s| s.task.name()).collect()
    }
}

impl<W> Clone for Plan<'_, W> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<W> fmt::Debug for Plan<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.steps.iter()).finish()
    }
}

/// A successful planning result.
///
/// `depth_limited` marks a goal that was only reached by the node that also
/// hit the depth limit. Such a plan is empty unless the planner was configured
/// to keep partial plans at depth.
pub struct PlanOutcome<'t, W> {
    plan: Plan<'t, W>,
    depth_limited: bool,
}

impl<'t, W> PlanOutcome<'t, W> {
    pub(crate) fn new(plan: Plan<'t, W>, depth_limited: bool) -> Self {
        Self {
            plan,
            depth_limited,
        }
    }

    pub fn plan(&self) -> &Plan<'t, W> {
        &self.plan
    }

    pub fn into_plan(self) -> Plan<'t, W> {
        self.plan
    }

    pub fn depth_limited(&self) -> bool {
        self.depth_limited
    }

    /// Goal reached but the path was withheld because of the depth limit.
    pub fn is_truncated(&self) -> bool {
        self.depth_limited && self.plan.is_empty()
    }
}

impl<W> fmt::Debug for PlanOutcome<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanOutcome")
            .field("plan", &self.plan)
            .field("depth_limited", &self.depth_limited)
            .finish()
    }
}
