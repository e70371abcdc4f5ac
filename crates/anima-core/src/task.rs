use std::borrow::Cow;
use std::fmt;

use crate::{Action, WorldState};

/// An ordered sequence of actions that the planner treats as one edge.
///
/// During search a task is tested and applied as a whole. During execution
/// its actions are invoked one at a time, one per tick, by the caller.
pub struct Task<W> {
    name: Cow<'static, str>,
    actions: Vec<Box<dyn Action<W>>>,
}

impl<W> Task<W> {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Action<W> + 'static) -> Self {
        self.add_action(action);
        self
    }

    pub fn add_action(&mut self, action: impl Action<W> + 'static) {
        self.actions.push(Box::new(action));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// True iff every action's precondition holds for `state`.
    pub fn check_requirements(&self, state: &WorldState) -> bool {
        self.actions.iter().all(|a| a.check_requirement(state))
    }

    /// Copy of `state` with every action's effect applied in order.
    pub fn apply_result(&self, state: &WorldState) -> WorldState {
        let mut next = state.clone();
        for action in &self.actions {
            action.apply_effect(&mut next);
        }
        next
    }

    /// Run the runtime side effect of the action at `index`.
    ///
    /// Returns `false` when the action fails or `index` is out of range.
    pub fn execute_action(&self, index: usize, world: &mut W) -> bool {
        match self.actions.get(index) {
            Some(action) => action.invoke(world),
            None => {
                tracing::warn!(
                    task = %self.name,
                    index,
                    len = self.actions.len(),
                    "action index out of range"
                );
                false
            }
        }
    }

    /// Whether `index` is the last action of this task.
    pub fn is_task_finished(&self, index: usize) -> bool {
        index + 1 == self.actions.len()
    }
}

impl<W> fmt::Debug for Task<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}
