use thiserror::Error;

/// A planning request that breaks the planner's preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("no candidate tasks supplied")]
    NoTasks,

    #[error("goal names no facts")]
    EmptyGoal,

    #[error("goal names {goal} facts but the start state only holds {start}")]
    GoalWiderThanStart { goal: usize, start: usize },
}

/// Why `construct_plan` did not produce a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid planning request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    #[error("search exhausted after {expanded} expansions without reaching the goal")]
    Exhausted { expanded: usize },

    #[error("depth limit {max_depth} reached before the goal")]
    DepthLimitReached { max_depth: u8 },
}

impl PlanError {
    /// True when the request was rejected before any search ran.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, PlanError::InvalidRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
