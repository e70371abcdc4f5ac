#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AttrKey, WorldState, WorldValue};

/// Smallest unit of a task: a precondition, a planning-time effect and a
/// runtime side effect.
///
/// `check_requirement` and `apply_effect` only ever see snapshots owned by the
/// planner. `invoke` runs against the live execution context `W` while a plan
/// is being carried out and is never called during search.
pub trait Action<W> {
    fn check_requirement(&self, _state: &WorldState) -> bool {
        true
    }

    fn apply_effect(&self, _state: &mut WorldState) {}

    fn invoke(&self, _world: &mut W) -> bool {
        true
    }
}

/// Does nothing, always succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Noop;

impl<W> Action<W> for Noop {}

/// Planning effect: write `value` under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetFact {
    pub key: AttrKey,
    pub value: WorldValue,
}

impl SetFact {
    pub fn new(key: AttrKey, value: impl Into<WorldValue>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl<W> Action<W> for SetFact {
    fn apply_effect(&self, state: &mut WorldState) {
        state.set(self.key, self.value.clone());
    }
}

/// Precondition: the fact under `key` must exist and equal `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequireFact {
    pub key: AttrKey,
    pub value: WorldValue,
}

impl RequireFact {
    pub fn new(key: AttrKey, value: impl Into<WorldValue>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl<W> Action<W> for RequireFact {
    fn check_requirement(&self, state: &WorldState) -> bool {
        state.get(self.key) == Some(&self.value)
    }
}

/// Planning effect: add `delta` to an integer fact.
///
/// Missing keys and non-integer facts are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjustInt {
    pub key: AttrKey,
    pub delta: i32,
}

impl AdjustInt {
    pub fn new(key: AttrKey, delta: i32) -> Self {
        Self { key, delta }
    }
}

impl<W> Action<W> for AdjustInt {
    fn apply_effect(&self, state: &mut WorldState) {
        if let Some(WorldValue::Int(v)) = state.get_mut(self.key) {
            *v = v.saturating_add(self.delta);
        }
    }
}
