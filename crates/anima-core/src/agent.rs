use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a planning agent.
///
/// Agents are stepped in ascending id order so that a run over a shared
/// world is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn stable_id(self) -> u64 {
        u64::from(self.0)
    }
}

impl From<u32> for AgentId {
    fn from(value: u32) -> Self {
        AgentId(value)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}
