use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attribute key of a single fact.
pub type AttrKey = u8;

/// Value of a single fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum WorldValue {
    Bool(bool),
    Int(i32),
    Text(String),
}

impl WorldValue {
    /// Distance between two facts stored under the same key.
    ///
    /// Values of different kinds are not comparable and contribute nothing.
    pub fn distance(&self, other: &WorldValue) -> u32 {
        match (self, other) {
            (WorldValue::Bool(a), WorldValue::Bool(b)) => u32::from(a != b),
            (WorldValue::Int(a), WorldValue::Int(b)) => a.abs_diff(*b),
            (WorldValue::Text(a), WorldValue::Text(b)) => u32::from(a != b),
            _ => 0,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            WorldValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for WorldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldValue::Bool(v) => write!(f, "{v}"),
            WorldValue::Int(v) => write!(f, "{v}"),
            WorldValue::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for WorldValue {
    fn from(value: bool) -> Self {
        WorldValue::Bool(value)
    }
}

impl From<i32> for WorldValue {
    fn from(value: i32) -> Self {
        WorldValue::Int(value)
    }
}

impl From<&str> for WorldValue {
    fn from(value: &str) -> Self {
        WorldValue::Text(value.to_owned())
    }
}

impl From<String> for WorldValue {
    fn from(value: String) -> Self {
        WorldValue::Text(value)
    }
}

/// A full or partial set of facts.
///
/// Used both for an agent's knowledge of the world and for goals, which only
/// name the facts that matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldState {
    facts: BTreeMap<AttrKey, WorldValue>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn contains(&self, key: AttrKey) -> bool {
        self.facts.contains_key(&key)
    }

    pub fn get(&self, key: AttrKey) -> Option<&WorldValue> {
        self.facts.get(&key)
    }

    pub fn get_mut(&mut self, key: AttrKey) -> Option<&mut WorldValue> {
        self.facts.get_mut(&key)
    }

    /// Insert or overwrite a fact, returning the previous value.
    pub fn set(&mut self, key: AttrKey, value: impl Into<WorldValue>) -> Option<WorldValue> {
        self.facts.insert(key, value.into())
    }

    /// Builder form of [`WorldState::set`].
    pub fn with(mut self, key: AttrKey, value: impl Into<WorldValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttrKey, WorldValue> {
        self.facts.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = AttrKey> + '_ {
        self.facts.keys().copied()
    }

    /// Sum of per-fact distances over the keys present in both states.
    pub fn distance(&self, other: &WorldState) -> u64 {
        self.facts
            .iter()
            .filter_map(|(key, value)| {
                other
                    .facts
                    .get(key)
                    .map(|theirs| u64::from(value.distance(theirs)))
            })
            .sum()
    }

    /// Whether this state meets `goal`.
    ///
    /// Goal facts whose key this state does not track count as met; only
    /// tracked facts have to compare equal.
    pub fn satisfies(&self, goal: &WorldState) -> bool {
        goal.facts.iter().all(|(key, wanted)| match self.facts.get(key) {
            Some(current) => current == wanted,
            None => true,
        })
    }

    /// Copy in every shared fact whose key this state does not already hold.
    ///
    /// Private facts win over shared ones; no key is ever removed.
    pub fn merge_shared(&mut self, shared: &WorldState) {
        for (key, value) in &shared.facts {
            self.facts.entry(*key).or_insert_with(|| value.clone());
        }
    }
}

impl<V: Into<WorldValue>> FromIterator<(AttrKey, V)> for WorldState {
    fn from_iter<I: IntoIterator<Item = (AttrKey, V)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WorldState {
    type Item = (&'a AttrKey, &'a WorldValue);
    type IntoIter = btree_map::Iter<'a, AttrKey, WorldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.facts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
