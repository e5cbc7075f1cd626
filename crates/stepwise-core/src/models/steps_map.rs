//! Ordered mapping from step ids to their current state.

use std::{fmt, hash::Hash};

use indexmap::IndexMap;
use serde::Serialize;

use super::{aggregate, StepData, StepStatus};

/// Bound satisfied by every type usable as a step id.
///
/// Workflows normally use a small `Copy` enum; strings and integers work too.
pub trait StepKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> StepKey for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Mapping from every declared step id to its [`StepData`], in declaration
/// order.
///
/// The key set is fixed when the map is built; only the values change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepsMap<K: StepKey>(IndexMap<K, StepData>);

impl<K: StepKey> StepsMap<K> {
    /// Builds a map with every id `Waiting`. Repeated ids collapse into the
    /// first occurrence.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self(
            ids.into_iter()
                .map(|id| (id, StepData::waiting()))
                .collect(),
        )
    }

    /// Get the state of a step, if it was declared.
    pub fn get(&self, id: &K) -> Option<&StepData> {
        self.0.get(id)
    }

    /// Get the status of a step, if it was declared.
    pub fn status(&self, id: &K) -> Option<StepStatus> {
        self.0.get(id).map(|data| data.status)
    }

    /// Check whether the id was declared.
    pub fn contains(&self, id: &K) -> bool {
        self.0.contains_key(id)
    }

    /// Get the number of declared steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no steps were declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over steps in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, StepData> {
        self.0.iter()
    }

    /// Iterate over step ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }

    /// Aggregate status, recomputed from the current per-step statuses.
    pub fn global_state(&self) -> StepStatus {
        aggregate(self.0.values().map(|data| data.status))
    }

    /// Replaces the state of an existing step. Returns `false`, leaving the
    /// map untouched, when the id was never declared.
    pub(crate) fn replace(&mut self, id: &K, data: StepData) -> bool {
        match self.0.get_mut(id) {
            Some(slot) => {
                *slot = data;
                true
            }
            None => false,
        }
    }

    /// Puts every step back to `Waiting`.
    pub(crate) fn reset(&mut self) {
        for data in self.0.values_mut() {
            *data = StepData::waiting();
        }
    }
}

impl<'a, K: StepKey> IntoIterator for &'a StepsMap<K> {
    type Item = (&'a K, &'a StepData);
    type IntoIter = indexmap::map::Iter<'a, K, StepData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
