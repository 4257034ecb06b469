// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-keyed output branches.
//!
//! A branch is an ordered sequence of optional primitives keyed by an integer
//! branch id. Two placement policies exist, decided once per run:
//!
//! - **Indexed** (non-graft): a single branch 0 pre-sized to the highest
//!   source id, each primitive written at slot `id - 1` so output position
//!   mirrors the 1-based source table, gaps staying explicit `None` slots.
//! - **Grafted**: one branch per 0-based property id, primitives appended in
//!   source-iteration order without gaps.

use std::collections::BTreeMap;

/// Placement policy for a reconstruction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// Gap-preserving placement into branch 0 by source id.
    Indexed {
        /// Slot count, the highest source id in the filtered selection.
        len: usize,
    },
    /// Sequential append into per-property branches.
    Grafted,
}

/// Ordered collection of primitives grouped into branches.
#[derive(Debug, Clone)]
pub struct Branches<T> {
    mode: GroupingMode,
    branches: BTreeMap<u32, Vec<Option<T>>>,
}

impl<T> Branches<T> {
    /// Indexed-mode collection: branch 0 exists up front with `len` empty
    /// slots.
    pub fn indexed(len: usize) -> Self {
        let mut branches = BTreeMap::new();
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        branches.insert(0, slots);
        Self {
            mode: GroupingMode::Indexed { len },
            branches,
        }
    }

    /// Grafted-mode collection: branches appear as properties are seen.
    pub fn grafted() -> Self {
        Self {
            mode: GroupingMode::Grafted,
            branches: BTreeMap::new(),
        }
    }

    /// The placement policy of this collection.
    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Place a primitive built from source entity `id` with 1-based
    /// `property`.
    pub fn place(&mut self, property: u32, id: u32, value: T) {
        match self.mode {
            GroupingMode::Indexed { len } => {
                let slot = (id as usize).saturating_sub(1);
                debug_assert!(slot < len, "source id {} beyond indexed branch", id);
                if let Some(entry) = self
                    .branches
                    .get_mut(&0)
                    .and_then(|slots| slots.get_mut(slot))
                {
                    *entry = Some(value);
                }
            }
            GroupingMode::Grafted => {
                self.branches
                    .entry(property.saturating_sub(1))
                    .or_default()
                    .push(Some(value));
            }
        }
    }

    /// Branch keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.branches.keys().copied()
    }

    /// Slots of one branch.
    pub fn branch(&self, key: u32) -> Option<&[Option<T>]> {
        self.branches.get(&key).map(|slots| slots.as_slice())
    }

    /// Non-empty values of one branch in slot order.
    pub fn branch_values(&self, key: u32) -> impl Iterator<Item = &T> + '_ {
        self.branches
            .get(&key)
            .into_iter()
            .flat_map(|slots| slots.iter().filter_map(|slot| slot.as_ref()))
    }

    /// Iterate `(branch key, slots)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Option<T>])> + '_ {
        self.branches.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of branches.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Count of placed (non-gap) primitives across all branches.
    pub fn value_count(&self) -> usize {
        self.branches
            .values()
            .map(|slots| slots.iter().filter(|slot| slot.is_some()).count())
            .sum()
    }

    /// True if no primitive was placed.
    pub fn is_empty(&self) -> bool {
        self.value_count() == 0
    }

    /// Swap out the contents of an existing branch (join consolidation).
    /// The branch must have been created by a previous `place`.
    pub(crate) fn replace_branch(&mut self, key: u32, values: Vec<Option<T>>) {
        debug_assert!(
            self.branches.contains_key(&key),
            "replacing a branch never seen: {}",
            key
        );
        self.branches.insert(key, values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_preserves_slots() {
        let mut branches: Branches<&str> = Branches::indexed(5);
        branches.place(3, 2, "b");
        branches.place(7, 5, "e");

        let slots = branches.branch(0).unwrap();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[1], Some("b"));
        assert_eq!(slots[4], Some("e"));
        assert!(slots[0].is_none() && slots[2].is_none() && slots[3].is_none());
        assert_eq!(branches.branch_count(), 1);
    }

    #[test]
    fn test_grafted_appends_per_property() {
        let mut branches: Branches<u32> = Branches::grafted();
        branches.place(2, 10, 100);
        branches.place(1, 11, 110);
        branches.place(2, 12, 120);

        assert_eq!(branches.branch_count(), 2);
        // Property 1 → branch 0, property 2 → branch 1.
        assert_eq!(branches.branch(0).unwrap(), &[Some(110)]);
        assert_eq!(branches.branch(1).unwrap(), &[Some(100), Some(120)]);
    }

    #[test]
    fn test_empty_indexed_branch_exists() {
        let branches: Branches<u32> = Branches::indexed(0);
        assert_eq!(branches.branch(0).unwrap().len(), 0);
        assert!(branches.is_empty());
    }

    #[test]
    fn test_value_count() {
        let mut branches: Branches<u32> = Branches::indexed(4);
        branches.place(1, 1, 1);
        branches.place(1, 4, 4);
        assert_eq!(branches.value_count(), 2);
        assert!(!branches.is_empty());
    }
}
