//! Item to rule entry index
//!
//! Entries live in an arena; items point at arena slots. Several items may
//! point at the same slot, which is how one section's options reach every
//! item listed in its header.

use std::collections::HashMap;

use crate::item::ItemId;

use super::RuleEntry;

/// Arena slot of a [`RuleEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

/// Immutable item to rule mapping
#[derive(Debug, Clone)]
pub struct RuleIndex {
    entries: Vec<RuleEntry>,
    items: HashMap<ItemId, RuleId>,
}

impl RuleIndex {
    /// Start building an index
    pub fn builder() -> RuleIndexBuilder {
        RuleIndexBuilder::default()
    }

    /// Rule entry for an item, if one is configured
    pub fn get(&self, item: ItemId) -> Option<&RuleEntry> {
        self.items.get(&item).map(|id| &self.entries[id.0])
    }

    /// Arena slot an item points at
    pub fn rule_id(&self, item: ItemId) -> Option<RuleId> {
        self.items.get(&item).copied()
    }

    pub fn entry(&self, id: RuleId) -> Option<&RuleEntry> {
        self.entries.get(id.0)
    }

    /// Items sharing the entry of `item`, in ascending order
    pub fn aliases(&self, item: ItemId) -> Vec<ItemId> {
        let Some(id) = self.rule_id(item) else {
            return Vec::new();
        };

        let mut aliases: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, slot)| **slot == id)
            .map(|(item, _)| *item)
            .collect();
        aliases.sort();
        aliases
    }

    /// Configured items in ascending order
    pub fn items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self.items.keys().copied().collect();
        items.sort();
        items
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    /// Number of configured items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a built index
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct rule entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Mutable index used while parsing
#[derive(Debug, Default)]
pub struct RuleIndexBuilder {
    entries: Vec<RuleEntry>,
    items: HashMap<ItemId, RuleId>,
}

impl RuleIndexBuilder {
    /// Allocate a fresh, unrestricted entry
    pub fn add_entry(&mut self) -> RuleId {
        self.entries.push(RuleEntry::new());
        RuleId(self.entries.len() - 1)
    }

    /// Point `item` at `id`, replacing any earlier binding
    pub fn bind(&mut self, item: ItemId, id: RuleId) {
        self.items.insert(item, id);
    }

    pub fn entry_mut(&mut self, id: RuleId) -> Option<&mut RuleEntry> {
        self.entries.get_mut(id.0)
    }

    /// Number of items bound so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish the index, dropping entries no item points at.
    ///
    /// Returns `None` when no item was ever bound.
    pub fn build(self) -> Option<RuleIndex> {
        if self.items.is_empty() {
            return None;
        }

        let mut remap: HashMap<RuleId, RuleId> = HashMap::new();
        let mut used: Vec<RuleId> = self.items.values().copied().collect();
        used.sort_by_key(|id| id.0);
        used.dedup();

        let mut old_entries: Vec<Option<RuleEntry>> = self.entries.into_iter().map(Some).collect();
        let mut entries = Vec::with_capacity(used.len());
        for old in used {
            if let Some(entry) = old_entries.get_mut(old.0).and_then(Option::take) {
                remap.insert(old, RuleId(entries.len()));
                entries.push(entry);
            }
        }

        let items = self
            .items
            .into_iter()
            .filter_map(|(item, old)| remap.get(&old).map(|new| (item, *new)))
            .collect();

        Some(RuleIndex { entries, items })
    }
}
