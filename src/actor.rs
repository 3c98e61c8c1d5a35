//! Acting entities and per-actor state
//!
//! The host decides who an actor is and which groups it belongs to. Any
//! state kept per actor lives behind [`ActorState`] so the host can clear it
//! when the actor leaves.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// The entity performing an action
pub trait Actor {
    /// Stable identity used for audit records and per-actor state
    fn name(&self) -> &str;

    /// Whether the actor is a member of `group`
    fn has_group(&self, group: &str) -> bool;
}

/// A plain player record with a fixed group list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Add a group membership
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }
}

impl Actor for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g.eq_ignore_ascii_case(group))
    }
}

/// Per-actor transient state owned outside the rule index
pub trait ActorState: Send + Sync {
    /// Called after an action by `actor` was denied
    fn record_denial(&self, _actor: &str) {}

    /// Drop everything held for `actor`
    fn forget(&self, actor: &str);
}

/// Keeps no state
#[derive(Debug, Default, Clone, Copy)]
pub struct NoActorState;

impl ActorState for NoActorState {
    fn forget(&self, _actor: &str) {}
}

/// Counts denied actions per actor until they disconnect
#[derive(Debug, Default)]
pub struct StrikeCounter {
    strikes: Mutex<HashMap<String, u32>>,
}

impl StrikeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Denials recorded for `actor` since it connected
    pub fn strikes(&self, actor: &str) -> u32 {
        self.strikes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(actor)
            .copied()
            .unwrap_or(0)
    }

    /// Number of actors with at least one strike
    pub fn tracked(&self) -> usize {
        self.strikes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ActorState for StrikeCounter {
    fn record_denial(&self, actor: &str) {
        let mut strikes = self.strikes.lock().unwrap_or_else(PoisonError::into_inner);
        *strikes.entry(actor.to_string()).or_insert(0) += 1;
    }

    fn forget(&self, actor: &str) {
        self.strikes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(actor);
    }
}
