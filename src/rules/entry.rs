//! Per-item policy and the hook evaluation protocol

use crate::actor::Actor;
use crate::audit::{AuditEntry, AuditSink};
use crate::decision::Decision;
use crate::item::ItemId;

use super::ActionKind;

/// Policy attached to one blacklist section.
///
/// A hook with no configuration is unrestricted. A configured hook allows
/// only actors in one of its groups or in `ignore_groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleEntry {
    ignore_groups: Vec<String>,
    on_destroy: Option<Vec<String>>,
    on_left_click: Option<Vec<String>>,
    on_right_click: Option<Vec<String>>,
}

impl RuleEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups exempt from every configured hook
    pub fn ignore_groups(&self) -> &[String] {
        &self.ignore_groups
    }

    pub fn set_ignore_groups(&mut self, groups: Vec<String>) {
        self.ignore_groups = groups;
    }

    /// Exempt groups for one hook, `None` when the hook is unrestricted
    pub fn hook(&self, action: ActionKind) -> Option<&[String]> {
        match action {
            ActionKind::Destroy => self.on_destroy.as_deref(),
            ActionKind::LeftClick => self.on_left_click.as_deref(),
            ActionKind::RightClick => self.on_right_click.as_deref(),
        }
    }

    /// Mark a hook as restricted, exempting `groups`
    pub fn set_hook(&mut self, action: ActionKind, groups: Vec<String>) {
        let slot = match action {
            ActionKind::Destroy => &mut self.on_destroy,
            ActionKind::LeftClick => &mut self.on_left_click,
            ActionKind::RightClick => &mut self.on_right_click,
        };
        *slot = Some(groups);
    }

    pub fn is_restricted(&self, action: ActionKind) -> bool {
        self.hook(action).is_some()
    }

    /// True when no hook is configured
    pub fn is_unrestricted(&self) -> bool {
        ActionKind::ALL.iter().all(|a| !self.is_restricted(*a))
    }

    /// Whether `actor` bypasses the given restricted hook
    fn exempts(&self, hook: &[String], actor: &dyn Actor) -> bool {
        hook.iter()
            .chain(self.ignore_groups.iter())
            .any(|group| actor.has_group(group))
    }

    /// Evaluate one hook for `actor` acting on `item`.
    ///
    /// A deny writes exactly one record to `audit`.
    pub fn evaluate(
        &self,
        action: ActionKind,
        item: ItemId,
        actor: &dyn Actor,
        audit: &dyn AuditSink,
    ) -> Decision {
        let hook = match self.hook(action) {
            Some(hook) => hook,
            None => return Decision::allow(),
        };

        if self.exempts(hook, actor) {
            return Decision::allow();
        }

        let reason = format!("{} of item {} denied", action, item);
        let entry = AuditEntry::denied(actor.name(), item, action, reason.clone());
        if let Err(e) = audit.write(&entry) {
            tracing::warn!("Failed to write blacklist audit record: {}", e);
        }
        Decision::deny(reason)
    }

    pub fn evaluate_destroy(&self, item: ItemId, actor: &dyn Actor, audit: &dyn AuditSink) -> Decision {
        self.evaluate(ActionKind::Destroy, item, actor, audit)
    }

    pub fn evaluate_left_click(&self, item: ItemId, actor: &dyn Actor, audit: &dyn AuditSink) -> Decision {
        self.evaluate(ActionKind::LeftClick, item, actor, audit)
    }

    pub fn evaluate_right_click(&self, item: ItemId, actor: &dyn Actor, audit: &dyn AuditSink) -> Decision {
        self.evaluate(ActionKind::RightClick, item, actor, audit)
    }
}
