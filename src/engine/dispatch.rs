//! Event hooks
//!
//! Each hook returns `true` when the host should suppress the event.

use crate::actor::Actor;
use crate::decision::Decision;
use crate::event::HostEvent;
use crate::item::ItemId;

use super::WorldProtect;

impl WorldProtect {
    fn suppress(&self, decision: &Decision, actor: &dyn Actor) -> bool {
        match decision {
            Decision::Allow => false,
            Decision::Deny { reason } => {
                tracing::debug!(actor = actor.name(), "Suppressed: {}", reason);
                self.actor_state.record_denial(actor.name());
                true
            }
        }
    }

    /// Right click with `held`. Only the held item is checked.
    pub fn on_right_click_attempt(
        &self,
        actor: &dyn Actor,
        _placed: ItemId,
        _clicked: ItemId,
        held: ItemId,
    ) -> bool {
        let Some(index) = self.index() else {
            return false;
        };

        match index.get(held) {
            Some(entry) => {
                let decision = entry.evaluate_right_click(held, actor, &*self.audit);
                self.suppress(&decision, actor)
            }
            None => false,
        }
    }

    /// Left click on `target` with `held`.
    ///
    /// The held item's left-click hook is checked first; if it allows, the
    /// target block's destroy hook decides.
    pub fn on_left_click_attempt(&self, actor: &dyn Actor, held: ItemId, target: ItemId) -> bool {
        let Some(index) = self.index() else {
            return false;
        };

        if let Some(entry) = index.get(held) {
            let decision = entry.evaluate_left_click(held, actor, &*self.audit);
            if self.suppress(&decision, actor) {
                return true;
            }
        }

        if let Some(entry) = index.get(target) {
            let decision = entry.evaluate_destroy(target, actor, &*self.audit);
            return self.suppress(&decision, actor);
        }

        false
    }

    /// Drop per-actor state for a departing actor, whether or not a
    /// blacklist is loaded
    pub fn on_disconnect(&self, actor: &dyn Actor) {
        self.actor_state.forget(actor.name());
    }

    /// Dispatch a serialized host event; returns whether to suppress it
    pub fn handle(&self, event: &HostEvent) -> bool {
        tracing::trace!("{}", event.summary());
        match event {
            HostEvent::BlockPlace {
                player,
                placed,
                clicked,
                held,
            } => self.on_right_click_attempt(player, *placed, *clicked, *held),
            HostEvent::BlockBreak {
                player,
                held,
                target,
            } => self.on_left_click_attempt(player, *held, *target),
            HostEvent::Disconnect { player } => {
                self.on_disconnect(player);
                false
            }
        }
    }
}
