//! Host events
//!
//! Serializable form of the three events the blacklist listens to, for hosts
//! that forward events as JSON rather than calling the dispatch methods.

use serde::Deserialize;

use crate::actor::Player;
use crate::item::ItemId;

/// An event delivered by the host server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Right click: placing or using the held item
    BlockPlace {
        player: Player,
        placed: ItemId,
        clicked: ItemId,
        held: ItemId,
    },

    /// Left click on a block with the held item
    BlockBreak {
        player: Player,
        held: ItemId,
        target: ItemId,
    },

    /// The player left the server
    Disconnect { player: Player },
}

impl HostEvent {
    /// Parse an event from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The acting player
    pub fn player(&self) -> &Player {
        match self {
            HostEvent::BlockPlace { player, .. }
            | HostEvent::BlockBreak { player, .. }
            | HostEvent::Disconnect { player } => player,
        }
    }

    /// Get a summary of the event for logging
    pub fn summary(&self) -> String {
        match self {
            HostEvent::BlockPlace { player, held, .. } => {
                format!("{} right-clicked with {}", player.name, held)
            }
            HostEvent::BlockBreak {
                player,
                held,
                target,
            } => format!("{} left-clicked {} with {}", player.name, target, held),
            HostEvent::Disconnect { player } => format!("{} disconnected", player.name),
        }
    }
}
