//! Blacklist rules
//!
//! A [`RuleEntry`] holds the policy for one or more items. The [`RuleIndex`]
//! maps each configured item to its entry; items declared in the same
//! section share one entry.

pub mod entry;
pub mod index;

pub use entry::RuleEntry;
pub use index::{RuleId, RuleIndex, RuleIndexBuilder};

use serde::Serialize;
use std::fmt;

/// Kind of interaction being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Breaking a block
    Destroy,

    /// Swinging the held item
    LeftClick,

    /// Using or placing the held item
    RightClick,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::Destroy,
        ActionKind::LeftClick,
        ActionKind::RightClick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Destroy => "destroy",
            ActionKind::LeftClick => "left_click",
            ActionKind::RightClick => "right_click",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
