//! Hook decisions
//!
//! Every blacklist hook answers with a [`Decision`]. The dispatch layer turns
//! a deny into "suppress the event".

/// Result of evaluating one hook of a rule entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the action go through
    Allow,

    /// Block the action
    Deny { reason: String },
}

impl Decision {
    /// Create an allow decision
    pub fn allow() -> Self {
        Decision::Allow
    }

    /// Create a deny decision
    pub fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: reason.into(),
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is a deny decision
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny { .. })
    }

    /// Get the deny reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Deny { reason } => Some(reason),
        }
    }
}
