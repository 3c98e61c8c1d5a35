//! worldprotect - Per-item blacklist rules for multiplayer game servers
//!
//! This library decides whether a player may destroy, left-click or
//! right-click with a given block or item, based on a small text blacklist.
//!
//! # Features
//!
//! - **Blacklist format**: `[id,name,...]` sections with `key=value` options
//! - **Shared sections**: every item in a section header uses the same rule
//! - **Group exemptions**: per-hook groups plus section-wide `ignore-groups`
//! - **Hot reload**: a new index is built off to the side and swapped in whole
//! - **Audit logging**: console echo and size-rotated JSONL file of denials
//!
//! # Example
//!
//! ```
//! use worldprotect::{ItemId, ItemTable, Player, WorldProtect};
//!
//! let engine = WorldProtect::new(ItemTable::classic());
//! engine.reload("[tnt]\non-right=demolition\n");
//!
//! let guest = Player::new("guest");
//! let tnt = ItemId(46);
//! assert!(engine.on_right_click_attempt(&guest, tnt, ItemId(1), tnt));
//! ```

pub mod actor;
pub mod audit;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod event;
pub mod item;
pub mod parser;
pub mod rules;
pub mod telemetry;

// Re-exports for convenience
pub use actor::{Actor, ActorState, Player, StrikeCounter};
pub use audit::{AuditEntry, AuditLogger, AuditSink, MemoryAudit};
pub use config::Config;
pub use decision::Decision;
pub use engine::{ReloadOutcome, WorldProtect};
pub use error::{LoadError, ParseWarning};
pub use event::HostEvent;
pub use item::{ItemId, ItemRegistry, ItemTable};
pub use parser::LoadReport;
pub use rules::{ActionKind, RuleEntry, RuleIndex};
