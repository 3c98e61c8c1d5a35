//! Blacklist engine for worldprotect
//!
//! Owns the current [`RuleIndex`] and answers the host's event hooks.
//! Reloads build a new index off to the side and publish it with a single
//! reference swap, so each dispatch call sees one whole index.

mod dispatch;

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::actor::{ActorState, NoActorState};
use crate::audit::{AuditLogger, AuditSink};
use crate::config::Config;
use crate::error::{LoadError, ParseWarning};
use crate::item::{ItemRegistry, ItemTable};
use crate::parser::blacklist;
use crate::rules::RuleIndex;

/// Result of a successful reload
#[derive(Debug, Clone, Default)]
pub struct ReloadOutcome {
    /// Configured items in the new index
    pub items: usize,

    /// Distinct rule entries in the new index
    pub entries: usize,

    /// Content problems that were skipped
    pub warnings: Vec<ParseWarning>,
}

/// The blacklist engine
pub struct WorldProtect {
    index: RwLock<Option<Arc<RuleIndex>>>,
    registry: Box<dyn ItemRegistry + Send + Sync>,
    actor_state: Arc<dyn ActorState>,
    audit: Arc<dyn AuditSink>,
}

impl WorldProtect {
    /// Create an engine with no blacklist loaded
    pub fn new<R>(registry: R) -> Self
    where
        R: ItemRegistry + Send + Sync + 'static,
    {
        Self {
            index: RwLock::new(None),
            registry: Box::new(registry),
            actor_state: Arc::new(NoActorState),
            audit: Arc::new(AuditLogger::console()),
        }
    }

    /// Build an engine from configuration and load its blacklist file.
    ///
    /// A missing or unreadable blacklist leaves the engine permissive.
    pub fn from_config(config: &Config) -> Self {
        let mut table = ItemTable::classic();
        if let Some(path) = config.item_table_path() {
            match ItemTable::from_file(&path) {
                Ok(extra) => table.extend(extra),
                Err(e) => tracing::warn!("Could not load item table {}: {}", path.display(), e),
            }
        }

        let engine = Self::new(table).with_audit(Arc::new(AuditLogger::new(&config.audit)));
        if let Err(e) = engine.reload_from_path(&config.blacklist_path()) {
            tracing::debug!("Starting without a blacklist: {}", e);
        }
        engine
    }

    /// Use `state` for per-actor bookkeeping
    pub fn with_actor_state(mut self, state: Arc<dyn ActorState>) -> Self {
        self.actor_state = state;
        self
    }

    /// Send audit records to `audit`
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// The index currently in effect
    pub fn index(&self) -> Option<Arc<RuleIndex>> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a blacklist is loaded
    pub fn is_active(&self) -> bool {
        self.index().is_some()
    }

    /// Number of configured items
    pub fn rule_count(&self) -> usize {
        self.index().map_or(0, |index| index.len())
    }

    fn publish(&self, index: Option<RuleIndex>) {
        let next = index.map(Arc::new);
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Replace the blacklist with one parsed from `text`.
    ///
    /// Content problems are skipped and reported; text with no items clears
    /// the blacklist.
    pub fn reload(&self, text: &str) -> ReloadOutcome {
        self.reload_source(text, "blacklist")
    }

    fn reload_source(&self, text: &str, source: &str) -> ReloadOutcome {
        let report = blacklist::parse_source(text, source, &*self.registry);
        let outcome = ReloadOutcome {
            items: report.item_count(),
            entries: report.index.as_ref().map_or(0, RuleIndex::entry_count),
            warnings: report.warnings,
        };

        self.publish(report.index);

        if outcome.items == 0 {
            tracing::info!("No blacklist entries in {}", source);
        } else {
            tracing::info!(
                "Loaded {} blacklist items ({} rules, {} warnings) from {}",
                outcome.items,
                outcome.entries,
                outcome.warnings.len(),
                source
            );
        }
        outcome
    }

    /// Replace the blacklist with the contents of `path`.
    ///
    /// If the file cannot be read the current blacklist stays in effect.
    pub fn reload_from_path(&self, path: &Path) -> Result<ReloadOutcome, LoadError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                let err = LoadError::from_io(path, e);
                tracing::warn!("Could not load blacklist: {}", err);
                return Err(err);
            }
        };

        Ok(self.reload_source(&text, &path.display().to_string()))
    }
}
