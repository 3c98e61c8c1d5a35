//! Integration tests for loading and reloading the blacklist

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tempfile::{NamedTempFile, TempDir};
use worldprotect::audit::NullAudit;
use worldprotect::{Config, ItemId, ItemTable, LoadError, Player, WorldProtect};

fn engine() -> WorldProtect {
    WorldProtect::new(ItemTable::classic()).with_audit(Arc::new(NullAudit))
}

fn blacklist_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn test_reload_from_file() {
    let file = blacklist_file("[tnt,lighter]\non-right=admins\n");
    let engine = engine();

    let outcome = engine.reload_from_path(file.path()).unwrap();
    assert_eq!(outcome.items, 2);
    assert_eq!(outcome.entries, 1);
    assert_eq!(engine.rule_count(), 2);
}

#[test]
fn test_failed_reload_keeps_previous_rules() {
    let file = blacklist_file("[tnt]\non-right=admins\n");
    let engine = engine();
    engine.reload_from_path(file.path()).unwrap();

    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let err = engine.reload_from_path(&missing).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));

    let guest = Player::new("guest");
    assert!(engine.on_right_click_attempt(&guest, ItemId(46), ItemId(1), ItemId(46)));
}

#[test]
fn test_directory_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let engine = engine();
    assert!(engine.reload_from_path(dir.path()).is_err());
    assert!(!engine.is_active());
}

#[test]
fn test_from_config_loads_blacklist_and_item_table() {
    let dir = TempDir::new().unwrap();
    let blacklist = dir.path().join("blacklist.txt");
    let items = dir.path().join("items.toml");
    std::fs::write(&blacklist, "[ray_gun]\non-right=scientists\n").unwrap();
    std::fs::write(&items, "[items]\nray_gun = 5000\n").unwrap();

    let mut config = Config::default();
    config.blacklist.path = blacklist.to_string_lossy().into_owned();
    config.items.table = Some(items.to_string_lossy().into_owned());
    config.audit.console = false;

    let engine = WorldProtect::from_config(&config);
    assert_eq!(engine.rule_count(), 1);

    let guest = Player::new("guest");
    assert!(engine.on_right_click_attempt(&guest, ItemId(5000), ItemId(1), ItemId(5000)));
}

#[test]
fn test_from_config_writes_audit_file() {
    let dir = TempDir::new().unwrap();
    let blacklist = dir.path().join("blacklist.txt");
    let log = dir.path().join("logs/blacklist.log");
    std::fs::write(&blacklist, "[tnt]\non-right=demolition\n").unwrap();

    let mut config = Config::default();
    config.blacklist.path = blacklist.to_string_lossy().into_owned();
    config.audit.console = false;
    config.audit.file = Some(log.to_string_lossy().into_owned());

    let engine = WorldProtect::from_config(&config);
    let guest = Player::new("guest");
    assert!(engine.on_right_click_attempt(&guest, ItemId(46), ItemId(1), ItemId(46)));

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains(r#""actor":"guest""#));
    assert!(content.contains(r#""action":"right_click""#));
}

// ============================================================================
// Atomic Swap
// ============================================================================

#[test]
fn test_dispatch_never_sees_partial_index() {
    // Both versions restrict items 1 and 2 together, with different groups.
    // A reader must see both items under the same version.
    const OLD: &str = "[1]\non-destroy=old\n[2]\non-destroy=old\n";
    const NEW: &str = "[1]\non-destroy=new\n[2]\non-destroy=new\n";

    let engine = Arc::new(engine());
    engine.reload(OLD);
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let engine = Arc::clone(&engine);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..500 {
                engine.reload(if i % 2 == 0 { NEW } else { OLD });
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let old_member = Player::new("o").with_group("old");
    while !done.load(Ordering::SeqCst) {
        let Some(index) = engine.index() else {
            panic!("index disappeared during reload");
        };
        let first = index.get(ItemId(1)).unwrap();
        let second = index.get(ItemId(2)).unwrap();
        assert_eq!(first, second);

        // Same snapshot semantics through the hook
        let _ = engine.on_left_click_attempt(&old_member, ItemId(0), ItemId(1));
    }

    writer.join().unwrap();
}
