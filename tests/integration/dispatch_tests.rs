//! Integration tests for the event hooks

use std::sync::Arc;

use worldprotect::{ActionKind, ItemId, ItemTable, MemoryAudit, Player, StrikeCounter, WorldProtect};

const STONE: ItemId = ItemId(1);
const AIR: ItemId = ItemId(0);

fn engine_with(text: &str) -> (WorldProtect, Arc<MemoryAudit>) {
    let audit = Arc::new(MemoryAudit::new());
    let engine = WorldProtect::new(ItemTable::classic()).with_audit(audit.clone());
    engine.reload(text);
    (engine, audit)
}

fn right_click(engine: &WorldProtect, player: &Player, held: ItemId) -> bool {
    engine.on_right_click_attempt(player, held, STONE, held)
}

// ============================================================================
// Destroy Hook
// ============================================================================

#[test]
fn test_destroy_denied_for_outsider() {
    let (engine, audit) = engine_with("[obsidian]\non-destroy=groupA\n");
    let outsider = Player::new("outsider");

    assert!(engine.on_left_click_attempt(&outsider, AIR, ItemId(49)));

    let records = audit.entries();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actor, "outsider");
    assert_eq!(records[0].item, ItemId(49));
    assert_eq!(records[0].action, ActionKind::Destroy);
    assert_eq!(records[0].decision, "deny");
}

#[test]
fn test_destroy_allowed_for_member() {
    let (engine, audit) = engine_with("[obsidian]\non-destroy=groupA\n");
    let member = Player::new("member").with_group("groupA");

    assert!(!engine.on_left_click_attempt(&member, AIR, ItemId(49)));
    assert!(audit.is_empty());
}

#[test]
fn test_aliased_destroy_rules_match() {
    let (engine, _audit) = engine_with("[2,3,4]\non-destroy=somegroup\n");
    let outsider = Player::new("outsider");
    let member = Player::new("member").with_group("somegroup");

    for block in [2, 3, 4] {
        assert!(engine.on_left_click_attempt(&outsider, AIR, ItemId(block)));
        assert!(!engine.on_left_click_attempt(&member, AIR, ItemId(block)));
    }
}

// ============================================================================
// Click Hooks
// ============================================================================

#[test]
fn test_right_click_restriction() {
    let (engine, audit) = engine_with("[lava_bucket]\non-right=trusted\n");

    assert!(right_click(&engine, &Player::new("guest"), ItemId(327)));
    assert!(!right_click(&engine, &Player::new("ally").with_group("trusted"), ItemId(327)));
    assert!(!right_click(&engine, &Player::new("guest"), ItemId(326)));
    assert_eq!(audit.len(), 1);
}

#[test]
fn test_left_click_with_held_item_short_circuits() {
    let text = "\
[diamond_pickaxe]
on-left=miners
[bedrock]
on-destroy=admins
";
    let (engine, audit) = engine_with(text);
    let guest = Player::new("guest");

    // Held item denial stops before the block is checked
    assert!(engine.on_left_click_attempt(&guest, ItemId(278), ItemId(7)));
    assert_eq!(audit.len(), 1);
    assert_eq!(audit.entries()[0].action, ActionKind::LeftClick);
}

#[test]
fn test_ignore_groups_exempt_all_hooks() {
    let text = "\
[tnt]
ignore-groups=admins
on-right=demolition
on-left=demolition
on-destroy=demolition
";
    let (engine, audit) = engine_with(text);
    let admin = Player::new("admin").with_group("admins");

    assert!(!right_click(&engine, &admin, ItemId(46)));
    assert!(!engine.on_left_click_attempt(&admin, ItemId(46), ItemId(46)));
    assert!(audit.is_empty());
}

#[test]
fn test_unrestricted_entry_allows_everyone() {
    let (engine, audit) = engine_with("[tnt]\nignore-groups=admins\n");
    let guest = Player::new("guest");

    assert!(engine.is_active());
    assert!(!right_click(&engine, &guest, ItemId(46)));
    assert!(!engine.on_left_click_attempt(&guest, ItemId(46), ItemId(46)));
    assert!(audit.is_empty());
}

// ============================================================================
// No Blacklist
// ============================================================================

#[test]
fn test_empty_blacklist_passes_everything() {
    let strikes = Arc::new(StrikeCounter::new());
    let audit = Arc::new(MemoryAudit::new());
    let engine = WorldProtect::new(ItemTable::classic())
        .with_audit(audit.clone())
        .with_actor_state(strikes.clone());
    let outcome = engine.reload("; all commented out\n# [tnt]\n");

    assert_eq!(outcome.items, 0);
    assert!(!engine.is_active());

    let guest = Player::new("guest");
    for id in [0, 1, 46, 259, 327] {
        assert!(!right_click(&engine, &guest, ItemId(id)));
        assert!(!engine.on_left_click_attempt(&guest, ItemId(id), ItemId(id)));
    }
    engine.on_disconnect(&guest);
    assert!(audit.is_empty());
    assert_eq!(strikes.tracked(), 0);
}

// ============================================================================
// Per-Actor State
// ============================================================================

#[test]
fn test_disconnect_forgets_strikes() {
    let strikes = Arc::new(StrikeCounter::new());
    let engine = WorldProtect::new(ItemTable::classic())
        .with_audit(Arc::new(MemoryAudit::new()))
        .with_actor_state(strikes.clone());
    engine.reload("[tnt]\non-right=demolition\n");

    let guest = Player::new("guest");
    let other = Player::new("other");
    right_click(&engine, &guest, ItemId(46));
    right_click(&engine, &guest, ItemId(46));
    right_click(&engine, &other, ItemId(46));
    assert_eq!(strikes.strikes("guest"), 2);

    engine.on_disconnect(&guest);
    assert_eq!(strikes.strikes("guest"), 0);
    assert_eq!(strikes.strikes("other"), 1);
}

#[test]
fn test_disconnect_forgets_strikes_while_blacklist_cleared() {
    let strikes = Arc::new(StrikeCounter::new());
    let engine = WorldProtect::new(ItemTable::classic())
        .with_audit(Arc::new(MemoryAudit::new()))
        .with_actor_state(strikes.clone());
    engine.reload("[tnt]\non-right=demolition\n");

    let guest = Player::new("guest");
    assert!(right_click(&engine, &guest, ItemId(46)));
    assert_eq!(strikes.strikes("guest"), 1);

    engine.reload("; cleared\n");
    assert!(!engine.is_active());
    engine.on_disconnect(&guest);

    engine.reload("[tnt]\non-right=demolition\n");
    assert_eq!(strikes.strikes("guest"), 0);
    assert_eq!(strikes.tracked(), 0);
}
