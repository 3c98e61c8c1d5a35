//! Identifier resolution for blacklist tokens

use crate::item::{ItemId, ItemRegistry};

/// Resolve a header token to an item identifier.
///
/// Numeric tokens are taken as-is. Anything else goes through `registry`;
/// no match, or a match on [`ItemId::NONE`], yields `None`.
pub fn resolve<R>(token: &str, registry: &R) -> Option<ItemId>
where
    R: ItemRegistry + ?Sized,
{
    let token = token.trim();

    if let Ok(id) = token.parse::<u32>() {
        return Some(ItemId(id));
    }

    registry.item_id(token).filter(|id| !id.is_none())
}
