//! Block and item identifiers
//!
//! Identifiers are the numeric block/item codes used by the host server.
//! Symbolic names are resolved through an [`ItemRegistry`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::ItemTableError;

/// Numeric block or item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// "No such item", returned by name registries that have no match
    pub const NONE: ItemId = ItemId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId(id)
    }
}

/// Name to identifier lookup supplied by the host
pub trait ItemRegistry {
    /// Look up an item by name. `None` or [`ItemId::NONE`] means unknown.
    fn item_id(&self, name: &str) -> Option<ItemId>;
}

impl<F> ItemRegistry for F
where
    F: Fn(&str) -> Option<ItemId>,
{
    fn item_id(&self, name: &str) -> Option<ItemId> {
        self(name)
    }
}

/// Classic block and item names
const CLASSIC_ITEMS: &[(&str, u32)] = &[
    ("stone", 1),
    ("grass", 2),
    ("dirt", 3),
    ("cobblestone", 4),
    ("wood", 5),
    ("sapling", 6),
    ("bedrock", 7),
    ("water", 8),
    ("stationary_water", 9),
    ("lava", 10),
    ("stationary_lava", 11),
    ("sand", 12),
    ("gravel", 13),
    ("gold_ore", 14),
    ("iron_ore", 15),
    ("coal_ore", 16),
    ("log", 17),
    ("leaves", 18),
    ("sponge", 19),
    ("glass", 20),
    ("cloth", 35),
    ("yellow_flower", 37),
    ("red_rose", 38),
    ("brown_mushroom", 39),
    ("red_mushroom", 40),
    ("gold_block", 41),
    ("iron_block", 42),
    ("double_step", 43),
    ("step", 44),
    ("brick", 45),
    ("tnt", 46),
    ("bookshelf", 47),
    ("mossy_cobblestone", 48),
    ("obsidian", 49),
    ("torch", 50),
    ("fire", 51),
    ("mob_spawner", 52),
    ("wooden_stairs", 53),
    ("chest", 54),
    ("redstone_wire", 55),
    ("diamond_ore", 56),
    ("diamond_block", 57),
    ("workbench", 58),
    ("crops", 59),
    ("soil", 60),
    ("furnace", 61),
    ("sign_post", 63),
    ("wooden_door", 64),
    ("ladder", 65),
    ("rails", 66),
    ("cobblestone_stairs", 67),
    ("wall_sign", 68),
    ("lever", 69),
    ("stone_plate", 70),
    ("iron_door", 71),
    ("wooden_plate", 72),
    ("redstone_ore", 73),
    ("redstone_torch", 76),
    ("stone_button", 77),
    ("snow", 78),
    ("ice", 79),
    ("snow_block", 80),
    ("cactus", 81),
    ("clay", 82),
    ("reed", 83),
    ("jukebox", 84),
    ("iron_spade", 256),
    ("iron_pickaxe", 257),
    ("iron_axe", 258),
    ("flint_and_steel", 259),
    ("lighter", 259),
    ("apple", 260),
    ("bow", 261),
    ("arrow", 262),
    ("coal", 263),
    ("diamond", 264),
    ("iron_sword", 267),
    ("diamond_pickaxe", 278),
    ("bucket", 325),
    ("water_bucket", 326),
    ("lava_bucket", 327),
    ("minecart", 328),
];

static CLASSIC_TABLE: Lazy<HashMap<String, ItemId>> = Lazy::new(|| {
    CLASSIC_ITEMS
        .iter()
        .map(|(name, id)| (name.to_string(), ItemId(*id)))
        .collect()
});

/// Lowercase a name and fold spaces and hyphens into underscores
fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// On-disk item table format
#[derive(Debug, Deserialize, Default)]
struct ItemTableFile {
    #[serde(default)]
    items: HashMap<String, u32>,
}

/// Case-insensitive name table
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    names: HashMap<String, ItemId>,
}

impl ItemTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in classic block and item names
    pub fn classic() -> Self {
        Self {
            names: (*CLASSIC_TABLE).clone(),
        }
    }

    /// Parse a `[items] name = id` table
    pub fn from_toml_str(content: &str) -> Result<Self, ItemTableError> {
        let file: ItemTableFile = toml::from_str(content)?;
        let mut table = Self::new();
        for (name, id) in file.items {
            if id == 0 {
                return Err(ItemTableError::ReservedId { name });
            }
            table.insert(&name, ItemId(id));
        }
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ItemTableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Add or replace a name
    pub fn insert(&mut self, name: &str, id: ItemId) {
        self.names.insert(normalize_name(name), id);
    }

    /// Merge another table over this one
    pub fn extend(&mut self, other: ItemTable) {
        self.names.extend(other.names);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ItemRegistry for ItemTable {
    fn item_id(&self, name: &str) -> Option<ItemId> {
        self.names.get(&normalize_name(name)).copied()
    }
}
