//! Item system functions.

use hecs::{Entity, World};

use crate::components::{Health, Item, Loadout};
use crate::config::WeaponTable;
use crate::weapons::Weapon;

/// Result of applying a chest item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUseResult {
    /// Weapon added to the inventory
    WeaponAdded,
    /// Inventory full or weapon already held; the item is lost
    WeaponRejected,
    Healed,
    AmmoAdded,
    /// Entity lacks the component the item acts on
    Failed,
}

impl ItemUseResult {
    pub fn applied(&self) -> bool {
        matches!(
            self,
            ItemUseResult::WeaponAdded | ItemUseResult::Healed | ItemUseResult::AmmoAdded
        )
    }
}

/// Get the display name of an item
pub fn item_name(item: Item) -> String {
    match item {
        Item::Weapon(kind) => kind.name().to_string(),
        Item::Health(value) => format!("{value} health"),
        Item::Ammo(value) => format!("{value} ammo"),
    }
}

/// Apply a picked-up item to its holder's loadout and health.
///
/// Weapons join the inventory only when there is room and that kind is not
/// already held; health is capped at max; ammo is added uncapped.
pub fn apply_item(
    loadout: &mut Loadout,
    health: &mut Health,
    item: Item,
    weapons: &WeaponTable,
) -> ItemUseResult {
    match item {
        Item::Weapon(kind) => {
            if loadout.is_full() || loadout.has(kind) {
                return ItemUseResult::WeaponRejected;
            }
            loadout
                .weapons
                .push(Weapon::new(kind, weapons.stats(kind).clone()));
            ItemUseResult::WeaponAdded
        }
        Item::Health(value) => {
            health.heal(value as f32);
            ItemUseResult::Healed
        }
        Item::Ammo(value) => {
            loadout.reserve.add(value);
            ItemUseResult::AmmoAdded
        }
    }
}

/// Apply an item to an entity in the world
pub fn use_item(world: &mut World, entity: Entity, item: Item, weapons: &WeaponTable) -> ItemUseResult {
    match world.query_one_mut::<(&mut Loadout, &mut Health)>(entity) {
        Ok((loadout, health)) => apply_item(loadout, health, item, weapons),
        Err(_) => ItemUseResult::Failed,
    }
}
