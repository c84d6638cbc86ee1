//! Purchasable items.
//!
//! The shop sells three kinds of item. Helpers are instantiated: buying one
//! appends an independent copy to the player's owned items. The two upgrades
//! act in place on [`Stats`] and are never owned.

mod helper;
mod upgrades;

pub use helper::*;
pub use upgrades::*;

use hecs::World;
use keyfall_logic::config::HelperConfig;
use keyfall_logic::economy;
use keyfall_logic::stats::Stats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which kind of item this is, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Helper,
    CpuUpgrade,
    RuntimeUpgrade,
}

/// What buying an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseEffect {
    /// Append a copy of the item to the owned items.
    Instantiate,
    /// The item already changed `Stats`; nothing is kept.
    InPlace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Helper(Helper),
    CpuUpgrade(CpuUpgrade),
    RuntimeUpgrade(RuntimeUpgrade),
}

impl Item {
    /// Shop catalog, in display order.
    pub fn catalog(config: &HelperConfig) -> Vec<Item> {
        vec![
            Item::Helper(Helper::new(config)),
            Item::CpuUpgrade(CpuUpgrade::default()),
            Item::RuntimeUpgrade(RuntimeUpgrade::default()),
        ]
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Helper(_) => ItemKind::Helper,
            Item::CpuUpgrade(_) => ItemKind::CpuUpgrade,
            Item::RuntimeUpgrade(_) => ItemKind::RuntimeUpgrade,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::Helper(_) => Helper::NAME,
            Item::CpuUpgrade(_) => CpuUpgrade::NAME,
            Item::RuntimeUpgrade(_) => RuntimeUpgrade::NAME,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Item::Helper(_) => Helper::DESCRIPTION,
            Item::CpuUpgrade(_) => CpuUpgrade::DESCRIPTION,
            Item::RuntimeUpgrade(_) => RuntimeUpgrade::DESCRIPTION,
        }
    }

    /// Price as of the last [`Item::refresh`].
    pub fn price(&self) -> u64 {
        match self {
            Item::Helper(h) => h.price(),
            Item::CpuUpgrade(u) => u.price(),
            Item::RuntimeUpgrade(u) => u.price(),
        }
    }

    pub fn price_label(&self) -> String {
        economy::price_label(self.price())
    }

    /// Identity of an owned, instantiated item.
    pub fn id(&self) -> Option<u32> {
        match self {
            Item::Helper(h) if h.id() > 0 => Some(h.id()),
            _ => None,
        }
    }

    pub fn set_id(&mut self, id: u32) {
        if let Item::Helper(h) = self {
            h.set_id(id);
        }
    }

    pub fn as_helper(&self) -> Option<&Helper> {
        match self {
            Item::Helper(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_helper_mut(&mut self) -> Option<&mut Helper> {
        match self {
            Item::Helper(h) => Some(h),
            _ => None,
        }
    }

    /// Recompute price and derived state on shop entry.
    pub fn refresh(&mut self, stats: &Stats, owned_helpers: usize) {
        match self {
            Item::Helper(h) => h.refresh(stats, owned_helpers),
            Item::CpuUpgrade(u) => u.refresh(stats),
            Item::RuntimeUpgrade(u) => u.refresh(stats),
        }
    }

    /// Apply the purchase to `stats` and report whether to keep a copy.
    pub fn purchase(&self, stats: &mut Stats) -> PurchaseEffect {
        match self {
            Item::Helper(_) => PurchaseEffect::Instantiate,
            Item::CpuUpgrade(u) => {
                u.apply(stats);
                PurchaseEffect::InPlace
            }
            Item::RuntimeUpgrade(u) => {
                u.apply(stats);
                PurchaseEffect::InPlace
            }
        }
    }

    /// Per-frame behaviour. Only helpers do anything.
    pub fn tick(
        &mut self,
        now: f64,
        world: &World,
        stats: &mut Stats,
        rng: &mut impl Rng,
    ) -> Option<HelperAction> {
        match self {
            Item::Helper(h) => Some(h.tick(now, world, stats, rng)),
            _ => None,
        }
    }
}

/// Count owned helpers.
pub fn helper_count(items: &[Item]) -> usize {
    items.iter().filter(|i| i.kind() == ItemKind::Helper).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let catalog = Item::catalog(&HelperConfig::default());
        let kinds: Vec<ItemKind> = catalog.iter().map(Item::kind).collect();
        assert_eq!(
            kinds,
            vec![ItemKind::Helper, ItemKind::CpuUpgrade, ItemKind::RuntimeUpgrade]
        );
        assert!(catalog.iter().all(|i| i.id().is_none()));
    }

    #[test]
    fn test_refresh_prices() {
        let mut stats = Stats::new();
        stats.apply_cpu_upgrade();
        stats.apply_runtime_upgrade();
        let mut catalog = Item::catalog(&HelperConfig::default());
        for item in &mut catalog {
            item.refresh(&stats, 2);
        }
        let prices: Vec<u64> = catalog.iter().map(Item::price).collect();
        assert_eq!(prices, vec![4000, 4000, 1100]);
        assert_eq!(catalog[0].price_label(), "$4000");
    }

    #[test]
    fn test_purchase_effects() {
        let mut stats = Stats::new();
        let catalog = Item::catalog(&HelperConfig::default());

        assert_eq!(catalog[0].purchase(&mut stats), PurchaseEffect::Instantiate);
        assert_eq!(stats, Stats::new());

        assert_eq!(catalog[1].purchase(&mut stats), PurchaseEffect::InPlace);
        assert_eq!(stats.cpu_upgrades, 2);

        assert_eq!(catalog[2].purchase(&mut stats), PurchaseEffect::InPlace);
        assert_eq!(stats.gc_threshold, 13);
    }

    #[test]
    fn test_upgrades_do_not_tick() {
        let world = World::new();
        let mut stats = Stats::new();
        let mut rng = rand::thread_rng();
        let mut item = Item::CpuUpgrade(CpuUpgrade::default());
        assert_eq!(item.tick(100.0, &world, &mut stats, &mut rng), None);
    }

    #[test]
    fn test_helper_count() {
        let mut items = Item::catalog(&HelperConfig::default());
        items.push(items[0].clone());
        assert_eq!(helper_count(&items), 2);
    }
}
