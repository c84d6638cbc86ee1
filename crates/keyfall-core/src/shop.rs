//! The shop: browsing the catalog and buying items.
//!
//! Prices are not stored anywhere durable. They are recomputed from the
//! current [`Stats`] and the owned items whenever the shop is entered and
//! after every purchase. A purchase either goes through completely or leaves
//! every piece of state exactly as it was.

use keyfall_logic::config::HelperConfig;
use keyfall_logic::stats::Stats;
use serde::{Deserialize, Serialize};

use crate::items::{helper_count, Item, ItemKind, PurchaseEffect};

/// Why a purchase did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    NotInShop,
    NoSuchItem { index: usize },
    InsufficientFunds { price: u64, balance: u64 },
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    Accepted {
        kind: ItemKind,
        price: u64,
        /// Identity of the new owned item, for instantiated items.
        id: Option<u32>,
    },
    Rejected(Rejection),
}

impl Purchase {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Purchase::Accepted { .. })
    }
}

/// One catalog row for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopListing {
    pub kind: ItemKind,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
    pub affordable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct Shop {
    catalog: Vec<Item>,
    selected: usize,
}

impl Shop {
    pub fn new(config: &HelperConfig) -> Self {
        Self {
            catalog: Item::catalog(config),
            selected: 0,
        }
    }

    pub fn catalog(&self) -> &[Item] {
        &self.catalog
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.catalog.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.catalog.len() - 1);
    }

    /// Reset the cursor and refresh all prices.
    pub fn enter(&mut self, stats: &Stats, owned: &mut [Item]) {
        self.selected = 0;
        self.refresh(stats, owned);
    }

    /// Recompute catalog prices and refresh owned items from `stats`.
    pub fn refresh(&mut self, stats: &Stats, owned: &mut [Item]) {
        let helpers = helper_count(owned);
        for item in &mut self.catalog {
            item.refresh(stats, helpers);
        }
        for item in owned.iter_mut() {
            item.refresh(stats, helpers);
        }
    }

    pub fn listings(&self, stats: &Stats) -> Vec<ShopListing> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(index, item)| ShopListing {
                kind: item.kind(),
                name: item.name(),
                description: item.description(),
                price: item.price(),
                affordable: item.price() <= stats.dollars,
                selected: index == self.selected,
            })
            .collect()
    }

    /// Try to buy catalog entry `index`.
    pub fn purchase(&mut self, index: usize, stats: &mut Stats, owned: &mut Vec<Item>) -> Purchase {
        let Some(item) = self.catalog.get(index) else {
            log::debug!("purchase rejected: no item at index {}", index);
            return Purchase::Rejected(Rejection::NoSuchItem { index });
        };
        let price = item.price();
        if !stats.try_spend(price) {
            log::debug!(
                "purchase rejected: {} costs {} with balance {}",
                item.name(),
                price,
                stats.dollars
            );
            return Purchase::Rejected(Rejection::InsufficientFunds {
                price,
                balance: stats.dollars,
            });
        }

        let kind = item.kind();
        let id = match item.purchase(stats) {
            PurchaseEffect::Instantiate => {
                let mut copy = item.clone();
                let id = owned.len() as u32 + 1;
                copy.set_id(id);
                owned.push(copy);
                Some(id)
            }
            PurchaseEffect::InPlace => None,
        };
        log::info!("bought {} for {}", item.name(), price);

        self.refresh(stats, owned);
        Purchase::Accepted { kind, price, id }
    }

    pub fn purchase_selected(&mut self, stats: &mut Stats, owned: &mut Vec<Item>) -> Purchase {
        self.purchase(self.selected, stats, owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_shop(stats: &Stats, owned: &mut [Item]) -> Shop {
        let mut shop = Shop::new(&HelperConfig::default());
        shop.enter(stats, owned);
        shop
    }

    #[test]
    fn test_buy_helper_with_exact_funds() {
        let mut stats = Stats::new();
        stats.dollars = 1000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);

        let result = shop.purchase(0, &mut stats, &mut owned);
        assert_eq!(
            result,
            Purchase::Accepted {
                kind: ItemKind::Helper,
                price: 1000,
                id: Some(1)
            }
        );
        assert_eq!(stats.dollars, 0);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id(), Some(1));
        // Next helper costs double.
        assert_eq!(shop.catalog()[0].price(), 2000);
    }

    #[test]
    fn test_helper_ids_are_fresh() {
        let mut stats = Stats::new();
        stats.dollars = 1_000_000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        for expected in 1..=3 {
            let result = shop.purchase(0, &mut stats, &mut owned);
            assert!(matches!(result, Purchase::Accepted { id: Some(id), .. } if id == expected));
        }
        let ids: Vec<Option<u32>> = owned.iter().map(Item::id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(stats.dollars, 1_000_000 - 1000 - 2000 - 4000);
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut stats = Stats::new();
        stats.dollars = 999;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        let before = stats.clone();

        let result = shop.purchase(0, &mut stats, &mut owned);
        assert_eq!(
            result,
            Purchase::Rejected(Rejection::InsufficientFunds {
                price: 1000,
                balance: 999
            })
        );
        assert_eq!(stats, before);
        assert!(owned.is_empty());
    }

    #[test]
    fn test_bad_index_changes_nothing() {
        let mut stats = Stats::new();
        stats.dollars = 50_000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        let before = stats.clone();

        let result = shop.purchase(7, &mut stats, &mut owned);
        assert_eq!(result, Purchase::Rejected(Rejection::NoSuchItem { index: 7 }));
        assert_eq!(stats, before);
        assert!(owned.is_empty());
    }

    #[test]
    fn test_upgrades_apply_in_place() {
        let mut stats = Stats::new();
        stats.dollars = 10_000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);

        assert!(shop.purchase(1, &mut stats, &mut owned).is_accepted());
        assert_eq!(stats.cpu_upgrades, 2);
        assert_eq!(stats.dollars, 8000);
        assert_eq!(shop.catalog()[1].price(), 4000);

        assert!(shop.purchase(2, &mut stats, &mut owned).is_accepted());
        assert_eq!(stats.gc_threshold, 13);
        assert_eq!(stats.dollars, 7000);
        assert_eq!(shop.catalog()[2].price(), 1100);

        assert!(owned.is_empty());
    }

    #[test]
    fn test_cpu_upgrade_reaches_owned_helpers() {
        let mut stats = Stats::new();
        stats.dollars = 10_000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        shop.purchase(0, &mut stats, &mut owned);
        shop.purchase(1, &mut stats, &mut owned);
        let helper = owned[0].as_helper().unwrap();
        assert_eq!(helper.cpu_upgrades(), 2);
    }

    #[test]
    fn test_cursor_wraps() {
        let stats = Stats::new();
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        assert_eq!(shop.selected(), 0);
        shop.select_previous();
        assert_eq!(shop.selected(), 2);
        shop.select_next();
        assert_eq!(shop.selected(), 0);
        shop.select_next();
        shop.select_next();
        shop.select_next();
        assert_eq!(shop.selected(), 0);

        shop.select_next();
        let listings = shop.listings(&stats);
        assert!(listings[1].selected);
        assert!(!listings[0].selected);
        assert!(listings.iter().all(|l| !l.affordable));

        shop.enter(&stats, &mut owned);
        assert_eq!(shop.selected(), 0);
    }

    #[test]
    fn test_purchase_selected() {
        let mut stats = Stats::new();
        stats.dollars = 2000;
        let mut owned = Vec::new();
        let mut shop = open_shop(&stats, &mut owned);
        shop.select_next();
        let result = shop.purchase_selected(&mut stats, &mut owned);
        assert!(matches!(
            result,
            Purchase::Accepted {
                kind: ItemKind::CpuUpgrade,
                price: 2000,
                id: None
            }
        ));
    }
}
